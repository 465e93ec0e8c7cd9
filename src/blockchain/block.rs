use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BLOCK_HASH_LEN, COMMENTARY, LATENCY_RANGE, PRODUCERS, THROUGHPUT_RANGE, TX_COUNT_RANGE};
use crate::random::{RandomSource, round_to};

/// Fabricated telemetry for a single block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockRecord {
    pub height: u64,
    pub producer: String,
    pub throughput: u32, // transactions/sec
    pub latency: f64,    // seconds
    pub tx_count: u32,
    pub hash: String,
    pub commentary: String,
    pub timestamp: DateTime<Utc>,
}

/// Produces block telemetry. Every field is drawn independently; the caller
/// owns height sequencing and the bounded ring.
pub struct BlockGenerator;

impl BlockGenerator {
    pub fn produce(
        height: u64,
        timestamp: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> BlockRecord {
        let throughput = rng.int_in(THROUGHPUT_RANGE.0, THROUGHPUT_RANGE.1) as u32;
        let latency = round_to(rng.float_in(LATENCY_RANGE.0, LATENCY_RANGE.1), 3);
        let tx_count = rng.int_in(TX_COUNT_RANGE.0, TX_COUNT_RANGE.1) as u32;
        let producer = rng.pick(&PRODUCERS).to_string();
        let commentary = rng.pick(&COMMENTARY).to_string();
        let hash = rng.hex_string(BLOCK_HASH_LEN);

        BlockRecord {
            height,
            producer,
            throughput,
            latency,
            tx_count,
            hash,
            commentary,
            timestamp,
        }
    }
}
