use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    BASE_BUYERS, BASE_HOLDERS, BASE_OPEN_RANGE, BASE_SELLERS, BUYERS_STEP, CORRECTION_CHANCE,
    DRIFT_RANGE, HOLDERS_STEP, MAX_CORRECTION, MAX_WICK, PRICE_PLACES, SELLERS_STEP, VOLUME_RANGE,
};
use crate::random::{RandomSource, round_to};

/// One OHLCV candle with participant counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleRecord {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub buyers: u32,
    pub sellers: u32,
    pub holders: u32,
    pub timestamp: DateTime<Utc>,
}

/// Produces continuity-linked candles.
pub struct CandleGenerator {
    sellers_floor: u32,
}

impl CandleGenerator {
    pub fn new(sellers_floor: u32) -> Self {
        Self { sellers_floor }
    }

    /// Build the candle that follows `previous`.
    ///
    /// The open is exactly `previous.close`; without a previous candle it is
    /// drawn from the base range. `seed` only nudges the buyers counter so
    /// candles seeded in the same batch do not tie.
    pub fn produce(
        &self,
        previous: Option<&CandleRecord>,
        timestamp: DateTime<Utc>,
        seed: u64,
        rng: &mut dyn RandomSource,
    ) -> CandleRecord {
        let (open, buyers, sellers, holders) = match previous {
            Some(prev) => (prev.close, prev.buyers, prev.sellers, prev.holders),
            None => (
                round_to(rng.float_in(BASE_OPEN_RANGE.0, BASE_OPEN_RANGE.1), PRICE_PLACES),
                BASE_BUYERS,
                BASE_SELLERS,
                BASE_HOLDERS,
            ),
        };

        let drift = rng.float_in(DRIFT_RANGE.0, DRIFT_RANGE.1);
        let correction = if rng.chance(CORRECTION_CHANCE) {
            rng.float_in(0.0, MAX_CORRECTION)
        } else {
            0.0
        };
        let close = round_to(open * (1.0 + drift - correction), PRICE_PLACES);

        // Wicks extend from an already-rounded body, so rounding never
        // pulls high below the body top or low above the body bottom.
        let high = round_to(open.max(close) + rng.float_in(0.0, MAX_WICK) * open, PRICE_PLACES);
        let low = round_to(open.min(close) - rng.float_in(0.0, MAX_WICK) * open, PRICE_PLACES);

        let volume = round_to(
            rng.int_in(VOLUME_RANGE.0, VOLUME_RANGE.1) as f64 + rng.unit(),
            2,
        );

        let buyers = buyers + rng.int_in(BUYERS_STEP.0, BUYERS_STEP.1) as u32 + (seed % 5) as u32;
        let sellers_step = rng.int_in(SELLERS_STEP.0, SELLERS_STEP.1);
        let sellers = (i64::from(sellers) + sellers_step).max(i64::from(self.sellers_floor)) as u32;
        let holders = holders + rng.int_in(HOLDERS_STEP.0, HOLDERS_STEP.1) as u32;

        CandleRecord {
            open,
            high,
            low,
            close,
            volume,
            buyers,
            sellers,
            holders,
            timestamp,
        }
    }
}
