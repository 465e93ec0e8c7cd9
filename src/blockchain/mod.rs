pub mod block;
pub mod model;

pub use block::{BlockGenerator, BlockRecord};
pub use model::BlockWindow;

/// How many recent blocks the observatory keeps.
pub const BLOCK_WINDOW: usize = 6;

/// Default height of the oldest block seeded at startup.
pub const DEFAULT_GENESIS_HEIGHT: u64 = 1_284_400;

/// Throughput range (transactions/sec).
pub const THROUGHPUT_RANGE: (i64, i64) = (88_000, 112_000);

/// Latency range (seconds).
pub const LATENCY_RANGE: (f64, f64) = (0.320, 0.460);

/// Transactions per block.
pub const TX_COUNT_RANGE: (i64, i64) = (1_800, 2_600);

/// Length of a block content hash in hex characters.
pub const BLOCK_HASH_LEN: usize = 64;

/// Fixed roster of block-producing agents.
pub const PRODUCERS: [&str; 6] = [
    "atlas-sentinel",
    "borealis-relay",
    "cinder-forge",
    "delta-warden",
    "ember-scribe",
    "flux-harbor",
];

/// Commentary attached to each block.
pub const COMMENTARY: [&str; 8] = [
    "mempool drained in a single sweep",
    "quorum reached ahead of schedule",
    "steady cadence, no forks observed",
    "relay mesh reports nominal gossip",
    "fee market calm, blocks half full",
    "validator set rotated without churn",
    "latency spike absorbed by pipeline",
    "state root sealed and archived",
];
