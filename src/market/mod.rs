pub mod candle;
pub mod model;

pub use candle::{CandleGenerator, CandleRecord};
pub use model::CandleWindow;

/// How many recent candles the observatory keeps.
pub const CANDLE_WINDOW: usize = 24;

/// Candle interval in seconds (five-minute candles).
pub const CANDLE_INTERVAL_SECS: i64 = 300;

/// Opening price range for the very first candle.
pub const BASE_OPEN_RANGE: (f64, f64) = (12.4, 12.8);

/// Per-candle bullish drift (fraction of open).
pub const DRIFT_RANGE: (f64, f64) = (0.001, 0.006);

/// Probability that a downward correction is applied.
pub const CORRECTION_CHANCE: f64 = 0.25;

/// Maximum correction (fraction of open).
pub const MAX_CORRECTION: f64 = 0.002;

/// Maximum wick beyond the body (fraction of open).
pub const MAX_WICK: f64 = 0.0035;

pub const VOLUME_RANGE: (i64, i64) = (4_100, 7_200);
pub const BUYERS_STEP: (i64, i64) = (18, 52);
pub const SELLERS_STEP: (i64, i64) = (-8, 24);
pub const HOLDERS_STEP: (i64, i64) = (28, 96);

/// Default floor for the sellers counter.
pub const DEFAULT_SELLERS_FLOOR: u32 = 540;

/// Participant counters used when there is no previous candle.
pub const BASE_BUYERS: u32 = 1_180;
pub const BASE_SELLERS: u32 = 620;
pub const BASE_HOLDERS: u32 = 9_400;

/// Price precision in decimal places.
pub const PRICE_PLACES: i32 = 4;
