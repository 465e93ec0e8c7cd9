//! Summary statistics derived from current store contents on every read.

use serde::Serialize;

use crate::blockchain::BlockWindow;
use crate::ledger::{EntryOrigin, LedgerStore};
use crate::market::{CandleRecord, CandleWindow, PRICE_PLACES};
use crate::random::round_to;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub height: Option<u64>,
    pub avg_latency: f64,
    pub avg_throughput: f64,
    pub ledger_entries: usize,
    pub ledger_volume: f64,
    pub faucet_drips: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketStats {
    pub latest: Option<CandleRecord>,
    pub previous: Option<CandleRecord>,
    pub price_delta: f64,
    pub percent_change: f64,
    pub session_delta: f64,
    pub session_percent: f64,
    pub buyers_delta: i64,
    pub sellers_delta: i64,
    pub holders_delta: i64,
    pub window_volume: f64,
}

pub fn network_stats(blocks: &BlockWindow, ledger: &LedgerStore) -> NetworkStats {
    let n = blocks.len();
    let (latency_sum, throughput_sum) = blocks
        .iter()
        .fold((0.0, 0.0), |(l, t), b| (l + b.latency, t + f64::from(b.throughput)));

    NetworkStats {
        height: blocks.latest().map(|b| b.height),
        avg_latency: round_to(mean(latency_sum, n), 3),
        avg_throughput: round_to(mean(throughput_sum, n), 0),
        ledger_entries: ledger.len(),
        ledger_volume: ledger.total_volume(),
        faucet_drips: ledger.count_by_origin(EntryOrigin::Faucet),
    }
}

pub fn market_stats(candles: &CandleWindow) -> MarketStats {
    let latest = candles.latest();
    let previous = candles.previous();

    let (price_delta, percent_change) = match (latest, previous) {
        (Some(l), Some(p)) => change(p.close, l.close),
        _ => (0.0, 0.0),
    };
    let (session_delta, session_percent) = match (candles.first(), latest) {
        (Some(f), Some(l)) => change(f.open, l.close),
        _ => (0.0, 0.0),
    };

    let participant = |field: fn(&CandleRecord) -> u32| match (latest, previous) {
        (Some(l), Some(p)) => i64::from(field(l)) - i64::from(field(p)),
        _ => 0,
    };

    MarketStats {
        latest: latest.cloned(),
        previous: previous.cloned(),
        price_delta,
        percent_change,
        session_delta,
        session_percent,
        buyers_delta: participant(|c| c.buyers),
        sellers_delta: participant(|c| c.sellers),
        holders_delta: participant(|c| c.holders),
        window_volume: round_to(candles.iter().map(|c| c.volume).sum(), 2),
    }
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Absolute and percent change from `from` to `to`; a zero base yields 0%.
fn change(from: f64, to: f64) -> (f64, f64) {
    let delta = to - from;
    let percent = if from == 0.0 { 0.0 } else { delta / from * 100.0 };
    (round_to(delta, PRICE_PLACES), round_to(percent, 2))
}
