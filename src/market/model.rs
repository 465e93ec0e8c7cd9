use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};

use super::{CANDLE_INTERVAL_SECS, CANDLE_WINDOW, CandleGenerator, CandleRecord};
use crate::random::RandomSource;

/// Window of the most recent candles in chronological order (newest last).
pub struct CandleWindow {
    candles: VecDeque<CandleRecord>,
    generator: CandleGenerator,
    produced: u64,
}

impl CandleWindow {
    pub fn new(sellers_floor: u32) -> Self {
        Self {
            candles: VecDeque::with_capacity(CANDLE_WINDOW + 1),
            generator: CandleGenerator::new(sellers_floor),
            produced: 0,
        }
    }

    fn interval() -> TimeDelta {
        TimeDelta::seconds(CANDLE_INTERVAL_SECS)
    }

    /// Generate `count` candles forward so the newest one is stamped `now`.
    /// Each candle is fed from the one generated before it.
    pub fn seed(&mut self, count: usize, now: DateTime<Utc>, rng: &mut dyn RandomSource) {
        for i in 0..count {
            let back = (count - 1 - i) as i32;
            self.push_next(now - Self::interval() * back, rng);
        }
    }

    /// Generate the next candle stamped `now`, kept strictly after the latest
    /// candle if the clock has not moved past it.
    pub fn advance(&mut self, now: DateTime<Utc>, rng: &mut dyn RandomSource) -> &CandleRecord {
        let timestamp = match self.latest() {
            Some(latest) => now.max(latest.timestamp + TimeDelta::seconds(1)),
            None => now,
        };
        self.push_next(timestamp, rng)
    }

    fn push_next(&mut self, timestamp: DateTime<Utc>, rng: &mut dyn RandomSource) -> &CandleRecord {
        let next = self
            .generator
            .produce(self.candles.back(), timestamp, self.produced, rng);
        self.produced += 1;

        self.candles.push_back(next);
        while self.candles.len() > CANDLE_WINDOW {
            self.candles.pop_front();
        }
        &self.candles[self.candles.len() - 1]
    }

    pub fn latest(&self) -> Option<&CandleRecord> {
        self.candles.back()
    }

    pub fn previous(&self) -> Option<&CandleRecord> {
        self.candles.len().checked_sub(2).map(|i| &self.candles[i])
    }

    pub fn first(&self) -> Option<&CandleRecord> {
        self.candles.front()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &CandleRecord> {
        self.candles.iter()
    }

    pub fn to_vec(&self) -> Vec<CandleRecord> {
        self.candles.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::CandleWindow;
    use crate::clock::{Clock, testing::FixedClock};
    use crate::market::{CANDLE_WINDOW, DEFAULT_SELLERS_FLOOR};
    use crate::random::RngSource;
    use chrono::TimeDelta;

    #[test]
    fn thirty_candles_keep_the_latest_twenty_four() {
        let mut rng = RngSource::seeded(21);
        let now = FixedClock::epoch().now();
        let mut window = CandleWindow::new(DEFAULT_SELLERS_FLOOR);
        assert!(window.is_empty());

        let mut all = Vec::new();
        for _ in 0..30 {
            all.push(window.advance(now, &mut rng).clone());
        }

        assert_eq!(window.len(), CANDLE_WINDOW);
        assert_eq!(window.to_vec(), all[6..].to_vec());
        let stamps: Vec<_> = window.iter().map(|c| c.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn continuity_survives_eviction() {
        let mut rng = RngSource::seeded(22);
        let now = FixedClock::epoch().now();
        let mut window = CandleWindow::new(DEFAULT_SELLERS_FLOOR);
        window.seed(CANDLE_WINDOW, now, &mut rng);
        for _ in 0..40 {
            window.advance(now, &mut rng);
        }
        let candles = window.to_vec();
        for pair in candles.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
        }
    }

    #[test]
    fn live_candles_follow_the_clock() {
        let mut rng = RngSource::seeded(24);
        let start = FixedClock::epoch().now();
        let mut window = CandleWindow::new(DEFAULT_SELLERS_FLOOR);
        window.seed(CANDLE_WINDOW, start, &mut rng);

        let mut now = start;
        for _ in 0..720 {
            now += TimeDelta::seconds(5);
            window.advance(now, &mut rng);
        }
        assert_eq!(window.latest().unwrap().timestamp, start + TimeDelta::hours(1));

        // a clock that stalls still yields increasing stamps
        let stalled = window.advance(now, &mut rng).timestamp;
        assert_eq!(stalled, now + TimeDelta::seconds(1));
    }

    #[test]
    fn seeding_ends_at_now_with_five_minute_spacing() {
        let mut rng = RngSource::seeded(23);
        let now = FixedClock::epoch().now();
        let mut window = CandleWindow::new(DEFAULT_SELLERS_FLOOR);
        window.seed(CANDLE_WINDOW, now, &mut rng);

        assert_eq!(window.latest().unwrap().timestamp, now);
        assert_eq!(
            window.first().unwrap().timestamp,
            now - TimeDelta::minutes(5) * 23
        );
        assert_eq!(
            window.previous().unwrap().timestamp,
            now - TimeDelta::minutes(5)
        );
    }
}
