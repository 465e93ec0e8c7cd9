use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::{Builder, Uuid};

/// Bounded random primitives used by every generator in the engine.
///
/// Only `unit` and `fill` are required; the ranged draws are derived from
/// them so a scripted source can drive every generator deterministically.
pub trait RandomSource: Send {
    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Fill `buf` with random bytes.
    fn fill(&mut self, buf: &mut [u8]);

    /// Uniform integer in `[min, max]` (inclusive). Returns `min` when the range is empty.
    fn int_in(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as f64;
        let offset = (self.unit() * span).floor() as i64;
        min + offset.min(max - min)
    }

    /// Uniform float in `[min, max)`. Returns `min` when the range is empty.
    fn float_in(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        min + self.unit() * (max - min)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// Uniform pick from a fixed, non-empty pool.
    fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        let idx = self.int_in(0, pool.len() as i64 - 1) as usize;
        pool[idx]
    }

    /// Lowercase hexadecimal string of exactly `len` characters.
    fn hex_string(&mut self, len: usize) -> String {
        let mut bytes = vec![0u8; len.div_ceil(2)];
        self.fill(&mut bytes);
        let mut out = hex::encode(bytes);
        out.truncate(len);
        out
    }
}

/// `RandomSource` backed by a `rand` generator.
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic source: the same seed replays the same telemetry.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn fill(&mut self, buf: &mut [u8]) {
        self.rng.fill_bytes(buf);
    }

    fn int_in(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn float_in(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

/// UUID built from injected randomness, so identifiers replay with the seed.
pub fn random_uuid(rng: &mut dyn RandomSource) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedSource;
    use super::{RandomSource, RngSource, round_to};

    #[test]
    fn int_in_is_inclusive_on_both_ends() {
        let mut low = ScriptedSource::constant(0.0);
        let mut high = ScriptedSource::constant(0.999_999);
        assert_eq!(low.int_in(18, 52), 18);
        assert_eq!(high.int_in(18, 52), 52);
    }

    #[test]
    fn seeded_sources_replay_the_same_draws() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        let draws_a: Vec<i64> = (0..16).map(|_| a.int_in(88_000, 112_000)).collect();
        let draws_b: Vec<i64> = (0..16).map(|_| b.int_in(88_000, 112_000)).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|v| (88_000..=112_000).contains(v)));
    }

    #[test]
    fn hex_string_has_requested_length() {
        let mut rng = RngSource::seeded(7);
        for len in [0, 1, 7, 40, 64] {
            let s = rng.hex_string(len);
            assert_eq!(s.len(), len);
            assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn empty_ranges_collapse_to_min() {
        let mut rng = RngSource::seeded(1);
        assert_eq!(rng.int_in(5, 5), 5);
        assert_eq!(rng.float_in(0.5, 0.5), 0.5);
    }

    #[test]
    fn round_to_four_places() {
        assert_eq!(round_to(12.345_678, 4), 12.3457);
        assert_eq!(round_to(0.000_04, 4), 0.0);
    }
}
