use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::blockchain::DEFAULT_GENESIS_HEIGHT;
use crate::market::DEFAULT_SELLERS_FLOOR;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Tunables of the simulation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub log_rotate_period: Duration,
    pub block_period: Duration,
    pub candle_period: Duration,
    pub faucet_settle_delay: Duration,
    pub wallet_seed_balance: f64,
    pub sellers_floor: u32,
    pub genesis_height: u64,
    /// Seed for a deterministic run; entropy when absent.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_rotate_period: Duration::from_millis(6_200),
            block_period: Duration::from_millis(5_800),
            candle_period: Duration::from_millis(5_000),
            faucet_settle_delay: Duration::from_millis(2_400),
            wallet_seed_balance: 100.0,
            sellers_floor: DEFAULT_SELLERS_FLOOR,
            genesis_height: DEFAULT_GENESIS_HEIGHT,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Read configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = EngineConfig::default();

        let wallet_seed_balance: f64 =
            parse_or(&lookup, "WALLET_SEED_BALANCE", defaults.wallet_seed_balance)?;
        if !wallet_seed_balance.is_finite() || wallet_seed_balance < 0.0 {
            return Err(invalid("WALLET_SEED_BALANCE", &lookup));
        }

        let engine = EngineConfig {
            log_rotate_period: period(&lookup, "LOG_ROTATE_MS", defaults.log_rotate_period)?,
            block_period: period(&lookup, "BLOCK_PERIOD_MS", defaults.block_period)?,
            candle_period: period(&lookup, "CANDLE_PERIOD_MS", defaults.candle_period)?,
            faucet_settle_delay: period(&lookup, "FAUCET_SETTLE_MS", defaults.faucet_settle_delay)?,
            wallet_seed_balance,
            sellers_floor: parse_or(&lookup, "SELLERS_FLOOR", defaults.sellers_floor)?,
            genesis_height: parse_or(&lookup, "GENESIS_HEIGHT", defaults.genesis_height)?,
            rng_seed: match lookup("ENGINE_SEED") {
                Some(_) => Some(parse_or(&lookup, "ENGINE_SEED", 0)?),
                None => None,
            },
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            engine,
        })
    }
}

fn invalid(key: &'static str, lookup: &impl Fn(&str) -> Option<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: lookup(key).unwrap_or_default(),
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

/// Millisecond period; zero is rejected.
fn period(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let ms: u64 = parse_or(lookup, key, default.as_millis() as u64)?;
    if ms == 0 {
        return Err(invalid(key, lookup));
    }
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, EngineConfig};
    use std::collections::HashMap;
    use std::time::Duration;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.engine, EngineConfig::default());
        assert_eq!(cfg.engine.block_period, Duration::from_millis(5_800));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = load(&[
            ("PORT", "9000"),
            ("CANDLE_PERIOD_MS", "250"),
            ("ENGINE_SEED", "42"),
            ("WALLET_SEED_BALANCE", "12.5"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.engine.candle_period, Duration::from_millis(250));
        assert_eq!(cfg.engine.rng_seed, Some(42));
        assert_eq!(cfg.engine.wallet_seed_balance, 12.5);
    }

    #[test]
    fn garbage_and_zero_periods_are_rejected() {
        assert_eq!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid {
                key: "PORT",
                value: "eighty".into()
            })
        );
        assert!(load(&[("BLOCK_PERIOD_MS", "0")]).is_err());
        assert!(load(&[("WALLET_SEED_BALANCE", "-1")]).is_err());
    }
}
