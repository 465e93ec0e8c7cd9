use serde::Serialize;
use thiserror::Error;

use crate::ledger::AMOUNT_PLACES;
use crate::random::{RandomSource, round_to};

/// Hex characters after the `0x` prefix of a generated address.
pub const ADDRESS_HEX_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletSource {
    Generated,
    External,
}

/// Failures reported by the external signing-extension bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkError {
    #[error("no external wallet extension is available")]
    Unavailable,
    #[error("the external wallet rejected the connection request")]
    Rejected,
}

/// The single wallet the observatory operates on.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WalletState {
    address: Option<String>,
    balance: f64,
    source: Option<WalletSource>,
    #[serde(skip)]
    seeded: bool,
}

impl WalletState {
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    #[cfg(test)]
    pub fn source(&self) -> Option<WalletSource> {
        self.source
    }

    /// Replace the wallet with a fresh fabricated address and the seed balance.
    pub fn generate(&mut self, seed_balance: f64, rng: &mut dyn RandomSource) -> &str {
        let address = format!("0x{}", rng.hex_string(ADDRESS_HEX_LEN));
        self.address = Some(address);
        self.balance = round_to(seed_balance, AMOUNT_PLACES);
        self.source = Some(WalletSource::Generated);
        self.seeded = true;
        self.address.as_deref().unwrap_or_default()
    }

    /// Adopt an address supplied by an external extension. The seed balance
    /// is granted only the first time the wallet is funded.
    pub fn link(&mut self, address: Option<&str>, seed_balance: f64) -> Result<&str, LinkError> {
        let address = address
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(LinkError::Unavailable)?;
        if !address.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(LinkError::Rejected);
        }

        self.address = Some(address.to_string());
        self.source = Some(WalletSource::External);
        if !self.seeded {
            self.balance = round_to(seed_balance, AMOUNT_PLACES);
            self.seeded = true;
        }
        Ok(self.address.as_deref().unwrap_or_default())
    }

    /// Balances stay on the amount grid so a displayed balance is exactly spendable.
    pub(crate) fn debit(&mut self, amount: f64) {
        self.balance = round_to(self.balance - amount, AMOUNT_PLACES);
    }

    pub(crate) fn credit(&mut self, amount: f64) {
        self.balance = round_to(self.balance + amount, AMOUNT_PLACES);
    }

    #[cfg(test)]
    pub fn funded(address: &str, balance: f64) -> Self {
        Self {
            address: Some(address.to_string()),
            balance,
            source: Some(WalletSource::Generated),
            seeded: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LinkError, WalletSource, WalletState};
    use crate::random::RngSource;

    #[test]
    fn generate_sets_address_and_seed_balance() {
        let mut wallet = WalletState::default();
        assert!(wallet.address().is_none());

        let address = wallet.generate(100.0, &mut RngSource::seeded(1)).to_string();
        assert!(address.starts_with("0x"));
        assert_eq!(address.len(), 42);
        assert_eq!(wallet.balance(), 100.0);
        assert_eq!(wallet.source(), Some(WalletSource::Generated));
    }

    #[test]
    fn link_seeds_balance_only_once() {
        let mut wallet = WalletState::default();
        wallet.link(Some("ExtAddr111"), 100.0).unwrap();
        assert_eq!(wallet.balance(), 100.0);

        wallet.debit(30.0);
        wallet.link(Some("ExtAddr222"), 100.0).unwrap();
        assert_eq!(wallet.address(), Some("ExtAddr222"));
        assert_eq!(wallet.balance(), 70.0);
    }

    #[test]
    fn balance_does_not_accumulate_float_error() {
        let mut wallet = WalletState::funded("0xabc", 100.0);
        wallet.debit(99.9);
        assert_eq!(wallet.balance(), 0.1);
        wallet.credit(0.2);
        assert_eq!(wallet.balance(), 0.3);

        let mut fresh = WalletState::default();
        fresh.generate(12.345_678, &mut RngSource::seeded(2));
        assert_eq!(fresh.balance(), 12.3457);
    }

    #[test]
    fn link_failures_leave_wallet_untouched() {
        let mut wallet = WalletState::funded("0xabc", 5.0);
        assert_eq!(wallet.link(None, 100.0), Err(LinkError::Unavailable));
        assert_eq!(wallet.link(Some("   "), 100.0), Err(LinkError::Unavailable));
        assert_eq!(wallet.link(Some("bad addr!"), 100.0), Err(LinkError::Rejected));
        assert_eq!(wallet.address(), Some("0xabc"));
        assert_eq!(wallet.balance(), 5.0);
    }
}
