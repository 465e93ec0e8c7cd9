use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use super::{AMOUNT_PLACES, AMOUNT_UNIT, EntryOrigin, FAUCET_SENDER, LedgerEntry};
use crate::random::{RandomSource, round_to};
use crate::wallet::WalletState;

/// Reasons a transfer is refused. Nothing is mutated on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferError {
    #[error("generate or link a wallet before sending")]
    NoWallet,
    #[error("amount must be a positive number")]
    InvalidAmount,
    #[error("amount exceeds the wallet balance")]
    InsufficientBalance,
    #[error("recipient address is required")]
    MissingRecipient,
}

/// Append-only transaction log, newest first.
#[derive(Debug, Default)]
pub struct LedgerStore {
    entries: VecDeque<LedgerEntry>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and apply a wallet transfer. Checks run in a fixed order and
    /// the first failure wins.
    pub fn record_transfer(
        &mut self,
        wallet: &mut WalletState,
        recipient: &str,
        amount: &str,
        memo: &str,
        timestamp: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Result<LedgerEntry, TransferError> {
        let sender = wallet.address().ok_or(TransferError::NoWallet)?.to_string();
        let requested = parse_amount(amount).ok_or(TransferError::InvalidAmount)?;
        if requested > wallet.balance() {
            warn!(
                "TRANSFER - rejected: amount {} exceeds balance {}",
                requested,
                wallet.balance()
            );
            return Err(TransferError::InsufficientBalance);
        }
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(TransferError::MissingRecipient);
        }

        let memo = Some(memo.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        // The balance sits on the 4-decimal grid, so the rounded amount never exceeds it.
        let amount = round_to(requested, AMOUNT_PLACES).max(AMOUNT_UNIT);
        wallet.debit(amount);
        let entry = LedgerEntry::confirmed(
            sender,
            recipient.to_string(),
            amount,
            memo,
            EntryOrigin::Wallet,
            timestamp,
            rng,
        );
        self.entries.push_front(entry.clone());
        info!(
            "TRANSFER - id={} {} -> {} amount={} (balance now {})",
            entry.id,
            entry.from,
            entry.to,
            entry.amount,
            wallet.balance()
        );
        Ok(entry)
    }

    /// Credit a settled faucet drip. The caller guarantees the wallet has an address.
    pub fn record_faucet_settlement(
        &mut self,
        wallet: &mut WalletState,
        amount: f64,
        timestamp: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> LedgerEntry {
        let recipient = wallet.address().unwrap_or_default().to_string();
        wallet.credit(amount);
        let entry = LedgerEntry::confirmed(
            FAUCET_SENDER.to_string(),
            recipient,
            amount,
            None,
            EntryOrigin::Faucet,
            timestamp,
            rng,
        );
        self.entries.push_front(entry.clone());
        debug!(
            "FAUCET - credited {} to {}; ledger size now {}",
            entry.amount,
            entry.to,
            self.entries.len()
        );
        entry
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<LedgerEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Entries sent or received by `address`, newest first.
    pub fn for_address(&self, address: &str) -> Vec<LedgerEntry> {
        self.entries
            .iter()
            .filter(|e| e.involves(address))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_volume(&self) -> f64 {
        round_to(self.entries.iter().map(|e| e.amount).sum(), AMOUNT_PLACES)
    }

    pub fn count_by_origin(&self, origin: EntryOrigin) -> usize {
        self.entries.iter().filter(|e| e.origin == origin).count()
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::{LedgerStore, TransferError};
    use crate::clock::{Clock, testing::FixedClock};
    use crate::ledger::{AMOUNT_UNIT, EntryOrigin, EntryStatus, FAUCET_SENDER};
    use crate::random::RngSource;
    use crate::wallet::WalletState;

    fn transfer(
        store: &mut LedgerStore,
        wallet: &mut WalletState,
        to: &str,
        amount: &str,
        memo: &str,
    ) -> Result<crate::ledger::LedgerEntry, TransferError> {
        store.record_transfer(
            wallet,
            to,
            amount,
            memo,
            FixedClock::epoch().now(),
            &mut RngSource::seeded(1),
        )
    }

    #[test]
    fn transfer_debits_and_prepends() {
        let mut store = LedgerStore::new();
        let mut wallet = WalletState::funded("0xME", 110.0);
        transfer(&mut store, &mut wallet, "0xOLD", "10", "").unwrap();
        assert_eq!(wallet.balance(), 100.0);

        let entry = transfer(&mut store, &mut wallet, "0xABC", "40", "memo").unwrap();
        assert_eq!(wallet.balance(), 60.0);
        assert_eq!(entry.amount, 40.0);
        assert_eq!(entry.origin, EntryOrigin::Wallet);
        assert_eq!(entry.status, EntryStatus::Confirmed);
        assert_eq!(entry.memo.as_deref(), Some("memo"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.iter().next(), Some(&entry));
    }

    #[test]
    fn overspend_is_rejected_without_mutation() {
        let mut store = LedgerStore::new();
        let mut wallet = WalletState::funded("0xME", 25.0);
        let err = transfer(&mut store, &mut wallet, "0xABC", "26", "").unwrap_err();
        assert_eq!(err, TransferError::InsufficientBalance);
        assert_eq!(wallet.balance(), 25.0);
        assert!(store.is_empty());
    }

    #[test]
    fn validation_order_first_failure_wins() {
        let mut store = LedgerStore::new();

        let mut no_wallet = WalletState::default();
        assert_eq!(
            transfer(&mut store, &mut no_wallet, "", "abc", ""),
            Err(TransferError::NoWallet)
        );

        let mut wallet = WalletState::funded("0xME", 10.0);
        for bad in ["abc", "", "-3", "0", "-0.00001", "NaN", "inf"] {
            assert_eq!(
                transfer(&mut store, &mut wallet, "", bad, ""),
                Err(TransferError::InvalidAmount),
                "amount {bad:?}"
            );
        }
        assert_eq!(
            transfer(&mut store, &mut wallet, "", "11", ""),
            Err(TransferError::InsufficientBalance)
        );
        assert_eq!(
            transfer(&mut store, &mut wallet, "  ", "5", ""),
            Err(TransferError::MissingRecipient)
        );
        assert_eq!(wallet.balance(), 10.0);
        assert!(store.is_empty());
    }

    #[test]
    fn whole_balance_can_be_spent() {
        let mut store = LedgerStore::new();
        let mut wallet = WalletState::funded("0xME", 10.0);
        transfer(&mut store, &mut wallet, "0xYOU", "10", "").unwrap();
        assert_eq!(wallet.balance(), 0.0);
        assert_eq!(
            transfer(&mut store, &mut wallet, "0xYOU", "0.0001", ""),
            Err(TransferError::InsufficientBalance)
        );
    }

    #[test]
    fn amount_above_balance_is_checked_before_rounding() {
        let mut store = LedgerStore::new();
        let mut wallet = WalletState::funded("0xME", 10.0);
        assert_eq!(
            transfer(&mut store, &mut wallet, "0xYOU", "10.00004", ""),
            Err(TransferError::InsufficientBalance)
        );
        assert_eq!(wallet.balance(), 10.0);
        assert!(store.is_empty());
    }

    #[test]
    fn tiny_positive_amount_is_charged_the_smallest_unit() {
        let mut store = LedgerStore::new();
        let mut wallet = WalletState::funded("0xME", 10.0);
        let entry = transfer(&mut store, &mut wallet, "0xYOU", "0.00001", "").unwrap();
        assert_eq!(entry.amount, AMOUNT_UNIT);
        assert_eq!(wallet.balance(), 9.9999);
    }

    #[test]
    fn visible_balance_stays_spendable() {
        let mut store = LedgerStore::new();
        let mut wallet = WalletState::funded("0xME", 100.0);
        transfer(&mut store, &mut wallet, "0xYOU", "99.9", "").unwrap();
        assert_eq!(wallet.balance(), 0.1);

        transfer(&mut store, &mut wallet, "0xYOU", "0.1", "").unwrap();
        assert_eq!(wallet.balance(), 0.0);
        assert_eq!(store.total_volume(), 100.0);
    }

    #[test]
    fn faucet_settlement_credits_from_system_sender() {
        let mut store = LedgerStore::new();
        let mut wallet = WalletState::funded("0xME", 0.0);
        let entry = store.record_faucet_settlement(
            &mut wallet,
            42.5,
            FixedClock::epoch().now(),
            &mut RngSource::seeded(3),
        );
        assert_eq!(wallet.balance(), 42.5);
        assert_eq!(entry.from, FAUCET_SENDER);
        assert_eq!(entry.to, "0xME");
        assert_eq!(entry.origin, EntryOrigin::Faucet);
        assert_eq!(store.count_by_origin(EntryOrigin::Faucet), 1);
    }

    #[test]
    fn filter_by_address() {
        let mut store = LedgerStore::new();
        let mut wallet = WalletState::funded("0xME", 50.0);
        transfer(&mut store, &mut wallet, "0xA", "1", "").unwrap();
        transfer(&mut store, &mut wallet, "0xB", "2", "").unwrap();
        transfer(&mut store, &mut wallet, "0xA", "3", "").unwrap();

        let to_a = store.for_address("0xa");
        assert_eq!(to_a.len(), 2);
        assert_eq!(to_a[0].amount, 3.0);
        assert_eq!(store.for_address("0xME").len(), 3);
        assert_eq!(store.total_volume(), 6.0);
    }
}
