use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::random::{RandomSource, random_uuid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Confirmed,
    #[allow(dead_code)]
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrigin {
    Wallet,
    Faucet,
}

/// An immutable ledger record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub memo: Option<String>,
    pub status: EntryStatus,
    pub timestamp: DateTime<Utc>,
    pub origin: EntryOrigin,
}

impl LedgerEntry {
    /// Build a confirmed entry with a fresh identifier and content hash.
    pub fn confirmed(
        from: String,
        to: String,
        amount: f64,
        memo: Option<String>,
        origin: EntryOrigin,
        timestamp: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let mut entry = Self {
            id: random_uuid(rng),
            hash: String::new(),
            from,
            to,
            amount,
            memo,
            status: EntryStatus::Confirmed,
            timestamp,
            origin,
        };
        let nonce = rng.hex_string(16);
        entry.hash = entry.compute_hash(&nonce);
        entry
    }

    /// SHA-256 over the entry fields (excluding `hash`) and a salt.
    fn compute_hash(&self, nonce: &str) -> String {
        let preimage = format!(
            "{}:{}:{}:{}:{}:{}:{}",
            self.id,
            self.from,
            self.to,
            self.amount,
            self.memo.as_deref().unwrap_or_default(),
            self.timestamp.timestamp_millis(),
            nonce
        );
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// True when `address` is the sender or the recipient.
    pub fn involves(&self, address: &str) -> bool {
        self.from.eq_ignore_ascii_case(address) || self.to.eq_ignore_ascii_case(address)
    }
}
