use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::random::{RandomSource, random_uuid, round_to};
use crate::wallet::WalletState;

/// How many drips the faucet history keeps.
pub const FAUCET_HISTORY: usize = 5;

/// Whole-unit range of a single drip (fractional noise is added on top).
pub const DRIP_RANGE: (i64, i64) = (24, 96);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FaucetStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaucetRecord {
    pub id: Uuid,
    pub amount: f64,
    pub recipient: String,
    pub timestamp: DateTime<Utc>,
    pub status: FaucetStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaucetError {
    #[error("generate or link a wallet before requesting a drip")]
    NoWallet,
    /// A drip is already in flight; the request is dropped, not queued.
    #[error("a drip is already pending")]
    Pending,
}

/// Single-flight drip workflow: at most one pending drip at a time.
#[derive(Debug, Default)]
pub struct FaucetController {
    history: VecDeque<FaucetRecord>,
    in_flight: Option<Uuid>,
}

impl FaucetController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a drip for the wallet and record it as pending.
    pub fn request_drip(
        &mut self,
        wallet: &WalletState,
        timestamp: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Result<FaucetRecord, FaucetError> {
        let recipient = wallet.address().ok_or(FaucetError::NoWallet)?;
        if let Some(id) = self.in_flight {
            debug!("FAUCET - drip {id} still pending, request ignored");
            return Err(FaucetError::Pending);
        }

        let amount = round_to(
            rng.int_in(DRIP_RANGE.0, DRIP_RANGE.1) as f64 + rng.unit(),
            4,
        );
        let record = FaucetRecord {
            id: random_uuid(rng),
            amount,
            recipient: recipient.to_string(),
            timestamp,
            status: FaucetStatus::Pending,
        };

        self.in_flight = Some(record.id);
        self.history.push_front(record.clone());
        self.history.truncate(FAUCET_HISTORY);
        info!("FAUCET - drip {} of {} accepted for {}", record.id, amount, record.recipient);
        Ok(record)
    }

    /// Transition the in-flight drip to completed and clear the guard.
    /// Returns `None` if `id` is not the drip currently in flight.
    pub fn complete(&mut self, id: Uuid) -> Option<FaucetRecord> {
        if self.in_flight != Some(id) {
            return None;
        }
        self.in_flight = None;

        let record = self.history.iter_mut().find(|r| r.id == id)?;
        record.status = FaucetStatus::Completed;
        Some(record.clone())
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Newest first.
    pub fn history(&self) -> Vec<FaucetRecord> {
        self.history.iter().cloned().collect()
    }
}
