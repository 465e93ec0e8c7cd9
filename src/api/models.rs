use std::fmt::Display;
use std::sync::MutexGuard;

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::blockchain::BlockRecord;
use crate::console::CommandLogEntry;
use crate::engine::{Engine, Scheduler, lock};
use crate::faucet::FaucetRecord;
use crate::ledger::LedgerEntry;
use crate::market::CandleRecord;
use crate::wallet::WalletState;

/// Shared application state: the scheduler owns the engine and its timers.
pub struct AppState {
    pub scheduler: Scheduler,
}

impl AppState {
    pub fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }

    pub fn engine(&self) -> MutexGuard<'_, Engine> {
        lock(self.scheduler.engine())
    }
}

/// Rejection body: a stable code plus the user-facing message.
#[derive(Serialize)]
pub struct ErrorResponse<E> {
    pub error: E,
    pub message: String,
}

pub fn rejection<E: Serialize + Display>(err: E) -> HttpResponse {
    let message = err.to_string();
    HttpResponse::BadRequest().json(ErrorResponse {
        error: err,
        message,
    })
}

/* ---------- Telemetry API Models ---------- */

#[derive(Serialize)]
pub struct BlocksResponse {
    pub length: usize,
    pub blocks: Vec<BlockRecord>, // newest first
}

#[derive(Serialize)]
pub struct CandlesResponse {
    pub length: usize,
    pub candles: Vec<CandleRecord>, // oldest first
}

#[derive(Serialize)]
pub struct LogResponse {
    pub entries: Vec<CommandLogEntry>,
}

/* ---------- Ledger API Models ---------- */

#[derive(Deserialize)]
pub struct LedgerQuery {
    pub address: Option<String>,
}

#[derive(Serialize)]
pub struct LedgerResponse {
    pub size: usize,
    pub entries: Vec<LedgerEntry>,
}

/// Amount as typed by the user, or a plain JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Text(String),
    Number(f64),
}

impl AmountInput {
    pub fn as_text(&self) -> String {
        match self {
            AmountInput::Text(s) => s.clone(),
            AmountInput::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct TransferRequest {
    pub recipient: String,
    pub amount: AmountInput,
    #[serde(default)]
    pub memo: Option<String>,
}

#[derive(Serialize)]
pub struct TransferResponse {
    pub entry: LedgerEntry,
    pub balance: f64,
}

/* ---------- Faucet API Models ---------- */

#[derive(Serialize)]
pub struct DripResponse {
    pub accepted: bool,
    pub ignored: bool,
    pub record: Option<FaucetRecord>,
}

#[derive(Serialize)]
pub struct FaucetHistoryResponse {
    pub in_flight: bool,
    pub history: Vec<FaucetRecord>, // newest first
}

/* ---------- Wallet API Models ---------- */

#[derive(Serialize)]
pub struct WalletResponse {
    pub wallet: WalletState,
}

#[derive(Deserialize)]
pub struct LinkRequest {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Deserialize, Serialize)]
pub struct CopyRequest {
    pub address: String,
}

#[derive(Serialize)]
pub struct CopyResponse {
    pub copied: String,
}
