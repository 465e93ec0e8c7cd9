pub mod model;
pub mod store;

pub use model::{EntryOrigin, EntryStatus, LedgerEntry};
pub use store::{LedgerStore, TransferError};

/// Sender recorded on every faucet settlement.
pub const FAUCET_SENDER: &str = "faucet.observatory";

/// Amount precision in decimal places.
pub const AMOUNT_PLACES: i32 = 4;

/// Smallest amount the ledger records; finer positive amounts are charged this.
pub const AMOUNT_UNIT: f64 = 0.0001;
