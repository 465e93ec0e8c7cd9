use chrono::TimeDelta;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::blockchain::{BLOCK_WINDOW, BlockRecord, BlockWindow};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::console::{CommandLog, CommandLogEntry};
use crate::faucet::{FaucetController, FaucetError, FaucetRecord};
use crate::ledger::{LedgerEntry, LedgerStore, TransferError};
use crate::market::{CANDLE_WINDOW, CandleRecord, CandleWindow};
use crate::random::{RandomSource, RngSource};
use crate::stats::{self, MarketStats, NetworkStats};
use crate::wallet::{LinkError, WalletState};

/// Owns every store of the observatory. All mutation goes through these
/// methods; each call runs to completion under the caller's exclusive borrow.
pub struct Engine {
    config: EngineConfig,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
    blocks: BlockWindow,
    candles: CandleWindow,
    ledger: LedgerStore,
    wallet: WalletState,
    faucet: FaucetController,
    console: CommandLog,
}

impl Engine {
    /// Empty engine with injected randomness and time.
    pub fn new(config: EngineConfig, rng: Box<dyn RandomSource>, clock: Box<dyn Clock>) -> Self {
        Self {
            blocks: BlockWindow::new(config.genesis_height),
            candles: CandleWindow::new(config.sellers_floor),
            ledger: LedgerStore::new(),
            wallet: WalletState::default(),
            faucet: FaucetController::new(),
            console: CommandLog::new(),
            config,
            rng,
            clock,
        }
    }

    /// Seeded engine on the system clock, ready to serve.
    pub fn from_config(config: EngineConfig) -> Self {
        let rng: Box<dyn RandomSource> = match config.rng_seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        };
        let mut engine = Self::new(config, rng, Box::new(SystemClock));
        engine.seed();
        engine
    }

    /// Fill the block ring and candle window so the first read is not empty.
    pub fn seed(&mut self) {
        let now = self.clock.now();
        let spacing = TimeDelta::from_std(self.config.block_period).unwrap_or(TimeDelta::zero());
        self.blocks.seed(BLOCK_WINDOW, now, spacing, &mut *self.rng);
        self.candles.seed(CANDLE_WINDOW, now, &mut *self.rng);
        self.console.rotate();
        debug!(
            "ENGINE - seeded {} blocks (tip #{}) and {} candles",
            self.blocks.len(),
            self.blocks.latest().map(|b| b.height).unwrap_or_default(),
            self.candles.len()
        );
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /* ---------- scheduled generation ---------- */

    pub fn produce_block(&mut self) -> BlockRecord {
        let now = self.clock.now();
        let block = self.blocks.advance(now, &mut *self.rng).clone();
        debug!(
            "BLOCK - #{} by {} ({} tx, {} tps); ring size {}",
            block.height,
            block.producer,
            block.tx_count,
            block.throughput,
            self.blocks.len()
        );
        self.console.push(
            "chain",
            format!("block #{} sealed by {}", block.height, block.producer),
        );
        block
    }

    pub fn produce_candle(&mut self) -> CandleRecord {
        let now = self.clock.now();
        let candle = self.candles.advance(now, &mut *self.rng).clone();
        debug!(
            "CANDLE - o={} h={} l={} c={} v={}; window size {}",
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume,
            self.candles.len()
        );
        self.console
            .push("market", format!("candle closed at {:.4}", candle.close));
        candle
    }

    pub fn rotate_log(&mut self) {
        self.console.rotate();
    }

    /* ---------- commands ---------- */

    pub fn generate_wallet(&mut self) -> WalletState {
        let address = self
            .wallet
            .generate(self.config.wallet_seed_balance, &mut *self.rng)
            .to_string();
        info!("WALLET - generated {address}");
        self.console
            .push("wallet", format!("wallet {} generated", short(&address)));
        self.wallet.clone()
    }

    pub fn link_external_wallet(&mut self, address: Option<&str>) -> Result<WalletState, LinkError> {
        match self.wallet.link(address, self.config.wallet_seed_balance) {
            Ok(linked) => {
                let linked = linked.to_string();
                info!("WALLET - linked external {linked}");
                self.console
                    .push("wallet", format!("external wallet {} linked", short(&linked)));
                Ok(self.wallet.clone())
            }
            Err(err) => {
                warn!("WALLET - external link failed: {err}");
                Err(err)
            }
        }
    }

    pub fn submit_transfer(
        &mut self,
        recipient: &str,
        amount: &str,
        memo: &str,
    ) -> Result<LedgerEntry, TransferError> {
        let now = self.clock.now();
        let result =
            self.ledger
                .record_transfer(&mut self.wallet, recipient, amount, memo, now, &mut *self.rng);
        match &result {
            Ok(entry) => self.console.push(
                "wallet",
                format!("sent {} to {}", entry.amount, short(&entry.to)),
            ),
            Err(err) => warn!("TRANSFER - rejected: {err}"),
        }
        result
    }

    /// Accept a drip; the caller schedules `settle_faucet` after the delay.
    pub fn request_faucet_drip(&mut self) -> Result<FaucetRecord, FaucetError> {
        let now = self.clock.now();
        let record = self.faucet.request_drip(&self.wallet, now, &mut *self.rng)?;
        self.console.push(
            "faucet",
            format!("drip of {} queued for {}", record.amount, short(&record.recipient)),
        );
        Ok(record)
    }

    /// Complete the in-flight drip and credit the wallet.
    pub fn settle_faucet(&mut self, id: Uuid) -> Option<LedgerEntry> {
        let record = self.faucet.complete(id)?;
        let now = self.clock.now();
        let entry =
            self.ledger
                .record_faucet_settlement(&mut self.wallet, record.amount, now, &mut *self.rng);
        info!("FAUCET - drip {} settled, balance now {}", id, self.wallet.balance());
        self.console
            .push("faucet", format!("drip of {} settled", record.amount));
        Some(entry)
    }

    /* ---------- queries ---------- */

    /// Newest first.
    pub fn blocks(&self) -> Vec<BlockRecord> {
        self.blocks.to_vec()
    }

    /// Oldest first.
    pub fn candles(&self) -> Vec<CandleRecord> {
        self.candles.to_vec()
    }

    /// Newest first, optionally restricted to entries touching `address`.
    pub fn ledger(&self, address: Option<&str>) -> Vec<LedgerEntry> {
        match address {
            Some(address) => self.ledger.for_address(address),
            None => self.ledger.to_vec(),
        }
    }

    pub fn faucet_history(&self) -> Vec<FaucetRecord> {
        self.faucet.history()
    }

    pub fn faucet_in_flight(&self) -> bool {
        self.faucet.is_in_flight()
    }

    pub fn command_log(&self) -> Vec<CommandLogEntry> {
        self.console.entries()
    }

    pub fn wallet(&self) -> WalletState {
        self.wallet.clone()
    }

    pub fn network_stats(&self) -> NetworkStats {
        stats::network_stats(&self.blocks, &self.ledger)
    }

    pub fn market_stats(&self) -> MarketStats {
        stats::market_stats(&self.candles)
    }
}

/// Abbreviated address for log lines.
fn short(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 12 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}
