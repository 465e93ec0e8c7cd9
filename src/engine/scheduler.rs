use std::sync::Mutex;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{Engine, SharedEngine, lock};
use crate::faucet::{FaucetError, FaucetRecord};

/// Drives the engine: three independent periodic generators plus the
/// deferred faucet settlements. Dropping the scheduler (or calling
/// `shutdown`) cancels every pending task; none of them touches the engine
/// afterwards.
pub struct Scheduler {
    engine: SharedEngine,
    settle_delay: Duration,
    cancel: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Scheduler {
    /// Spawn the periodic timers. Must be called from within a tokio runtime.
    pub fn start(engine: SharedEngine) -> Self {
        let config = lock(&engine).config().clone();
        let scheduler = Self {
            engine,
            settle_delay: config.faucet_settle_delay,
            cancel: CancellationToken::new(),
            tasks: Mutex::new(Vec::new()),
        };

        scheduler.spawn_periodic("log", config.log_rotate_period, Engine::rotate_log);
        scheduler.spawn_periodic("blocks", config.block_period, |e| {
            e.produce_block();
        });
        scheduler.spawn_periodic("candles", config.candle_period, |e| {
            e.produce_candle();
        });
        info!(
            "SCHEDULER - started (log {:?}, blocks {:?}, candles {:?})",
            config.log_rotate_period, config.block_period, config.candle_period
        );
        scheduler
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut tasks = self.tasks.lock().expect("mutex poisoned");
        tasks.retain(|h| !h.is_finished());
        tasks.push(handle);
    }

    fn spawn_periodic(&self, name: &'static str, period: Duration, tick: fn(&mut Engine)) {
        let engine = self.engine.clone();
        let cancel = self.cancel.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => run_tick(&engine, &cancel, tick),
                }
            }
            debug!("SCHEDULER - {name} timer stopped");
        });
        self.track(handle);
    }

    /// Accept a drip and schedule its settlement after the fixed delay.
    /// While a drip is pending further requests return `FaucetError::Pending`.
    pub fn request_faucet_drip(&self) -> Result<FaucetRecord, FaucetError> {
        let record = lock(&self.engine).request_faucet_drip()?;

        let engine = self.engine.clone();
        let cancel = self.cancel.clone();
        let delay = self.settle_delay;
        let id = record.id;
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => warn!("FAUCET - settlement of drip {id} cancelled"),
                _ = time::sleep(delay) => settle(&engine, &cancel, id),
            }
        });
        self.track(handle);
        Ok(record)
    }

    /// Cancel all timers and pending settlements.
    pub fn shutdown(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        let mut tasks = self.tasks.lock().expect("mutex poisoned");
        for handle in tasks.drain(..) {
            handle.abort();
        }
        info!("SCHEDULER - shut down");
    }

    #[cfg(test)]
    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_tick(engine: &SharedEngine, cancel: &CancellationToken, tick: fn(&mut Engine)) {
    let mut engine = lock(engine);
    if cancel.is_cancelled() {
        return;
    }
    tick(&mut engine);
}

fn settle(engine: &SharedEngine, cancel: &CancellationToken, id: Uuid) {
    let mut engine = lock(engine);
    if cancel.is_cancelled() {
        return;
    }
    if engine.settle_faucet(id).is_none() {
        warn!("FAUCET - drip {id} was no longer in flight");
    }
}
