pub mod scheduler;
pub mod state;

use std::sync::{Arc, Mutex, MutexGuard};

pub use scheduler::Scheduler;
pub use state::Engine;

/// Engine shared between the scheduler tasks and request handlers.
pub type SharedEngine = Arc<Mutex<Engine>>;

pub fn shared(engine: Engine) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}

pub fn lock(engine: &SharedEngine) -> MutexGuard<'_, Engine> {
    engine.lock().expect("engine mutex poisoned")
}
