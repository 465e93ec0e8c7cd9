use std::collections::VecDeque;

use serde::Serialize;

/// How many lines the command log keeps.
pub const LOG_CAPACITY: usize = 8;

/// Fixed script cycled by the rotation timer.
pub const SCRIPT: [(&str, &str); 10] = [
    ("ops", "heartbeat ok across all relay regions"),
    ("sentinel", "no equivocation detected in last epoch"),
    ("oracle", "price feed refreshed from synthetic venue"),
    ("ops", "snapshot scheduler idle, next run queued"),
    ("sentinel", "peer scores recomputed, 0 bans issued"),
    ("oracle", "candle aggregator aligned to 5m boundary"),
    ("ops", "mempool pressure nominal"),
    ("relay", "gossip fan-out rebalanced to 8 peers"),
    ("sentinel", "clock skew within tolerance"),
    ("relay", "block propagation p95 under 400ms"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLogEntry {
    pub actor: String,
    pub message: String,
}

/// Scrolling display feed, oldest first.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: VecDeque<CommandLogEntry>,
    cursor: usize,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, actor: &str, message: impl Into<String>) {
        self.entries.push_back(CommandLogEntry {
            actor: actor.to_string(),
            message: message.into(),
        });
        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Append the next scripted line.
    pub fn rotate(&mut self) {
        let (actor, message) = SCRIPT[self.cursor % SCRIPT.len()];
        self.cursor = self.cursor.wrapping_add(1);
        self.push(actor, message);
    }

    pub fn entries(&self) -> Vec<CommandLogEntry> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandLog, LOG_CAPACITY, SCRIPT};

    #[test]
    fn keeps_the_latest_eight() {
        let mut log = CommandLog::new();
        for i in 0..20 {
            log.push("chain", format!("line {i}"));
        }
        let entries = log.entries();
        assert_eq!(entries.len(), LOG_CAPACITY);
        assert_eq!(entries[0].message, "line 12");
        assert_eq!(entries[7].message, "line 19");
    }

    #[test]
    fn rotation_cycles_through_the_script() {
        let mut log = CommandLog::new();
        for _ in 0..SCRIPT.len() + 1 {
            log.rotate();
        }
        let last = log.entries().pop().unwrap();
        assert_eq!(last.actor, SCRIPT[0].0);
        assert_eq!(last.message, SCRIPT[0].1);
    }
}
