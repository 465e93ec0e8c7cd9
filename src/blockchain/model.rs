use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};

use super::{BLOCK_WINDOW, BlockGenerator, BlockRecord};
use crate::random::RandomSource;

/// Ring of the most recent blocks, newest first.
#[derive(Debug)]
pub struct BlockWindow {
    blocks: VecDeque<BlockRecord>,
    genesis_height: u64,
}

impl BlockWindow {
    pub fn new(genesis_height: u64) -> Self {
        Self {
            blocks: VecDeque::with_capacity(BLOCK_WINDOW + 1),
            genesis_height,
        }
    }

    /// Fill the ring with `count` consecutive blocks starting at the genesis
    /// height, spaced `spacing` apart and ending at `now`.
    pub fn seed(
        &mut self,
        count: usize,
        now: DateTime<Utc>,
        spacing: TimeDelta,
        rng: &mut dyn RandomSource,
    ) {
        for i in 0..count {
            let back = (count - 1 - i) as i32;
            self.advance(now - spacing * back, rng);
        }
    }

    /// Produce the next block (latest height + 1) and push it into the ring.
    pub fn advance(&mut self, timestamp: DateTime<Utc>, rng: &mut dyn RandomSource) -> &BlockRecord {
        let height = self
            .latest()
            .map(|b| b.height + 1)
            .unwrap_or(self.genesis_height);
        let block = BlockGenerator::produce(height, timestamp, rng);
        self.blocks.push_front(block);
        self.blocks.truncate(BLOCK_WINDOW);
        &self.blocks[0]
    }

    pub fn latest(&self) -> Option<&BlockRecord> {
        self.blocks.front()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &BlockRecord> {
        self.blocks.iter()
    }

    pub fn to_vec(&self) -> Vec<BlockRecord> {
        self.blocks.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}
