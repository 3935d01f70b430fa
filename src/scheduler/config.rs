//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Students per block; the last block of a program takes the remainder.
    pub block_size: u32,
    /// Maximum kick-and-repair recursion depth. Bounds termination.
    pub max_repair_depth: u32,
    /// Full-run retries; each retry repeats the run with fresh shuffles and
    /// the loop stops early on a zero-missing result.
    pub max_attempts: u32,
    /// Hard cap on placement checks across the whole retry loop. The engine
    /// has no other timeout; tripping this abandons the run with a warning.
    pub max_iterations: u64,
    /// Term names created per block, in order.
    pub term_names: Vec<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            block_size: 20,
            max_repair_depth: 3,
            max_attempts: 1,
            max_iterations: 1_000_000,
            term_names: vec!["fall".to_string(), "winter".to_string()],
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the block size (at least 1).
    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Sets the kick-and-repair depth bound.
    pub fn with_max_repair_depth(mut self, depth: u32) -> Self {
        self.max_repair_depth = depth;
        self
    }

    /// Sets the retry attempt limit.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Sets the placement-check safety cap.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the term names created per block.
    pub fn with_term_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.term_names = names.into_iter().map(Into::into).collect();
        self
    }
}
