//! Configuration options for the equity simulator.

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Default trial budget against a single opponent.
pub const DEFAULT_HEADS_UP_TRIALS: u64 = 2500;

/// Default trial budget against two or more opponents.
pub const DEFAULT_MULTIWAY_TRIALS: u64 = 3000;

/// Default number of trials per independent batch.
pub const DEFAULT_BATCH_SIZE: u64 = 500;

/// Configuration for the Monte Carlo equity simulator.
///
/// # Example
/// ```
/// use holdem_advisor::equity::EquityConfig;
///
/// let config = EquityConfig::default().with_seed(7).with_threads(1);
/// assert_eq!(config.trials_for(1), 2500);
/// assert_eq!(config.trials_for(3), 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityConfig {
    /// Trials to run against one opponent.
    pub heads_up_trials: u64,

    /// Trials to run against two or more opponents.
    pub multiway_trials: u64,

    /// Trials per batch.
    ///
    /// Each batch draws from its own random stream seeded from the master
    /// source, so the estimate for a given seed does not depend on how many
    /// threads run the batches.
    pub batch_size: u64,

    /// Number of threads to run batches on.
    ///
    /// Set to 0 or 1 for single-threaded execution.
    /// Set to `None` to use the global rayon pool.
    pub num_threads: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// If `None`, every run draws a fresh entropy seed.
    pub seed: Option<u64>,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            heads_up_trials: DEFAULT_HEADS_UP_TRIALS,
            multiway_trials: DEFAULT_MULTIWAY_TRIALS,
            batch_size: DEFAULT_BATCH_SIZE,
            num_threads: None,
            seed: None,
        }
    }
}

impl EquityConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trial budget for a given number of opponents.
    pub fn trials_for(&self, opponents: usize) -> u64 {
        if opponents > 1 {
            self.multiway_trials
        } else {
            self.heads_up_trials
        }
    }

    /// Builder method: use the same trial budget for every opponent count.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.heads_up_trials = trials;
        self.multiway_trials = trials;
        self
    }

    /// Builder method: set the batch size.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.heads_up_trials == 0 || self.multiway_trials == 0 {
            return Err(AdvisorError::Config("trial counts must be positive".into()));
        }
        if self.batch_size == 0 {
            return Err(AdvisorError::Config("batch_size must be positive".into()));
        }
        Ok(())
    }
}
