//! Monte Carlo equity estimation.
//!
//! - `config`: trial budgets, batching, threads and seeding
//! - `simulator`: spot validation, dealing, and the batched trial loop

pub mod config;
pub mod simulator;

pub use config::{EquityConfig, DEFAULT_HEADS_UP_TRIALS, DEFAULT_MULTIWAY_TRIALS};
pub use simulator::{Deal, EquitySimulator, Spot, Tally};
