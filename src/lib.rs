//! # Hold'em Advisor
//!
//! Monte Carlo equity estimation and a pot-odds decision rule for Texas
//! Hold'em spots.
//!
//! ## Features
//!
//! - **Card Model**: strict two-character tokens (`"Ah"`, `"Tc"`), a 52-card
//!   deck with dead-card removal and uniform sampling
//! - **Hand Evaluation**: best 5-of-7 ranking with total ordering, plus a
//!   single-pass bitmask evaluator for hot loops
//! - **Equity Simulation**: heads-up and multi-opponent trials, batched and
//!   run in parallel, reproducible under a fixed seed
//! - **Advice**: bet/call/raise/fold with sizing from equity and pot odds
//!
//! ## Quick Start
//!
//! ```no_run
//! use holdem_advisor::{solve, SolveRequest};
//!
//! let request = SolveRequest::new(["Ah", "Kh"], 40.0, 20.0);
//! let response = solve(&request)?;
//! println!("{} at {:.3} equity", response.advice, response.equity);
//! # Ok::<(), holdem_advisor::AdvisorError>(())
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: card and deck
//! - [`eval`]: hand categories and evaluators
//! - [`equity`]: Monte Carlo simulator and its configuration
//! - [`advisor`]: decision policy and the `solve` boundary
//! - [`quiz`]: random training scenarios and grading
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        solve(request)                           │
//! │  - parse card tokens       - validate amounts                   │
//! │  - pick trial budget       - round the response                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                 ┌─────────────┴─────────────┐
//!                 ▼                           ▼
//!        ┌─────────────────┐         ┌─────────────────┐
//!        │ EquitySimulator │         │ DecisionPolicy  │
//!        │ (rayon batches) │         │ (pot odds rule) │
//!        └─────────────────┘         └─────────────────┘
//!                 │
//!                 │ HandRanker trait
//!                 ▼
//!        ┌─────────────────┐
//!        │ Evaluator /     │
//!        │ PackedEvaluator │
//!        └─────────────────┘
//! ```

#![warn(missing_docs)]

/// Decision engine and the `solve` entry point.
pub mod advisor;

/// Cards, tokens and the deck.
pub mod cards;

/// Monte Carlo equity estimation.
pub mod equity;

/// Crate-wide error type.
pub mod error;

/// Hand ranking.
pub mod eval;

/// Training quiz scenarios.
pub mod quiz;

// Re-export commonly used types at crate root for convenience
pub use advisor::{solve, Advice, AdvisorConfig, DecisionPolicy, SolveRequest, SolveResponse, Solver};
pub use cards::{Card, Deck};
pub use equity::{EquityConfig, EquitySimulator};
pub use error::{AdvisorError, Result};
pub use eval::{Evaluator, HandCategory, HandRank, HandRanker, PackedEvaluator};
