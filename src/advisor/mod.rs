//! Decision engine and the `solve` entry point.
//!
//! - `policy`: pot odds and the fixed bet/call/raise/fold rule
//! - `solver`: request/response types, configuration and `solve`

pub mod policy;
pub mod solver;

pub use policy::{pot_odds, Advice, Decision, DecisionPolicy};
pub use solver::{round_to, solve, AdvisorConfig, SolveRequest, SolveResponse, Solver};
