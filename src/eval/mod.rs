//! Poker hand evaluation.
//!
//! - `hand_rank`: categories and the comparable `HandRank`
//! - `evaluator`: reference evaluator (`rank5`, `best_rank`) and the
//!   `HandRanker` trait shared by all evaluators
//! - `packed`: single-pass bitmask evaluator used for multi-opponent runs

pub mod evaluator;
pub mod hand_rank;
pub mod packed;

pub use evaluator::{Evaluator, HandRanker, SEVEN_CHOOSE_FIVE};
pub use hand_rank::{HandCategory, HandRank};
pub use packed::{PackedEvaluator, PackedRank};
