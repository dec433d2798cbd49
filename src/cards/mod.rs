//! Card model.
//!
//! - `card`: a single card, token parsing and display
//! - `deck`: the 52-card deck, dead-card removal and sampling

pub mod card;
pub mod deck;

pub use card::{unique_mask, Card};
pub use deck::{Deck, FULL_DECK};
