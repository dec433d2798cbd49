//! Error types shared by every component of the advisor.
//!
//! Every error here describes malformed input or a caller mistake. Nothing is
//! retried internally; callers map each kind to their own failure response.

use thiserror::Error;

use crate::cards::Card;

/// Errors raised by card parsing, deck handling, simulation and `solve`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisorError {
    /// A card token was not a rank symbol followed by a suit symbol.
    #[error("invalid card token {0:?}")]
    InvalidCard(String),

    /// The same card appeared twice in a set that must be unique.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),

    /// Tried to remove a card the deck no longer holds.
    #[error("card {0} is not in the deck")]
    CardNotInDeck(Card),

    /// A draw asked for more cards than remain.
    #[error("cannot draw {requested} cards, only {available} remain")]
    InsufficientCards {
        /// Number of cards requested.
        requested: usize,
        /// Number of cards left in the deck.
        available: usize,
    },

    /// A request field was missing or out of range.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration could not be read or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AdvisorError>;
