//! Card representation.
//!
//! A card is stored as a single index 0-51 (`(rank - 2) * 4 + suit`) so that
//! sets of cards fit in a `u64` bitmask. Ranks are exposed as poker values
//! 2-14 (ace high).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Lowest rank value (deuce).
pub const RANK_2: u8 = 2;
/// Ten.
pub const RANK_T: u8 = 10;
/// Jack.
pub const RANK_J: u8 = 11;
/// Queen.
pub const RANK_Q: u8 = 12;
/// King.
pub const RANK_K: u8 = 13;
/// Highest rank value (ace).
pub const RANK_A: u8 = 14;

/// Suit indices (0-3).
pub const SUIT_SPADES: u8 = 0;
/// Hearts.
pub const SUIT_HEARTS: u8 = 1;
/// Diamonds.
pub const SUIT_DIAMONDS: u8 = 2;
/// Clubs.
pub const SUIT_CLUBS: u8 = 3;

/// Rank symbols, indexed by `rank - 2`.
pub const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit symbols, indexed by suit.
pub const SUIT_CHARS: [char; 4] = ['s', 'h', 'd', 'c'];

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    id: u8,
}

impl Card {
    /// Create a card from a rank (2-14) and suit (0-3), rejecting anything
    /// outside those ranges.
    pub fn try_new(rank: u8, suit: u8) -> Result<Self> {
        if !(RANK_2..=RANK_A).contains(&rank) || suit > SUIT_CLUBS {
            return Err(AdvisorError::InvalidCard(format!("rank {} suit {}", rank, suit)));
        }
        Ok(Self::new(rank, suit))
    }

    /// Unchecked constructor for ranks and suits already known to be valid.
    #[inline]
    pub(crate) fn new(rank: u8, suit: u8) -> Self {
        debug_assert!((RANK_2..=RANK_A).contains(&rank), "rank must be 2-14");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: (rank - RANK_2) * 4 + suit }
    }

    /// Create a card from its index (0-51).
    #[inline]
    pub(crate) const fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    /// Parse a two-character token such as `"Ah"` or `"Td"`.
    ///
    /// The rank symbol must be one of `23456789TJQKA` and the suit one of
    /// `shdc`; anything else is rejected.
    pub fn parse(token: &str) -> Result<Self> {
        let invalid = || AdvisorError::InvalidCard(token.to_string());

        let mut chars = token.chars();
        let (r, s) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => return Err(invalid()),
        };

        let rank = RANK_CHARS.iter().position(|&c| c == r).ok_or_else(invalid)?;
        let suit = SUIT_CHARS.iter().position(|&c| c == s).ok_or_else(invalid)?;

        Ok(Self::new(rank as u8 + RANK_2, suit as u8))
    }

    /// Parse every token in a list, failing on the first bad one.
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Self>> {
        tokens.iter().map(|t| Self::parse(t.as_ref())).collect()
    }

    /// The card's index (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// The card's rank value (2-14).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4 + RANK_2
    }

    /// The card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Single-bit mask for this card.
    #[inline]
    pub fn mask(&self) -> u64 {
        1u64 << self.id
    }

    /// Rank symbol.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[(self.rank() - RANK_2) as usize]
    }

    /// Suit symbol.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

impl FromStr for Card {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Card {
    type Error = AdvisorError;

    fn try_from(token: String) -> Result<Self> {
        Self::parse(&token)
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Bitmask of a set of cards, failing if any card repeats.
pub fn unique_mask(cards: &[Card]) -> Result<u64> {
    let mut mask = 0u64;
    for card in cards {
        if mask & card.mask() != 0 {
            return Err(AdvisorError::DuplicateCard(*card));
        }
        mask |= card.mask();
    }
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let ace_spades = Card::new(RANK_A, SUIT_SPADES);
        assert_eq!(ace_spades.rank(), 14);
        assert_eq!(ace_spades.suit(), SUIT_SPADES);
        assert_eq!(ace_spades.to_string(), "As");

        let two_clubs = Card::new(RANK_2, SUIT_CLUBS);
        assert_eq!(two_clubs.rank(), 2);
        assert_eq!(two_clubs.to_string(), "2c");
        assert_eq!(two_clubs.id(), 3);
    }

    #[test]
    fn test_checked_constructor() {
        assert_eq!(Card::try_new(RANK_A, SUIT_HEARTS).unwrap().to_string(), "Ah");
        assert_eq!(Card::try_new(RANK_2, SUIT_CLUBS).unwrap().id(), 3);

        for (rank, suit) in [(1, 0), (0, 0), (15, 0), (RANK_A, 4), (RANK_2, 255), (255, 0)] {
            assert!(
                matches!(Card::try_new(rank, suit), Err(AdvisorError::InvalidCard(_))),
                "rank {rank} suit {suit}"
            );
        }
    }

    #[test]
    fn test_card_parsing() {
        assert_eq!(Card::parse("Ah").unwrap(), Card::new(RANK_A, SUIT_HEARTS));
        assert_eq!(Card::parse("Td").unwrap().rank(), RANK_T);
        assert_eq!(Card::parse("2c").unwrap().to_string(), "2c");
        assert_eq!("Kh".parse::<Card>().unwrap().rank(), RANK_K);

        for bad in ["", "A", "Ahh", "1h", "Ax", "ah", "AH", "10h"] {
            assert_eq!(
                Card::parse(bad),
                Err(AdvisorError::InvalidCard(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_every_token_round_trips() {
        for id in 0..52 {
            let card = Card::from_id(id);
            assert_eq!(Card::parse(&card.to_string()).unwrap(), card);
        }
    }

    #[test]
    fn test_serde_as_token() {
        let card = Card::parse("Qs").unwrap();
        assert_eq!(serde_json::to_string(&card).unwrap(), "\"Qs\"");
        let back: Card = serde_json::from_str("\"Qs\"").unwrap();
        assert_eq!(back, card);
        assert!(serde_json::from_str::<Card>("\"Zz\"").is_err());
    }

    #[test]
    fn test_unique_mask() {
        let cards = Card::parse_all(&["Ah", "Kh", "2c"]).unwrap();
        assert_eq!(unique_mask(&cards).unwrap().count_ones(), 3);

        let dup = Card::parse_all(&["Ah", "Kh", "Ah"]).unwrap();
        assert_eq!(unique_mask(&dup), Err(AdvisorError::DuplicateCard(dup[0])));
    }
}
