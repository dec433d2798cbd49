//! Comparable hand strength.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Hand categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    /// All categories, weakest first.
    pub const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    /// Numeric value 0-8.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Category for a numeric value 0-8.
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Number of kickers a hand of this category carries.
    pub fn kicker_count(&self) -> usize {
        match self {
            HandCategory::StraightFlush | HandCategory::Straight => 1,
            HandCategory::FourOfAKind | HandCategory::FullHouse => 2,
            HandCategory::TwoPair => 3,
            HandCategory::ThreeOfAKind => 3,
            HandCategory::OnePair => 4,
            HandCategory::Flush | HandCategory::HighCard => 5,
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category plus tie-breaking kicker ranks (2-14), most significant first.
///
/// Ordering compares the category, then the kickers pairwise. Two ranks of
/// the same category always carry the same number of kickers.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandRank {
    category: HandCategory,
    kickers: [u8; 5],
    len: u8,
}

impl HandRank {
    /// Build a rank from caller-supplied kickers.
    ///
    /// Fails unless there are exactly as many kickers as the category uses
    /// and every kicker is a rank value 2-14.
    pub fn try_new(category: HandCategory, kickers: &[u8]) -> Result<Self> {
        if kickers.len() != category.kicker_count() {
            return Err(AdvisorError::InvalidRequest(format!(
                "{} takes {} kickers, got {}",
                category,
                category.kicker_count(),
                kickers.len()
            )));
        }
        if let Some(bad) = kickers.iter().find(|k| !(2..=14).contains(*k)) {
            return Err(AdvisorError::InvalidRequest(format!("kicker {} is not a rank", bad)));
        }
        Ok(Self::new(category, kickers))
    }

    /// Build a rank; `kickers` must match the category's kicker count.
    pub(crate) fn new(category: HandCategory, kickers: &[u8]) -> Self {
        debug_assert_eq!(kickers.len(), category.kicker_count(), "{category} kickers: {kickers:?}");
        let mut slots = [0u8; 5];
        let len = kickers.len().min(5);
        slots[..len].copy_from_slice(&kickers[..len]);
        Self {
            category,
            kickers: slots,
            len: len as u8,
        }
    }

    /// Get the hand category.
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// Tie-breaking ranks, most significant first.
    pub fn kickers(&self) -> &[u8] {
        &self.kickers[..self.len as usize]
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.category.cmp(&other.category) {
            Ordering::Equal => {}
            decided => return decided,
        }
        for (a, b) in self.kickers().iter().zip(other.kickers()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        self.len.cmp(&other.len)
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.kickers())
    }
}

impl fmt::Debug for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandRank({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order() {
        for pair in HandCategory::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(HandCategory::from_value(6), Some(HandCategory::FullHouse));
        assert_eq!(HandCategory::from_value(9), None);
        assert_eq!(HandCategory::StraightFlush.value(), 8);
    }

    #[test]
    fn test_category_beats_kickers() {
        let weak_quads = HandRank::new(HandCategory::FourOfAKind, &[2, 3]);
        let best_boat = HandRank::new(HandCategory::FullHouse, &[14, 13]);
        assert!(weak_quads > best_boat);
    }

    #[test]
    fn test_kickers_compare_in_order() {
        let a = HandRank::new(HandCategory::OnePair, &[10, 14, 5, 3]);
        let b = HandRank::new(HandCategory::OnePair, &[10, 13, 12, 11]);
        let c = HandRank::new(HandCategory::OnePair, &[10, 14, 5, 3]);
        assert!(a > b);
        assert_eq!(a.cmp(&c), Ordering::Equal);
        assert_eq!(a, c);
    }

    #[test]
    fn test_checked_constructor() {
        let rank = HandRank::try_new(HandCategory::TwoPair, &[9, 4, 14]).unwrap();
        assert_eq!(rank, HandRank::new(HandCategory::TwoPair, &[9, 4, 14]));

        assert!(HandRank::try_new(HandCategory::Flush, &[14, 10, 8]).is_err());
        assert!(HandRank::try_new(HandCategory::Straight, &[]).is_err());
        assert!(HandRank::try_new(HandCategory::HighCard, &[14, 13, 12, 11, 9, 2]).is_err());
        assert!(HandRank::try_new(HandCategory::OnePair, &[1, 14, 13, 12]).is_err());
        assert!(HandRank::try_new(HandCategory::Straight, &[15]).is_err());
    }

    #[test]
    fn test_display() {
        let rank = HandRank::new(HandCategory::Straight, &[5]);
        assert_eq!(rank.to_string(), "Straight [5]");
        assert_eq!(rank.kickers(), &[5]);
    }
}
