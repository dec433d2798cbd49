//! Fast evaluator for multi-opponent simulation.
//!
//! Scores 5-7 cards in one pass over rank counts and per-suit bitmasks
//! instead of enumerating five-card subsets. The result packs into a `u32`:
//! category (4 bits) | kicker1 (4 bits) | kicker2 (4 bits) | ...
//! so comparing two values compares the hands.

use std::fmt;

use super::evaluator::HandRanker;
use super::hand_rank::{HandCategory, HandRank};
use crate::cards::Card;
use crate::error::{AdvisorError, Result};

/// Rank bit for the ace (rank 14 sits at bit 12).
const ACE_BIT: u16 = 1 << 12;

/// A hand strength packed into a single integer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedRank(u32);

impl PackedRank {
    fn new(category: HandCategory, kickers: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, &k) in kickers.iter().take(5).enumerate() {
            value |= (k as u32) << (16 - i * 4);
        }
        Self(value)
    }

    /// Get the raw value for comparison.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Get the hand category.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_value((self.0 >> 20) as u8).unwrap_or(HandCategory::HighCard)
    }

    /// Unpack into the equivalent [`HandRank`].
    pub fn to_hand_rank(&self) -> HandRank {
        let category = self.category();
        let kickers: Vec<u8> = (0..category.kicker_count())
            .map(|i| ((self.0 >> (16 - i * 4)) & 0xF) as u8)
            .collect();
        HandRank::new(category, &kickers)
    }
}

impl fmt::Debug for PackedRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackedRank({:#07x})", self.0)
    }
}

/// Single-pass evaluator over rank and suit bitmasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackedEvaluator;

impl PackedEvaluator {
    /// Create a new evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Score the best five-card hand among 5-7 cards.
    pub fn evaluate(&self, cards: &[Card]) -> Result<PackedRank> {
        if !(5..=7).contains(&cards.len()) {
            return Err(AdvisorError::InvalidRequest(format!(
                "hand ranking needs 5 to 7 cards, got {}",
                cards.len()
            )));
        }

        let mut counts = [0u8; 13];
        let mut suit_bits = [0u16; 4];
        let mut rank_bits = 0u16;
        for card in cards {
            let bit = card.rank() - 2;
            counts[bit as usize] += 1;
            suit_bits[card.suit() as usize] |= 1 << bit;
            rank_bits |= 1 << bit;
        }

        let flush_bits = suit_bits.iter().copied().find(|b| b.count_ones() >= 5);
        if let Some(high) = flush_bits.and_then(straight_high) {
            return Ok(PackedRank::new(HandCategory::StraightFlush, &[high]));
        }

        let mut quad = None;
        let mut trips = Vec::with_capacity(2);
        let mut pairs = Vec::with_capacity(3);
        for bit in (0..13u8).rev() {
            match counts[bit as usize] {
                4 => quad = quad.or(Some(bit)),
                3 => trips.push(bit),
                2 => pairs.push(bit),
                _ => {}
            }
        }

        if let Some(quad) = quad {
            let kicker = top_ranks(rank_bits & !(1 << quad), 1);
            return Ok(PackedRank::new(HandCategory::FourOfAKind, &[quad + 2, kicker[0]]));
        }

        if let Some(&trip) = trips.first() {
            let pair = match (trips.get(1), pairs.first()) {
                (Some(&t), Some(&p)) => Some(t.max(p)),
                (Some(&t), None) => Some(t),
                (None, Some(&p)) => Some(p),
                (None, None) => None,
            };
            if let Some(pair) = pair {
                return Ok(PackedRank::new(HandCategory::FullHouse, &[trip + 2, pair + 2]));
            }
        }

        if let Some(bits) = flush_bits {
            return Ok(PackedRank::new(HandCategory::Flush, &top_ranks(bits, 5)));
        }

        if let Some(high) = straight_high(rank_bits) {
            return Ok(PackedRank::new(HandCategory::Straight, &[high]));
        }

        if let Some(&trip) = trips.first() {
            let rest = top_ranks(rank_bits & !(1 << trip), 2);
            return Ok(PackedRank::new(HandCategory::ThreeOfAKind, &[trip + 2, rest[0], rest[1]]));
        }

        match pairs.as_slice() {
            &[high, low, ..] => {
                let rest = top_ranks(rank_bits & !(1 << high) & !(1 << low), 1);
                Ok(PackedRank::new(HandCategory::TwoPair, &[high + 2, low + 2, rest[0]]))
            }
            &[pair] => {
                let rest = top_ranks(rank_bits & !(1 << pair), 3);
                Ok(PackedRank::new(
                    HandCategory::OnePair,
                    &[pair + 2, rest[0], rest[1], rest[2]],
                ))
            }
            &[] => Ok(PackedRank::new(HandCategory::HighCard, &top_ranks(rank_bits, 5))),
        }
    }
}

impl HandRanker for PackedEvaluator {
    type Strength = PackedRank;

    fn strength(&self, cards: &[Card]) -> Result<PackedRank> {
        self.evaluate(cards)
    }
}

/// High card of the best straight in a rank bitmask, if any.
fn straight_high(bits: u16) -> Option<u8> {
    for high in (6..=14u8).rev() {
        let window = 0b11111u16 << (high - 6);
        if bits & window == window {
            return Some(high);
        }
    }

    // Wheel: A, 2, 3, 4, 5
    let wheel = ACE_BIT | 0b1111;
    if bits & wheel == wheel {
        return Some(5);
    }

    None
}

/// The `n` highest ranks (2-14) set in a rank bitmask, highest first.
fn top_ranks(bits: u16, n: usize) -> Vec<u8> {
    (0..13u8)
        .rev()
        .filter(|&bit| bits & (1 << bit) != 0)
        .take(n)
        .map(|bit| bit + 2)
        .collect()
}
