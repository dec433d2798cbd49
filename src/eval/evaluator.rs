//! Reference hand evaluator.
//!
//! `rank5` classifies exactly five cards from a 13-slot rank count table.
//! `best_rank` extends that to seven cards by scoring every five-card subset
//! and keeping the maximum.

use std::fmt::Debug;

use super::hand_rank::{HandCategory, HandRank};
use crate::cards::Card;
use crate::error::{AdvisorError, Result};

/// Index sets of the 21 five-card subsets of seven cards.
pub const SEVEN_CHOOSE_FIVE: [[usize; 5]; 21] = {
    let mut combos = [[0usize; 5]; 21];
    let mut n = 0;
    let mut skip_a = 0;
    while skip_a < 7 {
        let mut skip_b = skip_a + 1;
        while skip_b < 7 {
            let mut k = 0;
            let mut idx = 0;
            while idx < 7 {
                if idx != skip_a && idx != skip_b {
                    combos[n][k] = idx;
                    k += 1;
                }
                idx += 1;
            }
            n += 1;
            skip_b += 1;
        }
        skip_a += 1;
    }
    combos
};

/// Anything that can score a 5-7 card hand.
///
/// Implementations must agree with [`Evaluator`] on the relative order of any
/// two hands, be free of side effects, and be safe to call from many trials
/// at once.
pub trait HandRanker: Send + Sync {
    /// Comparable strength value; greater is better.
    type Strength: Ord + Copy + Send + Debug;

    /// Score the best five-card hand contained in `cards`.
    fn strength(&self, cards: &[Card]) -> Result<Self::Strength>;
}

/// Hand evaluator built on explicit category checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Create a new evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Rank exactly five cards.
    pub fn rank5(&self, cards: &[Card; 5]) -> HandRank {
        let mut counts = [0u8; 13];
        for card in cards {
            counts[(card.rank() - 2) as usize] += 1;
        }

        let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
        let straight_high = find_straight(&counts);

        if is_flush {
            if let Some(high) = straight_high {
                return HandRank::new(HandCategory::StraightFlush, &[high]);
            }
        }

        // Group ranks by multiplicity, highest rank first
        let mut quad = None;
        let mut trip = None;
        let mut pairs = Vec::with_capacity(2);
        let mut singles = Vec::with_capacity(5);
        for idx in (0..13).rev() {
            let rank = idx as u8 + 2;
            match counts[idx] {
                4 => quad = Some(rank),
                3 => trip = Some(rank),
                2 => pairs.push(rank),
                1 => singles.push(rank),
                _ => {}
            }
        }

        if let Some(quad) = quad {
            return HandRank::new(HandCategory::FourOfAKind, &[quad, singles[0]]);
        }

        if let (Some(trip), [pair]) = (trip, pairs.as_slice()) {
            return HandRank::new(HandCategory::FullHouse, &[trip, *pair]);
        }

        if is_flush {
            return HandRank::new(HandCategory::Flush, &singles);
        }

        if let Some(high) = straight_high {
            return HandRank::new(HandCategory::Straight, &[high]);
        }

        if let Some(trip) = trip {
            return HandRank::new(HandCategory::ThreeOfAKind, &[trip, singles[0], singles[1]]);
        }

        match pairs.as_slice() {
            [high, low] => HandRank::new(HandCategory::TwoPair, &[*high, *low, singles[0]]),
            [pair] => HandRank::new(
                HandCategory::OnePair,
                &[*pair, singles[0], singles[1], singles[2]],
            ),
            _ => HandRank::new(HandCategory::HighCard, &singles),
        }
    }

    /// Rank five cards directly, or seven cards by their best five-card
    /// subset.
    pub fn best_rank(&self, cards: &[Card]) -> Result<HandRank> {
        match cards.len() {
            5 => Ok(self.rank5(&[cards[0], cards[1], cards[2], cards[3], cards[4]])),
            7 => Ok(self.best_of_seven(cards)),
            n => Err(AdvisorError::InvalidRequest(format!(
                "hand ranking needs 5 or 7 cards, got {}",
                n
            ))),
        }
    }

    fn best_of_seven(&self, cards: &[Card]) -> HandRank {
        SEVEN_CHOOSE_FIVE
            .iter()
            .map(|idx| {
                self.rank5(&[
                    cards[idx[0]],
                    cards[idx[1]],
                    cards[idx[2]],
                    cards[idx[3]],
                    cards[idx[4]],
                ])
            })
            .max()
            .unwrap_or_else(|| HandRank::new(HandCategory::HighCard, &[0; 5]))
    }
}

impl HandRanker for Evaluator {
    type Strength = HandRank;

    fn strength(&self, cards: &[Card]) -> Result<HandRank> {
        self.best_rank(cards)
    }
}

/// High card of the best straight in a rank count table, if any.
///
/// Scans distinct ranks from the top for a run of five; the wheel (A-5)
/// is a special case whose high card is the five.
fn find_straight(counts: &[u8; 13]) -> Option<u8> {
    let distinct: Vec<u8> = (0..13usize)
        .rev()
        .filter(|&idx| counts[idx] > 0)
        .map(|idx| idx as u8 + 2)
        .collect();

    if let Some(run) = distinct.windows(5).find(|w| w[0] - w[4] == 4) {
        return Some(run[0]);
    }

    // A, 5, 4, 3, 2
    if counts[12] > 0 && counts[..4].iter().all(|&c| c > 0) {
        return Some(5);
    }

    None
}
