//! The 52-card deck and sampling without replacement.

use std::fmt;

use rand::Rng;

use super::card::{unique_mask, Card};
use crate::error::{AdvisorError, Result};

/// Every card, in index order.
pub const FULL_DECK: [Card; 52] = {
    let mut cards = [Card::from_id(0); 52];
    let mut i = 0;
    while i < 52 {
        cards[i] = Card::from_id(i as u8);
        i += 1;
    }
    cards
};

/// A set of cards still available to be dealt.
///
/// Removing cards produces a new deck; sampling never mutates it, so one deck
/// can serve any number of independent trials.
#[derive(Clone, PartialEq, Eq)]
pub struct Deck {
    /// Remaining cards in index order.
    cards: Vec<Card>,
    /// Bitmask of remaining cards (for fast membership checks).
    mask: u64,
}

impl Deck {
    /// The full 52-card deck.
    pub fn full() -> Self {
        Self {
            cards: FULL_DECK.to_vec(),
            mask: (1u64 << 52) - 1,
        }
    }

    /// A new deck without `known` cards.
    ///
    /// Fails if `known` lists a card twice or names a card this deck does not
    /// hold.
    pub fn remove_known(&self, known: &[Card]) -> Result<Self> {
        let dead = unique_mask(known)?;
        if let Some(missing) = known.iter().find(|c| self.mask & c.mask() == 0) {
            return Err(AdvisorError::CardNotInDeck(*missing));
        }

        let mask = self.mask & !dead;
        let cards = self
            .cards
            .iter()
            .copied()
            .filter(|c| mask & c.mask() != 0)
            .collect();
        Ok(Self { cards, mask })
    }

    /// Draw `k` distinct cards uniformly at random, in random order.
    ///
    /// The deck itself is left untouched.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, k: usize) -> Result<Vec<Card>> {
        if k > self.cards.len() {
            return Err(AdvisorError::InsufficientCards {
                requested: k,
                available: self.cards.len(),
            });
        }
        Ok(rand::seq::index::sample(rng, self.cards.len(), k)
            .into_iter()
            .map(|i| self.cards[i])
            .collect())
    }

    /// Number of cards remaining.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether no cards remain.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the deck still holds `card`.
    pub fn contains(&self, card: Card) -> bool {
        self.mask & card.mask() != 0
    }

    /// Remaining cards as a slice.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cards(tokens: &[&str]) -> Vec<Card> {
        Card::parse_all(tokens).unwrap()
    }

    #[test]
    fn test_full_deck() {
        let deck = Deck::full();
        assert_eq!(deck.len(), 52);
        assert_eq!(unique_mask(deck.cards()).unwrap().count_ones(), 52);
        assert!(deck.contains(Card::parse("Ah").unwrap()));
    }

    #[test]
    fn test_remove_known() {
        let known = cards(&["As", "Ah", "2c"]);
        let deck = Deck::full().remove_known(&known).unwrap();
        assert_eq!(deck.len(), 49);
        for card in &known {
            assert!(!deck.contains(*card));
            assert!(!deck.cards().contains(card));
        }
    }

    #[test]
    fn test_remove_known_rejects_duplicates() {
        let known = cards(&["As", "Kd", "As"]);
        assert_eq!(
            Deck::full().remove_known(&known),
            Err(AdvisorError::DuplicateCard(known[0]))
        );
    }

    #[test]
    fn test_remove_known_rejects_missing_card() {
        let deck = Deck::full().remove_known(&cards(&["Td"])).unwrap();
        let again = cards(&["9c", "Td"]);
        assert_eq!(deck.remove_known(&again), Err(AdvisorError::CardNotInDeck(again[1])));
    }

    #[test]
    fn test_sample_without_replacement() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::full().remove_known(&cards(&["Ah", "Kh"])).unwrap();

        for _ in 0..200 {
            let drawn = deck.sample(&mut rng, 9).unwrap();
            assert_eq!(drawn.len(), 9);
            assert!(unique_mask(&drawn).is_ok(), "sample repeated a card: {drawn:?}");
            assert!(drawn.iter().all(|c| deck.contains(*c)));
        }
        assert_eq!(deck.len(), 50);
    }

    #[test]
    fn test_sample_whole_deck() {
        let mut rng = StdRng::seed_from_u64(1);
        let deck = Deck::full();
        let drawn = deck.sample(&mut rng, 52).unwrap();
        assert_eq!(unique_mask(&drawn).unwrap().count_ones(), 52);
    }

    #[test]
    fn test_sample_insufficient() {
        let mut rng = StdRng::seed_from_u64(1);
        let deck = Deck::full().remove_known(&FULL_DECK[..50]).unwrap();
        assert_eq!(
            deck.sample(&mut rng, 3),
            Err(AdvisorError::InsufficientCards { requested: 3, available: 2 })
        );
    }
}
