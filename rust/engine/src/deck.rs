use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{full_deck, Card};

/// A 52-card deck with a deal cursor.
///
/// The deck never owns a random source: callers pass one to [`Deck::shuffle`]
/// so the same seed always reproduces the same deal.
///
/// ```
/// use holdem_engine::deck::Deck;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let mut a = Deck::new();
/// let mut b = Deck::new();
/// a.shuffle(&mut ChaCha20Rng::seed_from_u64(7));
/// b.shuffle(&mut ChaCha20Rng::seed_from_u64(7));
/// assert_eq!(a.deal_card(), b.deal_card());
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// Builds the deck in canonical order (see [`full_deck`]).
    pub fn new() -> Self {
        Self {
            cards: full_deck(),
            position: 0,
        }
    }

    /// Deck that deals `top` first, in order, followed by the remaining cards
    /// in canonical order. Repeated cards in `top` are only placed once.
    ///
    /// ```
    /// use holdem_engine::cards::parse_cards;
    /// use holdem_engine::deck::Deck;
    ///
    /// let mut deck = Deck::stacked(&parse_cards("AS KS").unwrap());
    /// assert_eq!(deck.deal_card().unwrap().to_string(), "AS");
    /// assert_eq!(deck.deal_card().unwrap().to_string(), "KS");
    /// assert_eq!(deck.remaining(), 50);
    /// ```
    pub fn stacked(top: &[Card]) -> Self {
        let mut cards: Vec<Card> = Vec::with_capacity(52);
        for &c in top {
            if !cards.contains(&c) {
                cards.push(c);
            }
        }
        for c in full_deck() {
            if !cards.contains(&c) {
                cards.push(c);
            }
        }
        Self { cards, position: 0 }
    }

    /// Fisher-Yates permutation of all 52 cards; rewinds the deal cursor.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    /// Discards the top card. Callers check [`Deck::remaining`] before a hand.
    pub fn burn_card(&mut self) {
        let burned = self.deal_card();
        debug_assert!(burned.is_some(), "burn from an empty deck");
    }

    /// Restores canonical order and rewinds the deal cursor.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Every card in current deck order, dealt or not.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
