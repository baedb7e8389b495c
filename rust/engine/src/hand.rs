use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{all_ranks, Card, Rank};

/// Hand categories from weakest to strongest; the discriminant order is the
/// ranking order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two pair",
            Category::ThreeOfAKind => "Three of a kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full house",
            Category::FourOfAKind => "Four of a kind",
            Category::StraightFlush => "Straight flush",
        }
    }
}

/// The best five-card hand found in a set of cards.
///
/// `low` is only set for [`Category::TwoPair`] (the second pair) and
/// [`Category::FullHouse`] (the pair). Ordering compares category, then
/// `high`, then `low`; remaining kickers are not compared, so hands that
/// agree on those three fields are ties.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Hand {
    pub category: Category,
    pub high: Rank,
    #[serde(default)]
    pub low: Option<Rank>,
}

impl Hand {
    pub fn new(category: Category, high: Rank) -> Self {
        Self {
            category,
            high,
            low: None,
        }
    }

    pub fn with_low(category: Category, high: Rank, low: Rank) -> Self {
        Self {
            category,
            high,
            low: Some(low),
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.category.name();
        match (self.category, self.low) {
            (Category::FullHouse, Some(low)) => {
                write!(f, "{}, {} over {}", name, plural(self.high), plural(low))
            }
            (Category::TwoPair, Some(low)) => {
                write!(f, "{}, {} and {}", name, plural(self.high), plural(low))
            }
            (Category::Pair, _) => write!(f, "Pair of {}", plural(self.high)),
            (Category::ThreeOfAKind | Category::FourOfAKind, _) => {
                write!(f, "{}, {}", name, plural(self.high))
            }
            _ => write!(f, "{}, {} high", name, self.high.name()),
        }
    }
}

fn plural(rank: Rank) -> String {
    match rank {
        Rank::Six => "Sixes".to_string(),
        r => format!("{}s", r.name()),
    }
}

/// Evaluates the best hand out of two hole cards and five community cards.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::hand::{evaluate_hand, Category};
/// use holdem_engine::cards::Rank;
///
/// let cards: [_; 7] = parse_cards("AD 2C 3H 4S 5D 9C KH").unwrap().try_into().unwrap();
/// let hand = evaluate_hand(&cards);
/// assert_eq!(hand.category, Category::Straight);
/// assert_eq!(hand.high, Rank::Five);
/// ```
pub fn evaluate_hand(cards: &[Card; 7]) -> Hand {
    evaluate(cards)
}

/// Evaluates hole cards together with however much of the board is out
/// (at least three cards).
pub fn evaluate_with_board(hole: [Card; 2], board: &[Card]) -> Hand {
    assert!(board.len() <= 5, "board holds at most five cards");
    let mut buf = [hole[0]; 7];
    buf[1] = hole[1];
    buf[2..2 + board.len()].copy_from_slice(board);
    evaluate(&buf[..2 + board.len()])
}

/// Evaluates the best five-card hand within `cards` (five or more distinct cards).
/// The result does not depend on input order.
pub fn evaluate(cards: &[Card]) -> Hand {
    assert!(cards.len() >= 5, "hand evaluation needs at least five cards");

    let mut rank_counts = [0u8; 15]; // 2..=14 used
    let mut rank_mask: u16 = 0;
    let mut suit_counts = [0u8; 4];
    let mut suit_masks = [0u16; 4];
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
        let s = c.suit.index();
        suit_counts[s] += 1;
        suit_masks[s] |= 1 << r;
    }

    let flush_mask = (0..4).find(|&s| suit_counts[s] >= 5).map(|s| suit_masks[s]);

    // a straight flush must be a straight within the flush suit alone
    if let Some(mask) = flush_mask {
        if let Some(high) = straight_high(mask) {
            return Hand::new(Category::StraightFlush, high);
        }
    }

    let m = Multiples::tally(&rank_counts);
    if let Some(quads) = m.quads {
        return Hand::new(Category::FourOfAKind, rank_at(quads));
    }
    if let (Some(trips), Some(pair)) = (m.trips, m.full_house_pair()) {
        return Hand::with_low(Category::FullHouse, rank_at(trips), rank_at(pair));
    }
    if let Some(mask) = flush_mask {
        return Hand::new(Category::Flush, highest(mask));
    }
    if let Some(high) = straight_high(rank_mask) {
        return Hand::new(Category::Straight, high);
    }
    if let Some(trips) = m.trips {
        return Hand::new(Category::ThreeOfAKind, rank_at(trips));
    }
    if let (Some(pair), Some(pair2)) = (m.pair, m.pair2) {
        return Hand::with_low(Category::TwoPair, rank_at(pair), rank_at(pair2));
    }
    if let Some(pair) = m.pair {
        return Hand::new(Category::Pair, rank_at(pair));
    }
    Hand::new(Category::HighCard, highest(rank_mask))
}

pub fn compare_hands(a: &Hand, b: &Hand) -> Ordering {
    a.cmp(b)
}

/// Rank counts collapsed into the multiples that matter, highest rank first.
#[derive(Debug, Default)]
struct Multiples {
    quads: Option<u8>,
    trips: Option<u8>,
    second_trips: Option<u8>,
    pair: Option<u8>,
    pair2: Option<u8>,
}

impl Multiples {
    fn tally(rank_counts: &[u8; 15]) -> Self {
        let mut m = Multiples::default();
        for r in (2..=14u8).rev() {
            match rank_counts[r as usize] {
                4 if m.quads.is_none() => m.quads = Some(r),
                3 if m.trips.is_none() => m.trips = Some(r),
                3 if m.second_trips.is_none() => m.second_trips = Some(r),
                2 if m.pair.is_none() => m.pair = Some(r),
                2 if m.pair2.is_none() => m.pair2 = Some(r),
                _ => {}
            }
        }
        m
    }

    /// Pair half of a full house: a second set of trips counts as a pair.
    fn full_house_pair(&self) -> Option<u8> {
        self.second_trips.max(self.pair)
    }
}

fn rank_at(value: u8) -> Rank {
    all_ranks()[(value - 2) as usize]
}

fn highest(mask: u16) -> Rank {
    rank_at((15 - mask.leading_zeros()) as u8)
}

fn straight_high(mask: u16) -> Option<Rank> {
    // Ace also plays as a one for the wheel (A-2-3-4-5)
    let m = if mask & (1 << 14) != 0 {
        mask | (1 << 1)
    } else {
        mask
    };
    (5..=14u8)
        .rev()
        .find(|&high| {
            let window = 0b1_1111u16 << (high - 4);
            m & window == window
        })
        .map(rank_at)
}
