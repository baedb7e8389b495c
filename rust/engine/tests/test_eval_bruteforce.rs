//! Compares the seven-card evaluator against a naive classifier run over all
//! 21 five-card subsets.

use holdem_engine::cards::{full_deck, Card, Rank};
use holdem_engine::hand::{evaluate, evaluate_hand, Category, Hand};
use proptest::prelude::*;
use proptest::sample::subsequence;

fn rank_of(value: u8) -> Rank {
    Rank::from_u8(value).expect("rank value in range")
}

/// Straightforward classification of exactly five cards.
fn classify_five(cards: &[Card]) -> Hand {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let distinct = {
        let mut v = values.clone();
        v.dedup();
        v.len() == 5
    };
    let straight_high = if !distinct {
        None
    } else if values[0] - values[4] == 4 {
        Some(values[0])
    } else if values == [14, 5, 4, 3, 2] {
        Some(5)
    } else {
        None
    };

    // (count, rank) groups, biggest group first, then highest rank
    let mut groups: Vec<(usize, u8)> = Vec::new();
    for &v in &values {
        match groups.iter_mut().find(|g| g.1 == v) {
            Some(g) => g.0 += 1,
            None => groups.push((1, v)),
        }
    }
    groups.sort_by(|a, b| b.cmp(a));

    match (straight_high, flush, groups[0].0, groups.get(1).map(|g| g.0)) {
        (Some(h), true, _, _) => Hand::new(Category::StraightFlush, rank_of(h)),
        (_, _, 4, _) => Hand::new(Category::FourOfAKind, rank_of(groups[0].1)),
        (_, _, 3, Some(2)) => {
            Hand::with_low(Category::FullHouse, rank_of(groups[0].1), rank_of(groups[1].1))
        }
        (_, true, _, _) => Hand::new(Category::Flush, rank_of(values[0])),
        (Some(h), _, _, _) => Hand::new(Category::Straight, rank_of(h)),
        (_, _, 3, _) => Hand::new(Category::ThreeOfAKind, rank_of(groups[0].1)),
        (_, _, 2, Some(2)) => {
            Hand::with_low(Category::TwoPair, rank_of(groups[0].1), rank_of(groups[1].1))
        }
        (_, _, 2, _) => Hand::new(Category::Pair, rank_of(groups[0].1)),
        _ => Hand::new(Category::HighCard, rank_of(values[0])),
    }
}

fn best_of_subsets(cards: &[Card]) -> Hand {
    let n = cards.len();
    let mut best: Option<Hand> = None;
    for mask in 0u32..(1 << n) {
        if mask.count_ones() != 5 {
            continue;
        }
        let five: Vec<Card> = (0..n).filter(|i| mask & (1 << i) != 0).map(|i| cards[i]).collect();
        let hand = classify_five(&five);
        best = Some(best.map_or(hand, |b| b.max(hand)));
    }
    best.expect("at least one subset")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn seven_card_evaluation_matches_best_five_card_subset(
        cards in subsequence(full_deck(), 7).prop_shuffle()
    ) {
        let seven: [Card; 7] = cards.clone().try_into().unwrap();
        prop_assert_eq!(evaluate_hand(&seven), best_of_subsets(&cards));
    }

    #[test]
    fn six_card_evaluation_matches_best_five_card_subset(
        cards in subsequence(full_deck(), 6).prop_shuffle()
    ) {
        prop_assert_eq!(evaluate(&cards), best_of_subsets(&cards));
    }
}
