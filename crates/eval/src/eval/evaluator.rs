// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand evaluators.
use holdem_cards::{Card, Rank};

use super::{HandRank, HandValue};

/// Ranks a set of cards.
///
/// Implementations must be consistent, the same cards always get the same
/// value, and a stronger hand must get a greater [HandValue::strength].
pub trait HandEvaluator: Send + Sync {
    /// Evaluates the best hand that can be made with the given cards.
    fn evaluate(&self, cards: &[Card]) -> HandValue;
}

/// A hand evaluator based on rank masks and rank counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct RankEvaluator;

impl HandEvaluator for RankEvaluator {
    fn evaluate(&self, cards: &[Card]) -> HandValue {
        Hand::new(cards).value()
    }
}

/// Mask with the wheel ranks A, 5, 4, 3, 2.
const WHEEL: u16 = 0b1_0000_0000_1111;

/// Mask with five consecutive ranks starting from deuce.
const FIVE_IN_ROW: u16 = 0b1_1111;

/// Cards ranks and suits summary.
struct Hand {
    /// All ranks in the hand.
    ranks: u16,
    /// Ranks per suit.
    suits: [u16; 4],
    /// Number of cards for each rank.
    counts: [u8; 13],
}

impl Hand {
    fn new(cards: &[Card]) -> Self {
        let mut hand = Hand {
            ranks: 0,
            suits: [0; 4],
            counts: [0; 13],
        };

        for card in cards {
            let mask = card.rank_mask();
            hand.ranks |= mask;
            hand.suits[(card.suit() as u32).trailing_zeros() as usize] |= mask;
            hand.counts[card.rank() as usize] += 1;
        }

        hand
    }

    fn value(&self) -> HandValue {
        if let Some(suit_ranks) = self.suits.iter().find(|s| s.count_ones() >= 5) {
            if let Some(high) = straight_high(*suit_ranks) {
                return HandValue::new(HandRank::StraightFlush, &[high]);
            }
        }

        if let Some(quads) = self.ranks_with(4).next() {
            return HandValue::new(HandRank::FourOfAKind, &self.with_kickers(&[quads], 1));
        }

        if let Some(trips) = self.ranks_with(3).next() {
            let pair = Rank::ranks()
                .rev()
                .find(|r| *r != trips && self.count(*r) >= 2);
            if let Some(pair) = pair {
                return HandValue::new(HandRank::FullHouse, &[trips, pair]);
            }
        }

        if let Some(suit_ranks) = self.suits.iter().find(|s| s.count_ones() >= 5) {
            let ranks = top_ranks(*suit_ranks, 5);
            return HandValue::new(HandRank::Flush, &ranks);
        }

        if let Some(high) = straight_high(self.ranks) {
            return HandValue::new(HandRank::Straight, &[high]);
        }

        if let Some(trips) = self.ranks_with(3).next() {
            return HandValue::new(HandRank::ThreeOfAKind, &self.with_kickers(&[trips], 2));
        }

        let pairs = self.ranks_with(2).take(2).collect::<Vec<_>>();
        match pairs.len() {
            2 => HandValue::new(HandRank::TwoPairs, &self.with_kickers(&pairs, 1)),
            1 => HandValue::new(HandRank::OnePair, &self.with_kickers(&pairs, 3)),
            _ => HandValue::new(HandRank::HighCard, &top_ranks(self.ranks, 5)),
        }
    }

    fn count(&self, rank: Rank) -> u8 {
        self.counts[rank as usize]
    }

    /// Ranks with at least `n` cards from the highest.
    fn ranks_with(&self, n: u8) -> impl Iterator<Item = Rank> + '_ {
        Rank::ranks().rev().filter(move |r| self.count(*r) >= n)
    }

    /// The `used` ranks followed by the `n` highest ranks not in `used`.
    fn with_kickers(&self, used: &[Rank], n: usize) -> Vec<Rank> {
        let kickers = Rank::ranks()
            .rev()
            .filter(|r| self.count(*r) > 0 && !used.contains(r))
            .take(n);
        used.iter().copied().chain(kickers).collect()
    }
}

/// Returns the highest rank of a straight in the ranks mask.
fn straight_high(ranks: u16) -> Option<Rank> {
    (0..=8usize)
        .rev()
        .find(|low| ranks & (FIVE_IN_ROW << low) == FIVE_IN_ROW << low)
        .and_then(|low| Rank::from_index(low + 4))
        .or_else(|| (ranks & WHEEL == WHEEL).then_some(Rank::Five))
}

/// Returns the `n` highest ranks in the ranks mask.
fn top_ranks(ranks: u16, n: usize) -> Vec<Rank> {
    Rank::ranks()
        .rev()
        .filter(|r| ranks & (1 << *r as u16) != 0)
        .take(n)
        .collect()
}
