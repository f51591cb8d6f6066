// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand values.
use serde::{Deserialize, Serialize};
use std::fmt;

use holdem_cards::Rank;

/// A hand category from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No other category.
    HighCard = 0,
    /// Two cards of the same rank.
    OnePair,
    /// Two different pairs.
    TwoPairs,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// Five cards in sequence of the same suit.
    StraightFlush,
}

impl HandRank {
    /// The category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandRank::HighCard => "high card",
            HandRank::OnePair => "one pair",
            HandRank::TwoPairs => "two pairs",
            HandRank::ThreeOfAKind => "three of a kind",
            HandRank::Straight => "straight",
            HandRank::Flush => "flush",
            HandRank::FullHouse => "full house",
            HandRank::FourOfAKind => "four of a kind",
            HandRank::StraightFlush => "straight flush",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value of a hand.
///
/// The strength packs the category in bits 20..24 and up to five ranks that
/// break ties within the category, most significant first, in 4 bits each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandValue {
    strength: u32,
    rank: HandRank,
}

impl HandValue {
    /// Creates a hand value from a category and its tie breaking ranks.
    pub(crate) fn new(rank: HandRank, ranks: &[Rank]) -> Self {
        let strength = ranks
            .iter()
            .take(5)
            .enumerate()
            .fold((rank as u32) << 20, |acc, (idx, r)| {
                acc | (*r as u32) << (16 - 4 * idx)
            });

        Self { strength, rank }
    }

    /// Creates a hand value with the given strength and category.
    ///
    /// Useful for evaluators that compute their own strength scale.
    pub fn with_strength(rank: HandRank, strength: u32) -> Self {
        Self { strength, rank }
    }

    /// The hand strength, higher is stronger.
    pub fn strength(&self) -> u32 {
        self.strength
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The hand category name.
    pub fn name(&self) -> &'static str {
        self.rank.name()
    }
}
