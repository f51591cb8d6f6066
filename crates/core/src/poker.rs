// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Types used in a game.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub use holdem_cards::{Card, Deck, DeckError, Rank, Suit};
pub use holdem_eval::{HandEvaluator, HandRank, HandValue, RankEvaluator};

use crate::error::GameError;

/// Chips amount.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Chips(u32);

impl Chips {
    /// Creates chips with the given value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for Chips {
    type Err = GameError;

    /// Parses a positive amount, thousands separators are allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.replace(',', "")
            .parse::<u32>()
            .ok()
            .filter(|amount| *amount > 0)
            .map(Chips)
            .ok_or_else(|| GameError::InvalidAmount(s.to_string()))
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0;
        if amount >= 10_000_000 {
            write!(f, "{:.1}M", amount as f64 / 1e6)
        } else if amount >= 1_000_000 {
            write!(
                f,
                "{},{:03},{:03}",
                amount / 1_000_000,
                amount % 1_000_000 / 1_000,
                amount % 1000
            )
        } else if amount >= 1_000 {
            write!(f, "{},{:03}", amount / 1000, amount % 1000)
        } else {
            write!(f, "{}", amount)
        }
    }
}
