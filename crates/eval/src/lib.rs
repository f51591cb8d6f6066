// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem bot hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. The game engine depends only
//! on the [HandEvaluator] trait so that any ranking implementation, including
//! stubs in tests, can be plugged in. [RankEvaluator] is the default one.
//!
//! ```
//! # use holdem_eval::*;
//! // 2c, 2d, .., 3h
//! let cards = Deck::default().into_iter().take(7).collect::<Vec<_>>();
//! let v1 = RankEvaluator.evaluate(&cards[0..5]);
//! let v2 = RankEvaluator.evaluate(&cards[2..7]);
//! assert_eq!(v1.rank(), HandRank::FourOfAKind);
//! assert_eq!(v2.name(), "full house");
//! assert!(v1 > v2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandEvaluator, HandRank, HandValue, RankEvaluator};

// Reexport cards types.
pub use holdem_cards::{Card, Deck, Rank, Suit};
