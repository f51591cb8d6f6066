// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The [HandEvaluator] trait is the capability the game engine uses to rank
//! hands, it maps a set of cards to a [HandValue] that is totally ordered and
//! carries the hand category.
//!
//! [RankEvaluator] is the default implementation, it works on rank bit masks
//! and rank counts and handles 5, 6 and 7 cards hands.

mod evaluator;
pub use evaluator::{HandEvaluator, RankEvaluator};

mod value;
pub use value::{HandRank, HandValue};
