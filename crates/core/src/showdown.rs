// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown resolution.
use log::info;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

use crate::{
    poker::{Card, HandEvaluator, HandValue},
    roster::{PlayerHandle, Roster},
};

/// A player hand at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHand {
    /// The player handle.
    pub handle: PlayerHandle,
    /// The player hole cards.
    pub hole_cards: [Card; 2],
    /// The best hand value using hole and community cards.
    pub value: HandValue,
}

/// The showdown outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownResult {
    /// The winner index in [ShowdownResult::hands].
    pub winner: usize,
    /// Players that have the same hand strength of the winner but come later in
    /// seat order.
    pub tied_with: Vec<PlayerHandle>,
    /// All players hands in seat order.
    pub hands: Vec<PlayerHand>,
}

impl ShowdownResult {
    /// The winner hand.
    pub fn winner_hand(&self) -> &PlayerHand {
        &self.hands[self.winner]
    }
}

/// Picks the winner given the players strengths in seat order.
///
/// The winner is the first player with the highest strength, a player coming
/// later with the same strength doesn't win. Returns `None` if there are no
/// players.
pub fn pick_winner(strengths: &[u32]) -> Option<usize> {
    strengths
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, u32)>, (idx, &s)| match best {
            Some((_, max)) if max >= s => best,
            _ => Some((idx, s)),
        })
        .map(|(idx, _)| idx)
}

/// Compares players hands using a [HandEvaluator].
#[derive(Clone)]
pub struct ShowdownResolver {
    evaluator: Arc<dyn HandEvaluator>,
}

impl fmt::Debug for ShowdownResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowdownResolver").finish_non_exhaustive()
    }
}

impl ShowdownResolver {
    /// Creates a resolver with the given evaluator.
    pub fn new(evaluator: Arc<dyn HandEvaluator>) -> Self {
        Self { evaluator }
    }

    /// Evaluates each player with hole cards and picks the winner.
    ///
    /// Stores each player hand value in the roster. Returns `None` if no
    /// player has hole cards.
    pub fn resolve(&self, roster: &mut Roster, community: &[Card]) -> Option<ShowdownResult> {
        debug_assert_eq!(community.len(), 5);

        let mut hands = Vec::with_capacity(roster.len());
        for player in roster.iter_mut() {
            if let Some(hole_cards) = player.hole_cards {
                let mut cards = hole_cards.to_vec();
                cards.extend_from_slice(community);

                let value = self.evaluator.evaluate(&cards);
                player.hand = Some(value);

                hands.push(PlayerHand {
                    handle: player.handle.clone(),
                    hole_cards,
                    value,
                });
            }
        }

        let strengths = hands.iter().map(|h| h.value.strength()).collect::<Vec<_>>();
        let winner = pick_winner(&strengths)?;

        let tied_with = hands
            .iter()
            .skip(winner + 1)
            .filter(|h| h.value.strength() == strengths[winner])
            .map(|h| h.handle.clone())
            .collect();

        let result = ShowdownResult {
            winner,
            tied_with,
            hands,
        };

        let hand = result.winner_hand();
        info!("{} wins with {} ({})", hand.handle, hand.value.name(), hand.value.strength());

        Some(result)
    }
}
