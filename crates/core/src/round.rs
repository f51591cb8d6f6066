// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Round state machine.
//!
//! A round moves through the following states, each `deal` moves to the next
//! state and performs the reveal the current state is named after:
//!
//! ```text
//!   Idle -> PreFlop -> Flop -> Turn -> Showdown -> Complete
//!            |          |       |       |
//!            |          |       |       +- river card, showdown
//!            |          |       +--------- turn card
//!            |          +----------------- three flop cards
//!            +---------------------------- two hole cards per player
//! ```
//!
//! Starting a new game moves any state to `PreFlop` subject to the
//! [RestartPolicy].
use log::{debug, error, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    error::GameError,
    poker::{Card, Deck},
    roster::Roster,
    showdown::{ShowdownResolver, ShowdownResult},
};

/// The round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundState {
    /// No game has been started.
    #[default]
    Idle,
    /// Game started, next deal gives the hole cards.
    PreFlop,
    /// Next deal reveals the flop.
    Flop,
    /// Next deal reveals the turn.
    Turn,
    /// Next deal reveals the river and compares hands.
    Showdown,
    /// The round has ended.
    Complete,
}

impl RoundState {
    /// The state after a deal.
    pub fn next(self) -> Self {
        match self {
            RoundState::Idle => RoundState::Idle,
            RoundState::PreFlop => RoundState::Flop,
            RoundState::Flop => RoundState::Turn,
            RoundState::Turn => RoundState::Showdown,
            RoundState::Showdown | RoundState::Complete => RoundState::Complete,
        }
    }

    /// Checks if hole cards have been dealt and the round has not ended.
    pub fn is_in_progress(self) -> bool {
        matches!(
            self,
            RoundState::Flop | RoundState::Turn | RoundState::Showdown
        )
    }

    /// The title announced when dealing in this state.
    pub fn deal_title(self) -> Option<&'static str> {
        match self {
            RoundState::PreFlop => Some("Round 1: Pre-Flop"),
            RoundState::Flop => Some("Round 2: Flop"),
            RoundState::Turn => Some("Round 3: Turn"),
            RoundState::Showdown => Some("Final Round: River"),
            RoundState::Idle | RoundState::Complete => None,
        }
    }
}

/// What to do when a new game is requested while a round is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RestartPolicy {
    /// Discard the round in progress and start a new one.
    #[default]
    Discard,
    /// Reject the request with [GameError::GameInProgress].
    Reject,
}

impl FromStr for RestartPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "discard" => Ok(RestartPolicy::Discard),
            "reject" => Ok(RestartPolicy::Reject),
            _ => Err(format!("invalid restart policy '{s}', use discard or reject")),
        }
    }
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartPolicy::Discard => f.write_str("discard"),
            RestartPolicy::Reject => f.write_str("reject"),
        }
    }
}

/// The outcome of a deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Each player got two hole cards.
    HoleCards,
    /// The flop has been revealed.
    Flop,
    /// The turn has been revealed.
    Turn,
    /// The river has been revealed and hands compared.
    River(ShowdownResult),
    /// Nothing to deal, a new game must be started.
    NewGameNeeded,
}

/// A round deck, community cards and state.
#[derive(Debug)]
pub struct Round {
    state: RoundState,
    deck: Deck,
    community: Vec<Card>,
}

impl Round {
    /// Number of community cards at showdown.
    pub const COMMUNITY_CARDS: usize = 5;

    /// Creates an idle round with a shuffled deck.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            state: RoundState::Idle,
            deck: Deck::new_and_shuffled(rng),
            community: Vec::with_capacity(Self::COMMUNITY_CARDS),
        }
    }

    /// The round state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// The community cards revealed so far.
    pub fn community(&self) -> &[Card] {
        &self.community
    }

    /// The round deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Starts a new game.
    ///
    /// With [RestartPolicy::Reject] a game that has been started and has not
    /// completed, including one waiting for hole cards, is not replaced.
    /// Returns true if a round in progress has been discarded.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        roster: &mut Roster,
        policy: RestartPolicy,
        rng: &mut R,
    ) -> Result<bool, GameError> {
        let started = !matches!(self.state, RoundState::Idle | RoundState::Complete);
        if started && policy == RestartPolicy::Reject {
            return Err(GameError::GameInProgress);
        }

        let discarded = self.state.is_in_progress();

        roster.check_size()?;

        if discarded {
            warn!("Discarding round in {:?} state", self.state);
        }

        self.deck = Deck::new_and_shuffled(rng);
        self.community.clear();
        roster.start_game();
        self.state = RoundState::PreFlop;

        info!("New game started with {} players", roster.len());

        Ok(discarded)
    }

    /// Deals the cards for the current state and moves to the next state.
    ///
    /// If the deck runs out of cards, or there are no hands to compare at
    /// showdown, the round is aborted and moves to idle.
    pub fn advance(
        &mut self,
        roster: &mut Roster,
        resolver: &ShowdownResolver,
    ) -> Result<Step, GameError> {
        let res = self.deal(roster, resolver);

        // A failed showdown leaves the board complete with no winner.
        let abort = match &res {
            Err(GameError::DeckExhausted(_)) => true,
            Err(_) => self.state == RoundState::Showdown,
            Ok(_) => false,
        };

        if let (true, Err(e)) = (abort, &res) {
            error!("Round aborted in {:?} state: {e}", self.state);
            self.state = RoundState::Idle;
            self.community.clear();
            roster.start_game();
        }

        res
    }

    fn deal(&mut self, roster: &mut Roster, resolver: &ShowdownResolver) -> Result<Step, GameError> {
        let step = match self.state {
            RoundState::Idle | RoundState::Complete => return Ok(Step::NewGameNeeded),
            RoundState::PreFlop => {
                // Players may have changed since the game started.
                roster.check_size()?;

                for player in roster.iter_mut() {
                    let cards = self.deck.deal(2)?;
                    player.hole_cards = Some([cards[0], cards[1]]);
                }

                Step::HoleCards
            }
            RoundState::Flop => {
                self.community.extend_from_slice(self.deck.deal(3)?);
                Step::Flop
            }
            RoundState::Turn => {
                self.community.extend_from_slice(self.deck.deal(1)?);
                Step::Turn
            }
            RoundState::Showdown => {
                self.community.extend_from_slice(self.deck.deal(1)?);

                let count = roster.len();
                let result = resolver
                    .resolve(roster, &self.community)
                    .ok_or(GameError::InvalidPlayerCount { count })?;
                Step::River(result)
            }
        };

        debug!(
            "Dealt {:?}, {} cards dealt, board {:?}",
            self.state,
            self.deck.dealt(),
            self.community
        );

        self.state = self.state.next();
        Ok(step)
    }
}
