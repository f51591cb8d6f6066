// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game errors.
use thiserror::Error;

use crate::{poker::DeckError, roster::Roster};

/// Errors returned by session commands.
///
/// Errors are local to the command that caused them, the message is meant to
/// be shown to the participant who sent the command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The roster size is outside the allowed range.
    #[error(
        "You need {min}-{max} players to start a game, there are {count}",
        min = Roster::MIN_PLAYERS,
        max = Roster::MAX_PLAYERS
    )]
    InvalidPlayerCount {
        /// The number of players in the roster.
        count: usize,
    },
    /// Malformed participant reference.
    #[error("Invalid username '{0}'")]
    InvalidIdentifier(String),
    /// The participant is not in the roster.
    #[error("{0} is not in the game")]
    PlayerNotFound(String),
    /// The participant is already in the roster.
    #[error("{0} is already in the game")]
    DuplicatePlayer(String),
    /// The deck ran out of cards, the round has been aborted.
    #[error("Round aborted: {0}")]
    DeckExhausted(#[from] DeckError),
    /// The command is not allowed while a round is in progress.
    #[error("A round is in progress")]
    GameInProgress,
    /// Malformed chips amount.
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    /// The command is not known.
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
}
