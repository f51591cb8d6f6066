// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game roster types.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::GameError,
    poker::{Card, Chips, HandValue},
};

/// A participant reference, an `@` followed by a user name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerHandle(String);

impl PlayerHandle {
    /// Maximum length of the name after the `@`.
    pub const MAX_NAME_LEN: usize = 32;

    /// Creates a handle checking it has the `@name` format.
    pub fn new(handle: &str) -> Result<Self, GameError> {
        let valid = handle.strip_prefix('@').is_some_and(|name| {
            (1..=Self::MAX_NAME_LEN).contains(&name.chars().count())
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        });

        if valid {
            Ok(Self(handle.to_string()))
        } else {
            Err(GameError::InvalidIdentifier(handle.to_string()))
        }
    }

    /// The handle as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A game player.
#[derive(Debug, Clone)]
pub struct Player {
    /// The player handle.
    pub handle: PlayerHandle,
    /// This player chips.
    pub chips: Chips,
    /// This player private cards.
    pub hole_cards: Option<[Card; 2]>,
    /// This player hand value, set at showdown.
    pub hand: Option<HandValue>,
}

impl Player {
    /// Creates a new player.
    pub fn new(handle: PlayerHandle, chips: Chips) -> Self {
        Self {
            handle,
            chips,
            hole_cards: None,
            hand: None,
        }
    }

    /// Reset state for a new game.
    fn start_game(&mut self) {
        self.hole_cards = None;
        self.hand = None;
    }
}

/// The game players in seat order.
#[derive(Debug, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Minimum number of players to start a game.
    pub const MIN_PLAYERS: usize = 2;
    /// Maximum number of players to start a game.
    pub const MAX_PLAYERS: usize = 9;

    /// Adds a player at the end of the roster.
    pub fn add(&mut self, handle: &str, chips: Chips) -> Result<&Player, GameError> {
        let handle = PlayerHandle::new(handle)?;
        if self.position(&handle).is_some() {
            return Err(GameError::DuplicatePlayer(handle.to_string()));
        }

        self.players.push(Player::new(handle, chips));
        Ok(&self.players[self.players.len() - 1])
    }

    /// Removes a player from the roster.
    pub fn remove(&mut self, handle: &str) -> Result<Player, GameError> {
        let handle = PlayerHandle::new(handle)?;
        match self.position(&handle) {
            Some(pos) => Ok(self.players.remove(pos)),
            None => Err(GameError::PlayerNotFound(handle.to_string())),
        }
    }

    /// Remove all players, returns the number of players removed.
    pub fn clear(&mut self) -> usize {
        let count = self.players.len();
        self.players.clear();
        count
    }

    /// The players handles in seat order.
    pub fn list(&self) -> Vec<&PlayerHandle> {
        self.players.iter().map(|p| &p.handle).collect()
    }

    /// Returns total number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Checks if there are no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Checks there are enough players, and not too many, to play a game.
    pub fn check_size(&self) -> Result<(), GameError> {
        let count = self.players.len();
        if (Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&count) {
            Ok(())
        } else {
            Err(GameError::InvalidPlayerCount { count })
        }
    }

    /// Sets the chips of all players.
    pub fn set_chips(&mut self, chips: Chips) {
        self.players.iter_mut().for_each(|p| p.chips = chips);
    }

    /// Set state for a new game.
    pub fn start_game(&mut self) {
        self.players.iter_mut().for_each(Player::start_game);
    }

    /// Returns the player at the given seat.
    pub fn get(&self, idx: usize) -> Option<&Player> {
        self.players.get(idx)
    }

    /// Returns an iterator to all players.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Returns a mutable iterator to all players.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    fn position(&self, handle: &PlayerHandle) -> Option<usize> {
        self.players.iter().position(|p| &p.handle == handle)
    }
}
