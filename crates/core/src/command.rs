// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Chat commands parsing.
use crate::{error::GameError, poker::Chips};

/// The help text listing all commands.
pub const HELP: &str = "\
$help/$commands - Display this command list
$deal - Deals cards to all players
$draw - Draw a random card from the deck
$money {amount} - Set the starting balance for each player
$player/$p [add/del/clr/list] - Add/remove/clear/list players
$poker/$new - Shuffles the deck and starts a new game";

/// The player command usage text.
pub const PLAYER_USAGE: &str = "$player [add/del] {name} - Add/remove players to the game";

/// A session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Shuffle a new deck and start a game.
    NewGame,
    /// Add a player to the roster.
    AddPlayer(String),
    /// Remove a player from the roster.
    RemovePlayer(String),
    /// Remove all players.
    ClearPlayers,
    /// List the roster players.
    ListPlayers,
    /// Show the player command usage.
    PlayerUsage,
    /// Deal the next cards.
    Deal,
    /// Show a random card from the deck.
    Draw,
    /// Set the players starting chips.
    SetStartChips(Chips),
    /// Show the commands list.
    Help,
}

impl Command {
    /// Parses a chat line.
    ///
    /// Returns `None` if the line doesn't start with `prefix`, an error if the
    /// line starts with `prefix` but it is not a valid command.
    pub fn parse(prefix: &str, line: &str) -> Option<Result<Command, GameError>> {
        let line = line.trim().strip_prefix(prefix)?;

        let mut args = line.split_whitespace();
        let name = args.next().unwrap_or_default().to_ascii_lowercase();

        let cmd = match name.as_str() {
            "poker" | "new" => Ok(Command::NewGame),
            "player" | "p" => Ok(Self::parse_player(args.next(), args.next())),
            "deal" => Ok(Command::Deal),
            "draw" => Ok(Command::Draw),
            "money" => args
                .next()
                .unwrap_or_default()
                .parse()
                .map(Command::SetStartChips),
            "help" | "commands" => Ok(Command::Help),
            _ => Err(GameError::UnknownCommand(format!("{prefix}{name}"))),
        };

        Some(cmd)
    }

    fn parse_player(sub: Option<&str>, handle: Option<&str>) -> Command {
        let handle = handle.unwrap_or_default().to_string();
        match sub {
            Some("add") => Command::AddPlayer(handle),
            Some("del") => Command::RemovePlayer(handle),
            Some("clr") => Command::ClearPlayers,
            Some("list") => Command::ListPlayers,
            _ => Command::PlayerUsage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<Result<Command, GameError>> {
        Command::parse("$", line)
    }

    #[test]
    fn ignores_lines_without_prefix() {
        assert_eq!(parse("hello there"), None);
        assert_eq!(parse("deal"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn commands_and_aliases() {
        assert_eq!(parse("$poker"), Some(Ok(Command::NewGame)));
        assert_eq!(parse("$new"), Some(Ok(Command::NewGame)));
        assert_eq!(parse("$deal"), Some(Ok(Command::Deal)));
        assert_eq!(parse("  $DEAL  "), Some(Ok(Command::Deal)));
        assert_eq!(parse("$draw"), Some(Ok(Command::Draw)));
        assert_eq!(parse("$help"), Some(Ok(Command::Help)));
        assert_eq!(parse("$commands"), Some(Ok(Command::Help)));
    }

    #[test]
    fn player_commands() {
        assert_eq!(
            parse("$player add @alice"),
            Some(Ok(Command::AddPlayer("@alice".to_string())))
        );
        assert_eq!(
            parse("$p del @bob"),
            Some(Ok(Command::RemovePlayer("@bob".to_string())))
        );
        assert_eq!(parse("$p clr"), Some(Ok(Command::ClearPlayers)));
        assert_eq!(parse("$player list"), Some(Ok(Command::ListPlayers)));
        assert_eq!(parse("$player"), Some(Ok(Command::PlayerUsage)));
        assert_eq!(parse("$player kick @bob"), Some(Ok(Command::PlayerUsage)));

        // A missing handle is caught when the roster validates it.
        assert_eq!(
            parse("$player add"),
            Some(Ok(Command::AddPlayer(String::new())))
        );
    }

    #[test]
    fn money_command() {
        assert_eq!(
            parse("$money 250"),
            Some(Ok(Command::SetStartChips(Chips::new(250))))
        );
        assert_eq!(
            parse("$money 0"),
            Some(Err(GameError::InvalidAmount("0".to_string())))
        );
        assert_eq!(
            parse("$money"),
            Some(Err(GameError::InvalidAmount(String::new())))
        );
    }

    #[test]
    fn unknown_commands() {
        assert_eq!(
            parse("$ante"),
            Some(Err(GameError::UnknownCommand("$ante".to_string())))
        );
        assert_eq!(
            parse("$"),
            Some(Err(GameError::UnknownCommand("$".to_string())))
        );
    }

    #[test]
    fn custom_prefix() {
        assert_eq!(Command::parse("!", "!deal"), Some(Ok(Command::Deal)));
        assert_eq!(Command::parse("!", "$deal"), None);
    }
}
