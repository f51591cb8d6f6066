// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem bot game session engine.
//!
//! A [Session] holds the players roster and the current round, commands
//! parsed from chat lines move the round forward and return the [Event]s
//! the messaging layer should show:
//!
//! ```
//! use holdem_core::{Command, Event, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig {
//!     seed: Some(7),
//!     ..Default::default()
//! });
//!
//! for line in ["$p add @alice", "$p add @bob", "$poker", "$deal"] {
//!     let cmd = Command::parse("$", line).unwrap().unwrap();
//!     session.handle(cmd).unwrap();
//! }
//!
//! // Both players got their hole cards.
//! assert_eq!(session.deck().dealt(), 4);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod command;
pub use command::Command;

pub mod error;
pub use error::GameError;

pub mod event;
pub use event::Event;

pub mod poker;

pub mod roster;
pub use roster::{Player, PlayerHandle, Roster};

pub mod round;
pub use round::{RestartPolicy, Round, RoundState, Step};

pub mod session;
pub use session::{Session, SessionConfig, SessionResult};

pub mod showdown;
pub use showdown::{PlayerHand, ShowdownResolver, ShowdownResult, pick_winner};
