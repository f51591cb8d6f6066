// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Type definitions for events produced by a session.
use serde::{Deserialize, Serialize};

use crate::{poker::Card, roster::PlayerHandle, showdown::ShowdownResult};

/// An event for the messaging layer to render.
///
/// All events are public to the channel except [Event::RevealTo] that must be
/// delivered to the named player only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A plain text message.
    Text(String),
    /// A message with a title and an optional body.
    Titled {
        /// The message title.
        title: String,
        /// The message body.
        body: Option<String>,
    },
    /// Public cards display.
    Cards {
        /// The display title.
        title: String,
        /// The cards to show.
        cards: Vec<Card>,
    },
    /// Private cards for a player.
    RevealTo {
        /// The player the cards belong to.
        player: PlayerHandle,
        /// The player hole cards.
        cards: [Card; 2],
    },
    /// The showdown outcome.
    Winner(ShowdownResult),
    /// Usage text to show as a code block.
    Usage(String),
}

impl Event {
    /// Creates a text event.
    pub fn text(text: impl Into<String>) -> Self {
        Event::Text(text.into())
    }

    /// Creates a titled event.
    pub fn titled(title: impl Into<String>, body: Option<&str>) -> Self {
        Event::Titled {
            title: title.into(),
            body: body.map(str::to_string),
        }
    }

    /// Checks if this event must only be delivered to one player.
    pub fn is_private(&self) -> bool {
        matches!(self, Event::RevealTo { .. })
    }
}
