// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Renders session events as chat text.
use holdem_core::{
    Event, GameError, ShowdownResult,
    poker::{Card, HandRank, Rank, Suit},
};

/// Separator between cards.
const CARDS_SEP: &str = "   ";

/// Renders a card in bold using its rank and suit emoji, i.e. `**10:hearts:**`.
pub fn card(card: Card) -> String {
    let suit = match card.suit() {
        Suit::Clubs => ":clubs:",
        Suit::Diamonds => ":diamonds:",
        Suit::Hearts => ":hearts:",
        Suit::Spades => ":spades:",
    };

    match card.rank() {
        Rank::Ten => format!("**10{suit}**"),
        rank => format!("**{}{suit}**", rank.symbol()),
    }
}

/// Renders a list of cards.
pub fn cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|&c| card(c))
        .collect::<Vec<_>>()
        .join(CARDS_SEP)
}

/// The decorated name of a hand category.
pub fn hand_name(rank: HandRank) -> &'static str {
    match rank {
        HandRank::HighCard => "High Card :top:",
        HandRank::OnePair => "Pair :pear:",
        HandRank::TwoPairs => "Two Pair :pear::pear:",
        HandRank::ThreeOfAKind => "Three of a Kind :slot_machine:",
        HandRank::Straight => {
            "Straight :heart::yellow_heart::green_heart::blue_heart::purple_heart:"
        }
        HandRank::Flush => "Flush :toilet:",
        HandRank::FullHouse => "Full House :house_with_garden:",
        HandRank::FourOfAKind => "Four of a Kind :dart::dart::dart::dart:",
        HandRank::StraightFlush => "Straight/Royal Flush :dollar::crown::moneybag:",
    }
}

/// Renders the showdown winner announcement.
pub fn winner(result: &ShowdownResult) -> String {
    let hand = result.winner_hand();
    let mut text = format!(
        "{} wins with a **{}**",
        hand.handle,
        hand_name(hand.value.rank())
    );

    if !result.tied_with.is_empty() {
        let tied = result
            .tied_with
            .iter()
            .map(|h| h.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&format!(" (tied with {tied})"));
    }

    text
}

/// Renders every player hole cards and hand category in seat order.
pub fn hands(result: &ShowdownResult) -> String {
    let lines = result
        .hands
        .iter()
        .map(|hand| {
            format!(
                "{}: {} - {}",
                hand.handle,
                cards(&hand.hole_cards),
                hand_name(hand.value.rank())
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("== Hands ==\n{lines}")
}

/// Renders a public event, returns `None` for private events.
pub fn event(event: &Event) -> Option<String> {
    let text = match event {
        Event::Text(text) => text.clone(),
        Event::Titled { title, body } => match body {
            Some(body) => format!("== {title} ==\n{body}"),
            None => format!("== {title} =="),
        },
        Event::Cards { title, cards: c } if title.is_empty() => cards(c),
        Event::Cards { title, cards: c } => format!("== {title} ==\n{}", cards(c)),
        Event::Winner(result) => format!("{}\n{}", hands(result), winner(result)),
        Event::Usage(usage) => format!("```fix\n{usage}\n```"),
        Event::RevealTo { .. } => return None,
    };

    Some(text)
}

/// Renders a private cards reveal for the player who owns the cards.
pub fn reveal(player: &str, hole_cards: &[Card]) -> String {
    format!("== {player}'s Cards ==\n{}", cards(hole_cards))
}

/// Renders an error for the player who sent the command.
pub fn error(err: &GameError, prefix: &str) -> String {
    match err {
        GameError::InvalidPlayerCount { .. } => {
            format!("{err}. Use **{prefix}player** for more info...")
        }
        err => format!("{err}."),
    }
}
