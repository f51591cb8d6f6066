// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A game session for one channel.
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;

use crate::{
    command::{Command, HELP, PLAYER_USAGE},
    error::GameError,
    event::Event,
    poker::{Card, Chips, Deck, HandEvaluator, RankEvaluator},
    roster::Roster,
    round::{RestartPolicy, Round, RoundState, Step},
    showdown::ShowdownResolver,
};

/// Result type for session commands.
pub type SessionResult = Result<Vec<Event>, GameError>;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The chips given to players when they join.
    pub start_chips: Chips,
    /// What to do when a new game is requested during a round.
    pub restart_policy: RestartPolicy,
    /// The commands prefix.
    pub prefix: String,
    /// Seed for the session random generator, use entropy if not set.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_chips: Chips::new(100),
            restart_policy: RestartPolicy::default(),
            prefix: "$".to_string(),
            seed: None,
        }
    }
}

/// A game session with its roster and round.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    roster: Roster,
    round: Round,
    resolver: ShowdownResolver,
    rng: StdRng,
}

impl Session {
    /// Creates a session that ranks hands with a [RankEvaluator].
    pub fn new(config: SessionConfig) -> Self {
        Self::with_evaluator(config, Arc::new(RankEvaluator))
    }

    /// Creates a session with the given hand evaluator.
    pub fn with_evaluator(config: SessionConfig, evaluator: Arc<dyn HandEvaluator>) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            round: Round::new(&mut rng),
            roster: Roster::default(),
            resolver: ShowdownResolver::new(evaluator),
            config,
            rng,
        }
    }

    /// Executes a command.
    pub fn handle(&mut self, cmd: Command) -> SessionResult {
        match cmd {
            Command::NewGame => self.new_game(),
            Command::AddPlayer(handle) => self.add_player(&handle),
            Command::RemovePlayer(handle) => self.remove_player(&handle),
            Command::ClearPlayers => self.clear_players(),
            Command::ListPlayers => self.list_players(),
            Command::PlayerUsage => Ok(vec![Event::Usage(self.with_prefix(PLAYER_USAGE))]),
            Command::Deal => self.deal(),
            Command::Draw => self.draw(),
            Command::SetStartChips(chips) => self.set_start_chips(chips),
            Command::Help => self.help(),
        }
    }

    /// Shuffles a new deck and starts a game.
    pub fn new_game(&mut self) -> SessionResult {
        let discarded =
            self.round
                .start(&mut self.roster, self.config.restart_policy, &mut self.rng)?;

        let mut events = Vec::with_capacity(2);
        if discarded {
            events.push(Event::text("The round in progress has been discarded."));
        }

        events.push(Event::text(format!(
            "Deck shuffled. Use **{}deal** to start the game...",
            self.config.prefix
        )));

        Ok(events)
    }

    /// Deals the next cards.
    pub fn deal(&mut self) -> SessionResult {
        let title = self.round.state().deal_title().unwrap_or_default();
        let step = self.round.advance(&mut self.roster, &self.resolver)?;

        let next_msg = Event::text(format!(
            "Use **{}deal** to start the next round...",
            self.config.prefix
        ));

        let events = match step {
            Step::NewGameNeeded => vec![Event::text(format!(
                "Use **{}poker** to shuffle and start again",
                self.config.prefix
            ))],
            Step::HoleCards => {
                let mut events = vec![
                    Event::titled(title, None),
                    Event::text("Please wait until all cards are dealt..."),
                ];

                for player in self.roster.iter() {
                    if let Some(cards) = player.hole_cards {
                        events.push(Event::RevealTo {
                            player: player.handle.clone(),
                            cards,
                        });
                    }
                }

                events.push(next_msg);
                events
            }
            Step::Flop | Step::Turn => vec![self.board(title), next_msg],
            Step::River(result) => {
                let hand = result.winner_hand();
                let winner_cards = Event::Cards {
                    title: format!("{}'s Cards", hand.handle),
                    cards: hand.hole_cards.to_vec(),
                };

                vec![
                    self.board(title),
                    Event::Winner(result),
                    winner_cards,
                    Event::text(format!(
                        "Play again with **{p}new** or **{p}poker**!",
                        p = self.config.prefix
                    )),
                ]
            }
        };

        Ok(events)
    }

    /// Shows a random card from the deck without removing it.
    pub fn draw(&mut self) -> SessionResult {
        let card = self.round.deck().draw_random(&mut self.rng)?;
        Ok(vec![
            Event::text("Your card is: "),
            Event::Cards {
                title: String::new(),
                cards: vec![card],
            },
        ])
    }

    /// Adds a player to the roster.
    pub fn add_player(&mut self, handle: &str) -> SessionResult {
        self.check_not_in_progress()?;

        let player = self.roster.add(handle, self.config.start_chips)?;
        info!("Player {} joined with {} chips", player.handle, player.chips);

        Ok(vec![Event::text(format!(
            "{} was added to the game.",
            player.handle
        ))])
    }

    /// Removes a player from the roster.
    pub fn remove_player(&mut self, handle: &str) -> SessionResult {
        self.check_not_in_progress()?;

        let player = self.roster.remove(handle)?;
        info!("Player {} left", player.handle);

        Ok(vec![Event::text(format!(
            "{} was removed from the game.",
            player.handle
        ))])
    }

    /// Removes all players.
    pub fn clear_players(&mut self) -> SessionResult {
        self.check_not_in_progress()?;

        let count = self.roster.clear();
        info!("Removed {count} players");

        Ok(vec![Event::text("Players reset.")])
    }

    /// Lists players in seat order.
    pub fn list_players(&self) -> SessionResult {
        let handles = self.roster.list();
        let text = if handles.is_empty() {
            "No players.".to_string()
        } else {
            handles
                .iter()
                .map(|h| h.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Ok(vec![Event::Text(text)])
    }

    /// Sets the starting chips for new players and resets seated players chips.
    pub fn set_start_chips(&mut self, chips: Chips) -> SessionResult {
        self.check_not_in_progress()?;

        self.config.start_chips = chips;
        self.roster.set_chips(chips);
        info!("Starting chips set to {chips}");

        Ok(vec![Event::text(format!(
            "Starting balance set to {chips}."
        ))])
    }

    /// The commands list.
    pub fn help(&self) -> SessionResult {
        Ok(vec![Event::Usage(self.with_prefix(HELP))])
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The session players.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The current round state.
    pub fn state(&self) -> RoundState {
        self.round.state()
    }

    /// The community cards revealed so far.
    pub fn community(&self) -> &[Card] {
        self.round.community()
    }

    /// The current round deck.
    pub fn deck(&self) -> &Deck {
        self.round.deck()
    }

    fn board(&self, title: &str) -> Event {
        Event::Cards {
            title: title.to_string(),
            cards: self.round.community().to_vec(),
        }
    }

    fn check_not_in_progress(&self) -> Result<(), GameError> {
        if self.round.state().is_in_progress() {
            warn!("Rejected roster change in {:?} state", self.round.state());
            Err(GameError::GameInProgress)
        } else {
            Ok(())
        }
    }

    fn with_prefix(&self, text: &str) -> String {
        if self.config.prefix == "$" {
            text.to_string()
        } else {
            text.replace('$', &self.config.prefix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poker::{HandRank, HandValue};

    fn session() -> Session {
        Session::new(SessionConfig {
            seed: Some(42),
            ..Default::default()
        })
    }

    fn with_players(n: usize) -> Session {
        let mut session = session();
        for idx in 0..n {
            session.add_player(&format!("@p{idx}")).unwrap();
        }
        session
    }

    fn texts(events: &[Event]) -> Vec<&str> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn new_game_checks_player_count() {
        for n in [1, 10] {
            let mut session = with_players(n);
            assert_eq!(
                session.new_game(),
                Err(GameError::InvalidPlayerCount { count: n })
            );
            assert_eq!(session.state(), RoundState::Idle);
            assert_eq!(session.deck().dealt(), 0);
        }

        let err = with_players(1).new_game().unwrap_err();
        assert_eq!(
            err.to_string(),
            "You need 2-9 players to start a game, there are 1"
        );
    }

    #[test]
    fn two_players_round() {
        let mut session = with_players(2);

        let events = session.new_game().unwrap();
        assert_eq!(
            texts(&events),
            ["Deck shuffled. Use **$deal** to start the game..."]
        );

        // Pre-flop reveals hole cards privately.
        let events = session.deal().unwrap();
        assert_eq!(events[0], Event::titled("Round 1: Pre-Flop", None));
        let reveals = events
            .iter()
            .filter_map(|e| match e {
                Event::RevealTo { player, cards } => Some((player.as_str(), *cards)),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(reveals.len(), 2);
        assert_eq!(reveals[0].0, "@p0");
        assert_eq!(reveals[1].0, "@p1");
        assert_eq!(
            texts(&events).last(),
            Some(&"Use **$deal** to start the next round...")
        );

        let events = session.deal().unwrap();
        assert!(matches!(&events[0], Event::Cards { title, cards }
            if title == "Round 2: Flop" && cards.len() == 3));

        let events = session.deal().unwrap();
        assert!(matches!(&events[0], Event::Cards { title, cards }
            if title == "Round 3: Turn" && cards.len() == 4));

        let events = session.deal().unwrap();
        assert!(matches!(&events[0], Event::Cards { title, cards }
            if title == "Final Round: River" && cards.len() == 5));

        let Event::Winner(result) = &events[1] else {
            panic!("expected a winner event, got {:?}", events[1]);
        };
        let hand = result.winner_hand();
        assert!(!hand.value.name().is_empty());
        assert!(["@p0", "@p1"].contains(&hand.handle.as_str()));
        assert_eq!(
            events[2],
            Event::Cards {
                title: format!("{}'s Cards", hand.handle),
                cards: hand.hole_cards.to_vec(),
            }
        );
        assert_eq!(session.state(), RoundState::Complete);

        // Deal after the round is complete asks for a new game.
        let events = session.deal().unwrap();
        assert_eq!(
            texts(&events),
            ["Use **$poker** to shuffle and start again"]
        );
        assert_eq!(session.community().len(), 5);
    }

    #[test]
    fn deal_without_game() {
        let mut session = with_players(3);
        let events = session.deal().unwrap();
        assert_eq!(
            texts(&events),
            ["Use **$poker** to shuffle and start again"]
        );
        assert_eq!(session.state(), RoundState::Idle);
    }

    #[test]
    fn restart_policies() {
        let mut session = with_players(2);
        session.new_game().unwrap();
        session.deal().unwrap();
        session.deal().unwrap();

        let events = session.new_game().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(session.state(), RoundState::PreFlop);
        assert!(session.community().is_empty());

        let mut session = Session::new(SessionConfig {
            seed: Some(1),
            restart_policy: RestartPolicy::Reject,
            ..Default::default()
        });
        session.add_player("@alice").unwrap();
        session.add_player("@bob").unwrap();
        session.new_game().unwrap();
        assert_eq!(session.new_game(), Err(GameError::GameInProgress));
        assert_eq!(session.state(), RoundState::PreFlop);

        session.deal().unwrap();
        assert_eq!(session.new_game(), Err(GameError::GameInProgress));
        assert_eq!(session.state(), RoundState::Flop);

        // A completed round can be restarted.
        for _ in 0..3 {
            session.deal().unwrap();
        }
        assert_eq!(session.state(), RoundState::Complete);
        assert!(session.new_game().is_ok());
    }

    #[test]
    fn roster_changes_rejected_mid_round() {
        let mut session = with_players(2);
        session.new_game().unwrap();

        // Players may still change before hole cards are dealt.
        session.add_player("@late").unwrap();
        session.deal().unwrap();
        assert_eq!(session.deck().dealt(), 6);

        assert_eq!(session.add_player("@x"), Err(GameError::GameInProgress));
        assert_eq!(session.remove_player("@p0"), Err(GameError::GameInProgress));
        assert_eq!(session.clear_players(), Err(GameError::GameInProgress));
        assert_eq!(
            session.set_start_chips(Chips::new(5)),
            Err(GameError::GameInProgress)
        );
        assert_eq!(session.roster().len(), 3);

        // Listing is always allowed.
        let events = session.list_players().unwrap();
        assert_eq!(texts(&events), ["@p0, @p1, @late"]);

        while session.state() != RoundState::Complete {
            session.deal().unwrap();
        }

        session.remove_player("@late").unwrap();
        assert_eq!(session.roster().len(), 2);
    }

    #[test]
    fn removing_players_before_deal() {
        let mut session = with_players(2);
        session.new_game().unwrap();
        session.remove_player("@p1").unwrap();

        assert_eq!(
            session.deal(),
            Err(GameError::InvalidPlayerCount { count: 1 })
        );
        assert_eq!(session.state(), RoundState::PreFlop);
        assert_eq!(session.deck().dealt(), 0);
    }

    #[test]
    fn player_commands() {
        let mut session = session();

        let events = session.handle(Command::AddPlayer("@alice".into())).unwrap();
        assert_eq!(texts(&events), ["@alice was added to the game."]);

        assert_eq!(
            session.handle(Command::AddPlayer("alice".into())),
            Err(GameError::InvalidIdentifier("alice".into()))
        );
        assert_eq!(
            session.handle(Command::RemovePlayer("@bob".into())),
            Err(GameError::PlayerNotFound("@bob".into()))
        );

        let events = session.handle(Command::RemovePlayer("@alice".into())).unwrap();
        assert_eq!(texts(&events), ["@alice was removed from the game."]);

        let events = session.handle(Command::ListPlayers).unwrap();
        assert_eq!(texts(&events), ["No players."]);

        session.add_player("@bob").unwrap();
        let events = session.handle(Command::ClearPlayers).unwrap();
        assert_eq!(texts(&events), ["Players reset."]);
        assert!(session.roster().is_empty());

        let events = session.handle(Command::PlayerUsage).unwrap();
        assert_eq!(events, [Event::Usage(PLAYER_USAGE.to_string())]);
    }

    #[test]
    fn draw_does_not_consume() {
        let mut session = with_players(2);
        session.new_game().unwrap();
        session.deal().unwrap();

        for _ in 0..20 {
            let events = session.draw().unwrap();
            let Event::Cards { cards, .. } = &events[1] else {
                panic!("expected cards, got {:?}", events[1]);
            };
            assert_eq!(cards.len(), 1);
            assert!(session.deck().cards_left().contains(&cards[0]));
        }

        assert_eq!(session.deck().dealt(), 4);
    }

    #[test]
    fn money_sets_start_chips() {
        let mut session = with_players(2);
        let events = session.handle(Command::SetStartChips(Chips::new(1_500))).unwrap();
        assert_eq!(texts(&events), ["Starting balance set to 1,500."]);

        assert!(session.roster().iter().all(|p| p.chips == Chips::new(1_500)));

        session.add_player("@new").unwrap();
        assert_eq!(session.roster().get(2).unwrap().chips, Chips::new(1_500));
        assert_eq!(session.config().start_chips, Chips::new(1_500));
    }

    #[test]
    fn help_uses_prefix() {
        let mut session = Session::new(SessionConfig {
            prefix: "!".to_string(),
            seed: Some(3),
            ..Default::default()
        });

        let events = session.handle(Command::Help).unwrap();
        let Event::Usage(text) = &events[0] else {
            panic!("expected usage, got {:?}", events[0]);
        };
        assert!(text.starts_with("!help/!commands"));
        assert!(!text.contains('$'));

        session.add_player("@a").unwrap();
        session.add_player("@b").unwrap();
        let events = session.new_game().unwrap();
        assert_eq!(
            texts(&events),
            ["Deck shuffled. Use **!deal** to start the game..."]
        );
    }

    #[test]
    fn stub_evaluator_picks_first_best() {
        struct SeatEvaluator;

        // Every hand has the same strength.
        impl HandEvaluator for SeatEvaluator {
            fn evaluate(&self, _cards: &[Card]) -> HandValue {
                HandValue::with_strength(HandRank::OnePair, 7)
            }
        }

        let mut session = Session::with_evaluator(
            SessionConfig {
                seed: Some(8),
                ..Default::default()
            },
            Arc::new(SeatEvaluator),
        );
        for handle in ["@a", "@b", "@c"] {
            session.add_player(handle).unwrap();
        }

        session.new_game().unwrap();
        let events = (0..4).map(|_| session.deal().unwrap()).last().unwrap();
        let Event::Winner(result) = &events[1] else {
            panic!("expected a winner event, got {:?}", events[1]);
        };

        assert_eq!(result.winner, 0);
        assert_eq!(result.winner_hand().handle.as_str(), "@a");
        assert_eq!(result.tied_with.len(), 2);
    }
}
