// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Channel table task.
//!
//! Each chat channel has a table task that owns the channel [Session], all
//! commands for a channel go through the table commands channel so they are
//! executed one at a time.
use ahash::AHashMap;
use anyhow::{Result, bail};
use log::{error, info, warn};
use tokio::sync::{
    broadcast,
    mpsc::{self, error::TrySendError},
    oneshot,
};

use holdem_core::{Command, Event, PlayerHandle, Session, SessionConfig, SessionResult};

use crate::render;

/// A channel table.
#[derive(Debug)]
pub struct Table {
    /// The channel name.
    name: String,
    /// Channel for sending commands.
    commands_tx: mpsc::Sender<TableCommand>,
}

/// A message sent to member connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMessage {
    /// Sends text to a client.
    Send(String),
    /// Close a client connection.
    Close,
}

/// Command for the table task.
#[derive(Debug)]
enum TableCommand {
    /// Join this table.
    Join {
        handle: PlayerHandle,
        table_tx: mpsc::Sender<TableMessage>,
        resp_tx: oneshot::Sender<Result<()>>,
    },
    /// Leave this table.
    Leave(PlayerHandle),
    /// A chat line from a member.
    Line { from: PlayerHandle, line: String },
    /// Execute a session command and return its events.
    Execute {
        cmd: Command,
        resp_tx: oneshot::Sender<SessionResult>,
    },
}

impl Table {
    /// Creates a new table that manages members and the channel session.
    pub fn new(
        name: &str,
        config: SessionConfig,
        shutdown_broadcast_rx: broadcast::Receiver<()>,
        shutdown_complete_tx: mpsc::Sender<()>,
    ) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(128);

        let mut task = TableTask {
            name: name.to_string(),
            prefix: config.prefix.clone(),
            session: Session::new(config),
            members: AHashMap::default(),
            commands_rx,
            shutdown_broadcast_rx,
            _shutdown_complete_tx: shutdown_complete_tx,
        };

        tokio::spawn(async move {
            if let Err(err) = task.run().await {
                error!("Table {} error {err}", task.name);
            }

            info!("Table task for channel {} stopped", task.name);
        });

        Self {
            name: name.to_string(),
            commands_tx,
        }
    }

    /// The channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A member joins this table.
    ///
    /// Returns error if a member with the same handle has already joined.
    pub async fn join(
        &self,
        handle: &PlayerHandle,
        table_tx: mpsc::Sender<TableMessage>,
    ) -> Result<()> {
        let (resp_tx, resp_rx) = oneshot::channel();

        self.commands_tx
            .send(TableCommand::Join {
                handle: handle.clone(),
                table_tx,
                resp_tx,
            })
            .await?;

        resp_rx.await?
    }

    /// A member leaves the table.
    pub async fn leave(&self, handle: &PlayerHandle) {
        let _ = self
            .commands_tx
            .send(TableCommand::Leave(handle.clone()))
            .await;
    }

    /// Handles a chat line from a member.
    pub async fn line(&self, from: &PlayerHandle, line: &str) {
        let _ = self
            .commands_tx
            .send(TableCommand::Line {
                from: from.clone(),
                line: line.to_string(),
            })
            .await;
    }

    /// Executes a command on the channel session.
    pub async fn execute(&self, cmd: Command) -> Result<SessionResult> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.commands_tx
            .send(TableCommand::Execute { cmd, resp_tx })
            .await?;
        Ok(resp_rx.await?)
    }
}

struct TableTask {
    /// The channel name.
    name: String,
    /// The commands prefix.
    prefix: String,
    /// The channel game session.
    session: Session,
    /// The channel members connections.
    members: AHashMap<PlayerHandle, mpsc::Sender<TableMessage>>,
    /// Channel for receiving table commands.
    commands_rx: mpsc::Receiver<TableCommand>,
    /// Channel for listening shutdown notification.
    shutdown_broadcast_rx: broadcast::Receiver<()>,
    /// Sender that drops when this task is done.
    _shutdown_complete_tx: mpsc::Sender<()>,
}

impl TableTask {
    async fn run(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                // Server is shutting down exit this task.
                _ = self.shutdown_broadcast_rx.recv() => break Ok(()),
                res = self.commands_rx.recv() => match res {
                    Some(TableCommand::Join { handle, table_tx, resp_tx }) => {
                        let res = self.join(handle, table_tx);
                        let _ = resp_tx.send(res);
                    }
                    Some(TableCommand::Leave(handle)) => {
                        self.leave(&handle);
                    }
                    Some(TableCommand::Line { from, line }) => {
                        self.line(&from, &line);
                    }
                    Some(TableCommand::Execute { cmd, resp_tx }) => {
                        let res = self.session.handle(cmd);
                        let _ = resp_tx.send(res);
                    }
                    None => break Ok(()),
                },
            }
        }
    }

    fn join(&mut self, handle: PlayerHandle, table_tx: mpsc::Sender<TableMessage>) -> Result<()> {
        if self.members.contains_key(&handle) {
            bail!("{handle} already joined channel {}", self.name);
        }

        info!("{handle} joined channel {}", self.name);

        self.members.insert(handle.clone(), table_tx);
        let welcome = format!("Welcome {handle}! Type {}help to get started...", self.prefix);
        self.broadcast(&welcome);

        Ok(())
    }

    fn leave(&mut self, handle: &PlayerHandle) {
        if self.members.remove(handle).is_some() {
            info!("{handle} left channel {}", self.name);
            self.broadcast(&format!("{handle} left the channel."));
        }
    }

    fn line(&mut self, from: &PlayerHandle, line: &str) {
        if !self.members.contains_key(from) {
            info!("Ignoring line from {from}, not a member of channel {}", self.name);
            return;
        }

        // Relay chat to the other members.
        self.send_where(&format!("<{from}> {line}"), |handle| handle != from);

        let Some(cmd) = Command::parse(&self.prefix, line) else {
            return;
        };

        let res = cmd.and_then(|cmd| self.session.handle(cmd));
        match res {
            Ok(events) => self.deliver(&events),
            Err(err) => {
                info!("Command '{line}' from {from} failed: {err}");
                let text = render::error(&err, &self.prefix);
                self.send_where(&text, |handle| handle == from);
            }
        }
    }

    /// Sends events to members, private cards go only to the player they
    /// belong to.
    fn deliver(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::RevealTo { player, cards } => {
                    let text = render::reveal(player.as_str(), cards);
                    self.send_where(&text, |handle| handle == player);

                    let notice = format!("Cards dealt to {player}");
                    self.send_where(&notice, |handle| handle != player);
                }
                event => {
                    if let Some(text) = render::event(event) {
                        self.broadcast(&text);
                    }
                }
            }
        }
    }

    fn broadcast(&mut self, text: &str) {
        self.send_where(text, |_| true);
    }

    /// Queues a message for the members that match the filter.
    ///
    /// The table never waits on a member queue, members that are not reading
    /// their messages or that have gone away are dropped from the table.
    fn send_where(&mut self, text: &str, filter: impl Fn(&PlayerHandle) -> bool) {
        let mut dropped = Vec::new();
        for (handle, tx) in &self.members {
            if !filter(handle) {
                continue;
            }

            match tx.try_send(TableMessage::Send(text.to_string())) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!("{handle} queue is full, dropping from channel {}", self.name);
                    dropped.push(handle.clone());
                }
                Err(TrySendError::Closed(_)) => dropped.push(handle.clone()),
            }
        }

        for handle in dropped {
            if let Some(tx) = self.members.remove(&handle) {
                info!("{handle} dropped from channel {}", self.name);
                let _ = tx.try_send(TableMessage::Close);
            }
        }
    }
}

impl Drop for TableTask {
    fn drop(&mut self) {
        for tx in self.members.values() {
            let _ = tx.try_send(TableMessage::Close);
        }
    }
}
