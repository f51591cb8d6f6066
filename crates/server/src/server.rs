// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Chat server entry point.
use anyhow::{Result, anyhow, bail};
use log::{error, info};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tokio::{
    net::{TcpListener, TcpStream},
    signal,
    sync::{broadcast, mpsc},
    time::{self, Duration},
};

use holdem_core::{PlayerHandle, SessionConfig};

use crate::{
    connection::LineConnection,
    table::{Table, TableMessage},
    tables_pool::TablesPool,
};

/// Server config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// The server listening address.
    pub address: String,
    /// The server listening port.
    pub port: u16,
    /// The config for each channel session.
    pub session: SessionConfig,
}

/// The server that handles client connection and state.
#[derive(Debug)]
struct Server {
    /// The channel tables.
    tables: TablesPool,
    /// The server listener.
    listener: TcpListener,
    /// Shutdown notification channel.
    shutdown_broadcast_tx: broadcast::Sender<()>,
    /// Shutdown sender cloned by each connection.
    shutdown_complete_tx: mpsc::Sender<()>,
}

/// Client connection handler.
struct Handler {
    /// The client handle, set by the first line.
    handle: Option<PlayerHandle>,
    /// The table for the channel this client joined.
    table: Option<Arc<Table>>,
    /// The channel tables.
    tables: TablesPool,
    /// Sender given to tables to reach this connection.
    table_tx: mpsc::Sender<TableMessage>,
    /// Messages from the joined table.
    table_rx: mpsc::Receiver<TableMessage>,
    /// Channel for listening shutdown notification.
    shutdown_broadcast_rx: broadcast::Receiver<()>,
    /// Sender that drops when this connection is done.
    _shutdown_complete_tx: mpsc::Sender<()>,
}

/// Server entry point, runs until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.address, config.port);
    info!("Starting server listening on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow!("Tcp listener bind error: {e}"))?;

    serve(listener, config.session, signal::ctrl_c()).await
}

/// Serves connections from a listener until the shutdown future completes.
pub async fn serve<F: Future>(
    listener: TcpListener,
    session: SessionConfig,
    shutdown: F,
) -> Result<()> {
    let (shutdown_broadcast_tx, _) = broadcast::channel(1);
    let (shutdown_complete_tx, mut shutdown_complete_rx) = mpsc::channel(1);

    let mut server = Server {
        tables: TablesPool::new(session, &shutdown_broadcast_tx, &shutdown_complete_tx),
        listener,
        shutdown_broadcast_tx,
        shutdown_complete_tx,
    };

    tokio::select! {
        res = server.run() => {
            res.map_err(|e| anyhow!("Tcp listener accept error: {e}"))?;
        }
        _ = shutdown => {
            info!("Received shutdown signal...");
        }
    }

    let Server {
        tables,
        shutdown_broadcast_tx,
        shutdown_complete_tx,
        ..
    } = server;

    // Notify all connections and tables to start shutdown then wait for all of
    // them to terminate and drop their shutdown channel.
    let _ = shutdown_broadcast_tx.send(());
    drop(tables);
    drop(shutdown_broadcast_tx);
    drop(shutdown_complete_tx);
    let _ = shutdown_complete_rx.recv().await;

    Ok(())
}

impl Server {
    /// Runs the server.
    async fn run(&mut self) -> Result<()> {
        loop {
            let (socket, addr) = self.accept_with_retry().await?;
            info!("Accepted connection from {addr}");

            let (table_tx, table_rx) = mpsc::channel(128);
            let mut handler = Handler {
                handle: None,
                table: None,
                tables: self.tables.clone(),
                table_tx,
                table_rx,
                shutdown_broadcast_rx: self.shutdown_broadcast_tx.subscribe(),
                _shutdown_complete_tx: self.shutdown_complete_tx.clone(),
            };

            // Spawn a task to handle connection messages.
            tokio::spawn(async move {
                if let Err(err) = handler.run(socket).await {
                    error!("Connection to {addr} {err}");
                }

                info!("Connection to {addr} closed");
            });
        }
    }

    /// Accepts a connection with retries.
    async fn accept_with_retry(&self) -> Result<(TcpStream, SocketAddr)> {
        let mut retry = 0;
        loop {
            match self.listener.accept().await {
                Ok((socket, addr)) => {
                    return Ok((socket, addr));
                }
                Err(err) => {
                    if retry == 5 {
                        return Err(err.into());
                    }
                }
            }

            time::sleep(Duration::from_secs(1 << retry)).await;
            retry += 1;
        }
    }
}

impl Handler {
    /// Handle connection lines and table messages.
    async fn run(&mut self, socket: TcpStream) -> Result<()> {
        let mut conn = LineConnection::new(socket);
        conn.send("Send your handle to start, i.e. @alice").await?;

        let res = loop {
            tokio::select! {
                _ = self.shutdown_broadcast_rx.recv() => {
                    break Ok(());
                }
                msg = self.table_rx.recv() => match msg {
                    Some(TableMessage::Send(text)) => {
                        if let Err(err) = conn.send(&text).await {
                            break Err(err);
                        }
                    }
                    Some(TableMessage::Close) | None => break Ok(()),
                },
                res = conn.recv() => match res {
                    Some(Ok(line)) => match self.handle_line(&mut conn, &line).await {
                        Ok(true) => {}
                        Ok(false) => break Ok(()),
                        Err(err) => break Err(err),
                    },
                    Some(Err(err)) => break Err(err),
                    None => break Ok(()),
                },
            }
        };

        self.leave_table().await;
        conn.close().await;

        res
    }

    /// Handles a client line, returns false if the client wants to quit.
    async fn handle_line(&mut self, conn: &mut LineConnection, line: &str) -> Result<bool> {
        let Some(handle) = self.handle.clone() else {
            match PlayerHandle::new(line.trim()) {
                Ok(handle) => {
                    conn.send(&format!(
                        "Hello {handle}, join a channel with /join <channel>"
                    ))
                    .await?;
                    self.handle = Some(handle);
                    return Ok(true);
                }
                Err(err) => {
                    conn.send(&format!("{err}")).await?;
                    bail!("{err}");
                }
            }
        };

        if let Some(channel) = line.strip_prefix("/join") {
            self.join_table(conn, &handle, channel.trim()).await?;
        } else if line.trim() == "/quit" {
            return Ok(false);
        } else if let Some(table) = &self.table {
            table.line(&handle, line).await;
        } else {
            conn.send("Join a channel with /join <channel>").await?;
        }

        Ok(true)
    }

    async fn join_table(
        &mut self,
        conn: &mut LineConnection,
        handle: &PlayerHandle,
        channel: &str,
    ) -> Result<()> {
        if self
            .table
            .as_ref()
            .is_some_and(|table| table.name() == channel)
        {
            return Ok(());
        }

        let table = match self.tables.get_or_create(channel) {
            Ok(table) => table,
            Err(err) => return conn.send(&err.to_string()).await,
        };

        self.leave_table().await;

        match table.join(handle, self.table_tx.clone()).await {
            Ok(()) => self.table = Some(table),
            Err(err) => conn.send(&err.to_string()).await?,
        }

        Ok(())
    }

    async fn leave_table(&mut self) {
        if let (Some(table), Some(handle)) = (self.table.take(), &self.handle) {
            table.leave(handle).await;
        }
    }
}
