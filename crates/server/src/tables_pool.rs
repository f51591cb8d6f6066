// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tables pool, one table per chat channel.
use ahash::AHashMap;
use anyhow::{Result, bail};
use log::info;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

use holdem_core::SessionConfig;

use crate::table::Table;

/// Maximum channel name length.
pub const MAX_CHANNEL_LEN: usize = 32;

/// The channel tables, tables are created when the first member joins.
#[derive(Debug, Clone)]
pub struct TablesPool(Arc<Mutex<Shared>>);

#[derive(Debug)]
struct Shared {
    tables: AHashMap<String, Arc<Table>>,
    config: SessionConfig,
    shutdown_broadcast_tx: broadcast::Sender<()>,
    shutdown_complete_tx: mpsc::Sender<()>,
}

impl TablesPool {
    /// Creates a new empty pool, new tables use the given session config.
    pub fn new(
        config: SessionConfig,
        shutdown_broadcast_tx: &broadcast::Sender<()>,
        shutdown_complete_tx: &mpsc::Sender<()>,
    ) -> Self {
        let state = Shared {
            tables: AHashMap::default(),
            config,
            shutdown_broadcast_tx: shutdown_broadcast_tx.clone(),
            shutdown_complete_tx: shutdown_complete_tx.clone(),
        };

        Self(Arc::new(Mutex::new(state)))
    }

    /// Gets the table for a channel creating it if it doesn't exist.
    pub fn get_or_create(&self, channel: &str) -> Result<Arc<Table>> {
        let valid = (1..=MAX_CHANNEL_LEN).contains(&channel.len())
            && channel
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '_' | '-'));
        if !valid {
            bail!("Invalid channel name '{channel}'");
        }

        let mut pool = self.0.lock();
        if let Some(table) = pool.tables.get(channel) {
            return Ok(table.clone());
        }

        // Each channel session gets its own seed so channels don't deal the
        // same cards.
        let mut config = pool.config.clone();
        config.seed = config
            .seed
            .map(|seed| seed.wrapping_add(pool.tables.len() as u64));

        let table = Arc::new(Table::new(
            channel,
            config,
            pool.shutdown_broadcast_tx.subscribe(),
            pool.shutdown_complete_tx.clone(),
        ));

        info!("Created table for channel {channel}");
        pool.tables.insert(channel.to_string(), table.clone());

        Ok(table)
    }

    /// The channel names in this pool.
    pub fn channels(&self) -> Vec<String> {
        let mut names = self.0.lock().tables.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}
