// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem bot chat server.
//!
//! Clients connect over TCP and exchange text lines, the first line is the
//! client handle and `/join <channel>` moves the client to a channel. Lines
//! starting with the commands prefix drive the channel game session.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod connection;
pub mod render;
pub mod server;
pub use server::{Config, run, serve};
pub mod table;
pub mod tables_pool;
