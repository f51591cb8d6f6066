// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use clap::Parser;
use holdem_core::{RestartPolicy, SessionConfig, poker::Chips};
use holdem_server::server;
use log::error;

#[derive(Debug, Parser)]
struct Cli {
    /// The server listening address.
    #[clap(long, short, default_value = "127.0.0.1")]
    address: String,
    /// The server listening port.
    #[clap(long, short, default_value_t = 9872)]
    port: u16,
    /// The commands prefix.
    #[clap(long, default_value = "$")]
    prefix: String,
    /// The players starting chips.
    #[clap(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    start_chips: u32,
    /// What to do on a new game request during a round (discard or reject).
    #[clap(long, default_value_t = RestartPolicy::Discard)]
    restart_policy: RestartPolicy,
    /// Seed for dealing reproducible games.
    #[clap(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = holdem_server::Config {
        address: cli.address,
        port: cli.port,
        session: SessionConfig {
            start_chips: Chips::new(cli.start_chips),
            restart_policy: cli.restart_policy,
            prefix: cli.prefix,
            seed: cli.seed,
        },
    };

    if let Err(e) = server::run(config).await {
        error!("{e}");
    }
}
