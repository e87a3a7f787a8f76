// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `cmx` - the CMX Repair Desk command line.
//!
//! Every invocation opens the shop database, runs one command and prints
//! its result as JSON. The signed-in user is remembered in the database
//! between invocations.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod cli;
mod commands;
mod line_item;

#[cfg(test)]
mod tests;

use clap::Parser;
use cmx::Store;
use cmx_assist::DiagnosticClient;
use cmx_persistence::Persistence;
use color_eyre::Result;
use time::OffsetDateTime;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::commands::Outcome;

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// the verbosity flags when set.
fn init_tracing(level: LevelFilter) {
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn open_persistence(args: &Args) -> Result<Persistence> {
    if args.in_memory {
        info!("Using in-memory database");
        Ok(Persistence::new_in_memory()?)
    } else {
        info!(path = %args.database.display(), "Using file-based database");
        Ok(Persistence::new_with_file(&args.database)?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    init_tracing(args.log_level());

    let persistence: Persistence = open_persistence(&args)?;
    let mut store: Store<Persistence> = Store::open(persistence)?;
    let today: String = OffsetDateTime::now_utc().date().to_string();

    match commands::run(&mut store, args.command, &today)? {
        Outcome::Text(text) => println!("{text}"),
        Outcome::Diagnose(request) => {
            drop(store);
            let client: DiagnosticClient = DiagnosticClient::from_env()?;
            println!("{}", commands::diagnose(&client, request).await?);
        }
    }

    Ok(())
}
