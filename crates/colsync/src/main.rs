#![warn(missing_docs)]

//! Entry point for the `colsync` binary.

mod cli;
mod error;
mod sync;

use std::{io, process};

use clap::Parser;
use logging::capture;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    let log_spec = log.spec();
    let env_filter = logging::env_filter_from_spec(&log_spec);

    let wants_events = matches!(&command, Commands::Sync(args) if args.events);
    let (capture_layer, events) = if wants_events {
        let (layer, handle) = capture::capture();
        (Some(layer), Some(handle))
    } else {
        (None, None)
    };
    registry()
        .with(env_filter)
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .with(capture_layer)
        .try_init()
        .ok();

    match command {
        Commands::Sync(args) => {
            let rendered = sync::run(&args, events.as_ref())?;
            println!("{rendered}");
        }
        Commands::Selector(args) => {
            for line in sync::selector(&args)? {
                println!("{line}");
            }
        }
    }
    Ok(())
}
