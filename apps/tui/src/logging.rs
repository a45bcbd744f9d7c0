use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Log file used while the terminal UI owns the screen.
pub const LOG_FILE: &str = "taipei-households.log";

fn env_filter(debug: bool) -> EnvFilter {
    // RUST_LOG wins; otherwise warn, or debug for this crate when DEBUG is set
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("warn,taipei_households=debug")
        } else {
            EnvFilter::new("warn")
        }
    })
}

/// Headless runs log to stderr, the TUI appends to [`LOG_FILE`].
pub fn init_tracing(headless: bool, debug: bool) -> color_eyre::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(debug));

    let result = if headless {
        registry
            .with(fmt::layer().with_writer(io::stderr))
            .try_init()
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(LOG_FILE)?;
        registry
            .with(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .try_init()
    };

    result.map_err(|e| eyre!("Failed to install tracing subscriber: {e}"))
}
