//! clce: reads colon-delimited commands from stdin and answers on stdout.
//!
//! Usage: `clce [--config <path>]`. Without `--config`, the file named by
//! `CLCE_CONFIG` is used if set. Diagnostics go to stderr; `RUST_LOG`
//! overrides the configured log filter.

mod command;
mod config;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chess_core::EngineTables;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use command::Command;
use config::ClceConfig;

fn parse_args() -> Result<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    let mut config_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config requires a path")?;
                config_path = Some(PathBuf::from(path));
            }
            other => bail!("unexpected argument '{other}'\nusage: clce [--config <path>]"),
        }
    }
    Ok(config_path)
}

fn init_logging(config: &ClceConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config_path = parse_args()?;
    let config = ClceConfig::load(config_path.as_deref()).context("loading configuration")?;
    init_logging(&config);

    let tables = EngineTables::new(config.zobrist_seed);
    info!(seed = config.zobrist_seed, search = ?config.search, "tables ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "READY")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        debug!(command = %line, "received");

        let outcome = Command::parse(&line).and_then(|cmd| cmd.run(&tables, &config.search, &mut stdout));
        if let Err(err) = outcome {
            eprintln!("Invalid command: {err}. Exiting...");
            std::process::exit(1);
        }
    }
    Ok(())
}
