mod cli;
mod commands;
mod config;
mod deck;
mod error;
mod notes;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use commands::{handle_command, handle_config};
use config::Config;

/// Initializes `env_logger`; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
	let default_level = match verbose {
		0 => "info",
		1 => "debug",
		_ => "trace",
	};
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
		.format_timestamp(None)
		.format_target(false)
		.init();
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match cli.command {
		Commands::Config { show, force } => handle_config(cli.config.as_deref(), show, force)?,
		cmd => {
			// Load configuration
			let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
			handle_command(&config, cmd)?;
		}
	}

	Ok(())
}
