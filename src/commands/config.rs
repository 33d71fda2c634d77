use std::path::Path;

use anyhow::Result;

use crate::config::Config;

/// Handles the config command - generates or shows configuration
pub fn handle_config(path: Option<&Path>, show: bool, force: bool) -> Result<()> {
	let config_path = match path {
		Some(p) => p.to_path_buf(),
		None => Config::get_config_path()?,
	};

	if show {
		// Show current configuration
		let config = Config::load(path)?;
		let config_str = toml::to_string_pretty(&config)?;
		println!("Current configuration:\n");
		println!("{config_str}");
		println!("\nConfig file location: {}", config_path.display());
		return Ok(());
	}

	if config_path.exists() && !force {
		println!("Config file already exists at: {}", config_path.display());
		println!("Use --force to overwrite it.");
		return Ok(());
	}

	Config::default().save(&config_path)?;
	println!("Generated default configuration file at: {}", config_path.display());
	println!("\nYou can edit this file to customize flashkit's behavior.");
	Ok(())
}
