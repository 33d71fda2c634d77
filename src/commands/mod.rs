mod config;
mod count;
mod group;
mod merge;

use anyhow::Result;
pub use config::handle_config;
pub use count::handle_count;
pub use group::{GroupArgs, handle_group};
pub use merge::handle_merge;

use crate::{cli::Commands, config::Config};

/// Dispatches CLI commands to their respective handlers
pub fn handle_command(config: &Config, cmd: Commands) -> Result<()> {
	match cmd {
		Commands::Group { input, output_dir, columns, header_lines, tag_column, json } => {
			let args = GroupArgs { output_dir, columns, header_lines, tag_column };
			handle_group(&config.grouping, &input, args, json)
		}
		Commands::Merge { dir, prefix, header_lines } => handle_merge(&config.merge, &dir, prefix, header_lines),
		Commands::Count { note, vault_dir } => handle_count(&config.notes, &note, vault_dir.as_deref()),
		Commands::Config { .. } => Ok(()), // Never reached - config is handled in main.rs
	}
}
