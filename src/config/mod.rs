mod defaults;
mod grouping;
mod merge;
mod notes;

use std::{env, fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
pub use grouping::GroupingConfig;
pub use merge::MergeConfig;
pub use notes::NotesConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the flashkit utilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
	#[serde(default)]
	pub grouping: GroupingConfig,
	#[serde(default)]
	pub merge:    MergeConfig,
	#[serde(default)]
	pub notes:    NotesConfig,
}

impl Config {
	/// Loads configuration from `path`, or from the default config file path.
	///
	/// A missing default file yields the built-in defaults; a missing explicit
	/// path is an error.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let config_path = match path {
			Some(p) => {
				if !p.exists() {
					anyhow::bail!("Config file not found: {}", p.display());
				}
				p.to_path_buf()
			}
			None => {
				let default_path = Self::get_config_path()?;
				if !default_path.exists() {
					log::debug!("No config file at {}, using defaults", default_path.display());
					return Ok(Self::default());
				}
				default_path
			}
		};

		let config_str = fs::read_to_string(&config_path)
			.with_context(|| format!("Failed to read config file {}", config_path.display()))?;
		let config = Self::from_toml(&config_str)?;
		log::debug!("Loaded config from {}", config_path.display());
		Ok(config)
	}

	/// Parses and validates a TOML document.
	pub fn from_toml(config_str: &str) -> Result<Self> {
		let config: Self = toml::from_str(config_str).context("Failed to parse config file")?;
		config.validate()?;
		Ok(config)
	}

	/// Saves the configuration to `path` with inline comments.
	pub fn save(&self, path: &Path) -> Result<()> {
		// Ensure parent directory exists
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).context("Failed to create config directory")?;
		}

		fs::write(path, self.to_toml_with_comments()).context("Failed to write config file")?;

		Ok(())
	}

	/// Generates TOML string with helpful inline comments for each field
	fn to_toml_with_comments(&self) -> String {
		let subject_tags =
			toml::Value::Array(self.grouping.subject_tags.iter().cloned().map(toml::Value::String).collect());
		format!(
			r#"# flashkit configuration file
# Command-line flags take precedence over these values

[grouping]
# Base directory for grouped files (a subject subdirectory may be added)
output_dir = {output_dir}
# Expected number of tab-separated columns per data line
columns = {columns}
# Header lines copied verbatim into every output file
header_lines = {header_lines}
# 1-based column holding the note tags (used for subject detection)
tag_column = {tag_column}
# Closed vocabulary of subject tags; a uniform one selects the subdirectory
subject_tags = {subject_tags}
# Regex matching the per-line group tag; the match names the output file
group_pattern = {group_pattern}
# Header used when the input's own header cannot be read
fallback_header = {fallback_header}

[merge]
# File name prefix of the per-group files, e.g. "Prelims" for Prelims-3.txt
prefix = {prefix}
# Header lines skipped in every input file
header_lines = {merge_header_lines}
# Header written once at the top of the merged file
header = {merge_header}

[notes]
{vault_dir}"#,
			output_dir = toml_str(&self.grouping.output_dir.to_string_lossy()),
			columns = self.grouping.columns,
			header_lines = self.grouping.header_lines,
			tag_column = self.grouping.tag_column,
			subject_tags = subject_tags,
			group_pattern = toml_str(self.grouping.group_pattern.as_str()),
			fallback_header = toml_str(&self.grouping.fallback_header),
			prefix = toml_str(&self.merge.prefix),
			merge_header_lines = self.merge.header_lines,
			merge_header = toml_str(&self.merge.header),
			vault_dir = match &self.notes.vault_dir {
				Some(dir) => format!("vault_dir = {}\n", toml_str(&dir.to_string_lossy())),
				None => "# Obsidian vault root used to resolve obsidian:// links\n# vault_dir = \"/path/to/vault\"\n"
					.to_string(),
			},
		)
	}

	/// Returns the platform-specific configuration file path following XDG spec.
	/// Priority order:
	/// 1. $XDG_CONFIG_HOME/flashkit/config.toml
	/// 2. ~/.config/flashkit/config.toml (Unix)
	/// 3. %APPDATA%\flashkit\config.toml (Windows)
	pub fn get_config_path() -> Result<PathBuf> {
		let config_dir = if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
			PathBuf::from(xdg_config)
		} else {
			dirs::config_dir().context("Failed to get config directory")?
		};

		Ok(config_dir.join("flashkit").join("config.toml"))
	}

	/// Validates the configuration values.
	pub fn validate(&self) -> Result<()> {
		let grouping = &self.grouping;
		if grouping.columns == 0 {
			anyhow::bail!("grouping.columns must be greater than 0");
		}

		if !(1..=grouping.columns).contains(&grouping.tag_column) {
			anyhow::bail!("grouping.tag_column must be between 1 and grouping.columns ({})", grouping.columns);
		}

		if grouping.subject_tags.is_empty() {
			anyhow::bail!("grouping.subject_tags must not be empty");
		}

		if let Some(tag) = grouping.subject_tags.iter().find(|t| !is_directory_name(t)) {
			anyhow::bail!("grouping.subject_tags entries must be single words usable as a directory name, got {tag:?}");
		}

		if self.merge.prefix.trim().is_empty() {
			anyhow::bail!("merge.prefix must not be empty");
		}

		Ok(())
	}
}

fn toml_str(s: &str) -> toml::Value { toml::Value::String(s.to_string()) }

/// Subject tags name the output subdirectory, so they must be one plain path component.
fn is_directory_name(tag: &str) -> bool {
	!tag.trim().is_empty() && !tag.contains(|c: char| c.is_whitespace() || c == '/' || c == '\\') && tag != "." && tag != ".."
}
