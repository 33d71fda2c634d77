use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for `flashkit count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesConfig {
	/// Obsidian vault root used to resolve `obsidian://open?...&file=` links
	#[serde(default)]
	pub vault_dir: Option<PathBuf>,
}
