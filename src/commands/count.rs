use std::path::Path;

use anyhow::{Context, Result};

use crate::{config::NotesConfig, notes::{NoteRef, count_note_words}};

/// Handles the count command - counts words excluding bold text and headings
pub fn handle_count(config: &NotesConfig, note: &str, vault_dir: Option<&Path>) -> Result<()> {
	let vault_dir = vault_dir.or(config.vault_dir.as_deref());
	let path = NoteRef::parse(note)?.resolve(vault_dir)?;
	let count = count_note_words(&path).with_context(|| format!("Failed to count words in '{}'", path.display()))?;
	println!("Word count (excluding bold text and headings): {count}");
	Ok(())
}
