//! Word counting for markdown notes, leaving out bold spans and `##` headings.

use std::{io::BufRead, path::{Path, PathBuf}, sync::LazyLock};

use regex::Regex;
use url::Url;

use crate::{error::{FlashkitError, Result}, utils::{open_input, verbatim_lines}};

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern compiles"));

/// Where a note lives: a plain path or an `obsidian://open` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteRef {
	Path(PathBuf),
	/// `file` query parameter of an Obsidian link, percent-decoded, without `.md`.
	Obsidian { file: String },
}

impl NoteRef {
	/// Parses `obsidian://` links; anything else is taken as a path.
	pub fn parse(input: &str) -> Result<Self> {
		let input = input.trim().trim_matches('"');
		if !input.starts_with("obsidian://") {
			return Ok(Self::Path(PathBuf::from(input)));
		}

		let url = Url::parse(input)
			.map_err(|e| FlashkitError::Configuration(format!("invalid Obsidian link {input:?}: {e}")))?;
		let file = url
			.query_pairs()
			.find(|(key, _)| key == "file")
			.map(|(_, value)| value.into_owned())
			.filter(|file| !file.is_empty())
			.ok_or_else(|| FlashkitError::Configuration(format!("Obsidian link has no file parameter: {input}")))?;
		Ok(Self::Obsidian { file })
	}

	/// Resolves to a filesystem path; links need the vault root.
	pub fn resolve(&self, vault_dir: Option<&Path>) -> Result<PathBuf> {
		match self {
			Self::Path(path) => Ok(path.clone()),
			Self::Obsidian { file } => {
				let vault = vault_dir.ok_or_else(|| {
					FlashkitError::Configuration(
						"an Obsidian link needs a vault directory (--vault-dir or notes.vault_dir)".to_string(),
					)
				})?;
				Ok(vault.join(format!("{file}.md")))
			}
		}
	}
}

/// Counts the words on one line; `##` headings count zero.
pub fn count_line_words(line: &str) -> usize {
	if line.trim().starts_with("##") {
		return 0;
	}
	BOLD.replace_all(line, "").split_whitespace().count()
}

/// Counts words across every line of `reader`.
pub fn count_words<R: BufRead>(reader: R) -> std::io::Result<usize> {
	let mut total = 0;
	for entry in verbatim_lines(reader) {
		let (_, line) = entry?;
		total += count_line_words(&line);
	}
	Ok(total)
}

/// Counts the words in the note at `path`.
pub fn count_note_words(path: &Path) -> Result<usize> {
	let reader = open_input(path)?;
	count_words(reader).map_err(|e| FlashkitError::from_io(path, e))
}
