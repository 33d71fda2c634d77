//! Merges per-group files back into one export, ordered by group number.

use std::{fs, path::{Path, PathBuf}};

use regex::Regex;

use crate::{error::{FlashkitError, Result}, utils::{open_input, verbatim_lines, write_atomic}};

/// Files that went into a merge, and where the result landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
	pub output: PathBuf,
	pub merged: Vec<PathBuf>,
}

/// Lists `<prefix>-<N>.txt` files in `dir`, sorted by `N`.
pub fn group_files(dir: &Path, prefix: &str) -> Result<Vec<(u64, PathBuf)>> {
	let name_pattern = Regex::new(&format!(r"^{}-(\d+)\.txt$", regex::escape(prefix)))
		.map_err(|e| FlashkitError::Configuration(format!("invalid merge prefix {prefix:?}: {e}")))?;

	let entries = fs::read_dir(dir).map_err(|e| FlashkitError::from_io(dir, e))?;
	let mut files = Vec::new();
	for entry in entries {
		let entry = entry.map_err(|e| FlashkitError::from_io(dir, e))?;
		let path = entry.path();
		if !path.is_file() {
			continue;
		}
		let name = entry.file_name();
		let Some(number) = name
			.to_str()
			.and_then(|n| name_pattern.captures(n))
			.and_then(|caps| caps[1].parse::<u64>().ok())
		else {
			continue;
		};
		files.push((number, path));
	}
	files.sort();
	Ok(files)
}

/// Writes `<dir>/<dirname>_merged.txt`: `header` once, then every group
/// file's lines after its first `header_lines`.
pub fn merge_groups(dir: &Path, prefix: &str, header_lines: usize, header: &str) -> Result<MergeSummary> {
	if !dir.is_dir() {
		return Err(FlashkitError::NotFound(dir.to_path_buf()));
	}

	let files = group_files(dir, prefix)?;
	if files.is_empty() {
		log::warn!("No '{prefix}-N.txt' files found in '{}'. Writing header only.", dir.display());
	}

	let mut body = vec![header.to_string()];
	for (number, path) in &files {
		log::debug!("Merging {prefix}-{number} from {}", path.display());
		let reader = open_input(path)?;
		for entry in verbatim_lines(reader).skip(header_lines) {
			let (_, line) = entry.map_err(|e| FlashkitError::from_io(path, e))?;
			body.push(line);
		}
	}

	let output = dir.join(format!("{}_merged.txt", merged_stem(dir)));
	write_atomic(&output, &body)?;
	log::info!("Files merged successfully into {}", output.display());

	Ok(MergeSummary { output, merged: files.into_iter().map(|(_, path)| path).collect() })
}

fn merged_stem(dir: &Path) -> String {
	let resolved = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	resolved.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| "output".to_string())
}
