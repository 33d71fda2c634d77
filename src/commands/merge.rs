use std::path::Path;

use anyhow::{Context, Result};

use crate::{config::MergeConfig, deck::merge_groups};

/// Handles the merge command - joins per-group files into `<dir>_merged.txt`
pub fn handle_merge(config: &MergeConfig, dir: &Path, prefix: Option<String>, header_lines: Option<i64>) -> Result<()> {
	let prefix = prefix.unwrap_or_else(|| config.prefix.clone());
	let header_lines = match header_lines {
		Some(n) => usize::try_from(n).map_err(|_| anyhow::anyhow!("Number of header lines cannot be negative."))?,
		None => config.header_lines,
	};

	let summary = merge_groups(dir, &prefix, header_lines, &config.header)
		.with_context(|| format!("Failed to merge files in '{}'", dir.display()))?;
	println!("Merged {} file(s) into {}", summary.merged.len(), summary.output.display());
	Ok(())
}
