use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{config::GroupingConfig, deck::{self, PipelineOptions, SubjectVocabulary}, error::FlashkitError};

/// Command-line overrides for the `[grouping]` config section.
#[derive(Debug, Clone, Default)]
pub struct GroupArgs {
	pub output_dir:   Option<PathBuf>,
	pub columns:      Option<i64>,
	pub header_lines: Option<i64>,
	pub tag_column:   Option<i64>,
}

/// Handles the group command - validates, detects the subject and groups lines
pub fn handle_group(config: &GroupingConfig, input: &Path, args: GroupArgs, json: bool) -> Result<()> {
	let options = resolve_options(config, input, args)?;
	let summary =
		deck::run(&options).with_context(|| format!("Failed to process '{}'", options.input.display()))?;

	if json {
		println!("{}", serde_json::to_string_pretty(&summary)?);
	} else {
		println!("Wrote {} file(s) to {}", summary.outcome.written.len(), summary.target_dir.display());
	}

	if !summary.is_complete() {
		log::warn!("Skipped {} tag(s) that could not be written: {}", summary.outcome.failed.len(), summary.outcome.failed.join(", "));
	}
	Ok(())
}

/// Merges flags over config values and checks them before any I/O on the deck.
pub fn resolve_options(config: &GroupingConfig, input: &Path, args: GroupArgs) -> Result<PipelineOptions, FlashkitError> {
	if !input.is_file() {
		return Err(FlashkitError::NotFound(input.to_path_buf()));
	}

	let header_lines = match args.header_lines {
		Some(n) if n < 0 => {
			return Err(FlashkitError::Configuration("Number of header lines cannot be negative.".to_string()));
		}
		Some(n) => to_usize(n)?,
		None => config.header_lines,
	};

	let columns = match args.columns {
		Some(n) if n <= 0 => {
			return Err(FlashkitError::Configuration("Expected number of columns must be positive.".to_string()));
		}
		Some(n) => to_usize(n)?,
		None => config.columns,
	};

	let tag_column = args.tag_column.unwrap_or_else(|| i64::try_from(config.tag_column).unwrap_or(i64::MAX));
	if tag_column < 1 || usize::try_from(tag_column).map_or(true, |c| c > columns) {
		return Err(FlashkitError::Configuration(format!(
			"Tag column ({tag_column}) must be between 1 and the expected number of columns ({columns})."
		)));
	}

	let vocabulary = SubjectVocabulary::new(config.subject_tags.iter().cloned())
		.map_err(|e| FlashkitError::Configuration(format!("invalid subject tag: {e}")))?;

	Ok(PipelineOptions {
		input: input.to_path_buf(),
		output_dir: args.output_dir.unwrap_or_else(|| config.output_dir.clone()),
		columns,
		header_lines,
		tag_index: to_usize(tag_column - 1)?,
		vocabulary,
		group_pattern: (*config.group_pattern).clone(),
		fallback_header: config.fallback_header.clone(),
	})
}

fn to_usize(n: i64) -> Result<usize, FlashkitError> {
	usize::try_from(n).map_err(|_| FlashkitError::Configuration(format!("{n} is out of range")))
}
