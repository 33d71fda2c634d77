//! Validate → check subject → group, for a single export file.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;

use super::{group::{GroupOutcome, group_by_tag}, subject::{SubjectVocabulary, detect_subject}, validate::validate_structure};
use crate::error::Result;

/// Pipeline states. `Abort` and `Done` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
	Validate,
	CheckSubject,
	Group,
	Done,
	Abort,
}

/// Fully resolved inputs for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
	pub input:           PathBuf,
	pub output_dir:      PathBuf,
	pub columns:         usize,
	pub header_lines:    usize,
	/// 0-based index of the tag column.
	pub tag_index:       usize,
	pub vocabulary:      SubjectVocabulary,
	pub group_pattern:   Regex,
	pub fallback_header: String,
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
	pub input:       PathBuf,
	pub stage:       Stage,
	pub blank_lines: Vec<usize>,
	pub data_lines:  usize,
	pub subject:     Option<String>,
	pub target_dir:  PathBuf,
	#[serde(flatten)]
	pub outcome:     GroupOutcome,
}

/// Output directory for a document: `<base>/<subject>` or `<base>`.
pub fn target_dir(base: &Path, subject: Option<&str>) -> PathBuf {
	match subject {
		Some(tag) => base.join(tag),
		None => base.to_path_buf(),
	}
}

/// Runs the pipeline to a terminal stage.
///
/// Validation failure aborts before any directory is created. The subject
/// check only decides the destination directory.
pub fn run(options: &PipelineOptions) -> Result<PipelineSummary> {
	let mut stage = Stage::Validate;
	log::debug!("Stage: {stage:?}");

	let report = match validate_structure(&options.input, options.columns, options.header_lines)
		.and_then(|report| report.into_result(options.columns))
	{
		Ok(report) => report,
		Err(e) => {
			log::debug!("Stage: {:?}", Stage::Abort);
			return Err(e);
		}
	};
	log::info!(" -> Validation successful: Input file format is correct.");

	stage = advance(stage, Stage::CheckSubject);
	let subject = detect_subject(&options.input, options.header_lines, options.tag_index, &options.vocabulary);
	let target = target_dir(&options.output_dir, subject.as_deref());
	if subject.is_some() {
		log::info!(" -> Using subject-specific output directory: '{}'", target.display());
	} else {
		log::info!(" -> Using base output directory: '{}' (no consistent subject tag found)", target.display());
	}

	stage = advance(stage, Stage::Group);
	let outcome = group_by_tag(
		&options.input,
		&target,
		options.header_lines,
		&options.group_pattern,
		&options.fallback_header,
	)
	.inspect_err(|_| log::debug!("Stage: {:?}", Stage::Abort))?;

	stage = advance(stage, Stage::Done);
	Ok(PipelineSummary {
		input: options.input.clone(),
		stage,
		blank_lines: report.blank_lines,
		data_lines: report.data_lines,
		subject,
		target_dir: target,
		outcome,
	})
}

fn advance(from: Stage, to: Stage) -> Stage {
	log::debug!("Stage: {from:?} -> {to:?}");
	to
}

impl PipelineSummary {
	/// True when every group file was written.
	pub fn is_complete(&self) -> bool { self.outcome.failed.is_empty() }
}
