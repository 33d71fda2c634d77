//! Error taxonomy shared by the deck pipeline, the merger and the word counter.

use std::{io, path::{Path, PathBuf}};

use thiserror::Error;

/// Errors raised while reading, validating or writing flashcard exports.
#[derive(Debug, Error)]
pub enum FlashkitError {
	/// Bad command-line arguments or configuration values.
	#[error("invalid configuration: {0}")]
	Configuration(String),

	#[error("input not found: {}", .0.display())]
	NotFound(PathBuf),

	/// One or more data lines have the wrong number of columns.
	#[error(
		"validation failed: {} data line(s) with incorrect number of columns (expected {expected}). Incorrect line numbers: {}",
		.lines.len(),
		join_line_numbers(.lines)
	)]
	Format { expected: usize, lines: Vec<usize> },

	#[error("permission denied: {}", .path.display())]
	PermissionDenied { path: PathBuf },

	#[error("I/O error on {}: {source}", .path.display())]
	Io {
		path:   PathBuf,
		#[source]
		source: io::Error,
	},
}

impl FlashkitError {
	/// Classifies an `io::Error` raised while touching `path`.
	pub fn from_io(path: &Path, source: io::Error) -> Self {
		match source.kind() {
			io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
			io::ErrorKind::PermissionDenied => Self::PermissionDenied { path: path.to_path_buf() },
			_ => Self::Io { path: path.to_path_buf(), source },
		}
	}
}

/// Renders line numbers as `"4, 9, 12"`.
pub fn join_line_numbers(lines: &[usize]) -> String {
	lines.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

pub type Result<T> = std::result::Result<T, FlashkitError>;
