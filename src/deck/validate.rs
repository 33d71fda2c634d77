//! Structural validation: every data line must have the expected column count.

use std::{io::BufRead, path::Path};

use serde::Serialize;

use crate::{error::{FlashkitError, Result}, utils::{is_blank, open_input, split_fields, verbatim_lines}};

/// Outcome of a structural validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
	/// 1-based numbers of data lines with the wrong column count.
	pub invalid_lines: Vec<usize>,
	/// 1-based numbers of empty or whitespace-only data lines. Informational.
	pub blank_lines:   Vec<usize>,
	pub total_lines:   usize,
	pub data_lines:    usize,
}

impl ValidationReport {
	pub fn is_valid(&self) -> bool { self.invalid_lines.is_empty() }

	/// Converts a failed report into a `Format` error.
	pub fn into_result(self, expected: usize) -> Result<Self> {
		if self.is_valid() { Ok(self) } else { Err(FlashkitError::Format { expected, lines: self.invalid_lines }) }
	}
}

/// Validates the file at `path`. Missing files and read errors are fatal.
pub fn validate_structure(path: &Path, expected_columns: usize, header_lines: usize) -> Result<ValidationReport> {
	log::info!("Step 1: Validating file structure '{}'...", path.display());
	log::info!(" -> Expecting {expected_columns} columns per data line.");
	log::info!(" -> Skipping first {header_lines} header lines.");

	let reader = open_input(path)?;
	let report = validate_lines(reader, expected_columns, header_lines).map_err(|e| FlashkitError::from_io(path, e))?;

	log::info!(" -> Processed {} total lines.", report.total_lines);
	log::info!(" -> Checked {} data lines.", report.data_lines);
	Ok(report)
}

/// Validates lines from any buffered reader.
pub fn validate_lines<R: BufRead>(
	reader: R,
	expected_columns: usize,
	header_lines: usize,
) -> std::io::Result<ValidationReport> {
	let mut report = ValidationReport::default();

	for entry in verbatim_lines(reader) {
		let (line_num, line) = entry?;
		report.total_lines = line_num;
		if line_num <= header_lines {
			continue;
		}

		report.data_lines += 1;
		if split_fields(&line).len() == expected_columns {
			continue;
		}

		if is_blank(&line) {
			log::info!("  Info: Line {line_num} is empty or whitespace-only.");
			report.blank_lines.push(line_num);
		} else {
			log::debug!("Line {line_num} has {} columns", split_fields(&line).len());
			report.invalid_lines.push(line_num);
		}
	}

	Ok(report)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use tempfile::TempDir;

	use super::*;

	const HEADER: &str = "#separator:tab\n#html:true\n#tags column:8\n";

	fn row(fields: usize) -> String { (1..=fields).map(|i| format!("f{i}")).collect::<Vec<_>>().join("\t") + "\n" }

	#[test]
	fn all_rows_valid() {
		let input = format!("{HEADER}{}{}", row(8), row(8));
		let report = validate_lines(input.as_bytes(), 8, 3).unwrap();
		assert!(report.is_valid());
		assert_eq!(report.total_lines, 5);
		assert_eq!(report.data_lines, 2);
	}

	#[test]
	fn short_and_long_rows_are_reported_with_file_line_numbers() {
		let input = format!("{HEADER}{}{}{}{}", row(8), row(7), row(8), row(9));
		let report = validate_lines(input.as_bytes(), 8, 3).unwrap();
		assert_eq!(report.invalid_lines, vec![5, 7]);
	}

	#[test]
	fn blank_lines_are_informational() {
		let input = format!("{HEADER}{}\n   \n{}", row(8), row(8));
		let report = validate_lines(input.as_bytes(), 8, 3).unwrap();
		assert!(report.is_valid());
		assert_eq!(report.blank_lines, vec![5, 6]);
	}

	#[test]
	fn header_lines_are_never_checked() {
		let report = validate_lines(HEADER.as_bytes(), 8, 3).unwrap();
		assert!(report.is_valid());
		assert_eq!(report.data_lines, 0);

		let no_header = validate_lines(HEADER.as_bytes(), 1, 0).unwrap();
		assert!(no_header.is_valid(), "each header line is a single field");
		assert_eq!(no_header.data_lines, 3);
	}

	#[test]
	fn crlf_terminator_does_not_change_field_count() {
		let input = format!("{HEADER}a\tb\tc\r\n");
		assert!(validate_lines(input.as_bytes(), 3, 3).unwrap().is_valid());
	}

	#[test]
	fn into_result_carries_line_numbers() {
		let report = ValidationReport { invalid_lines: vec![4, 6], ..Default::default() };
		match report.into_result(8) {
			Err(FlashkitError::Format { expected, lines }) => {
				assert_eq!(expected, 8);
				assert_eq!(lines, vec![4, 6]);
			}
			other => panic!("expected format error, got {other:?}"),
		}
	}

	#[test]
	fn missing_file_is_not_found() {
		let dir = TempDir::new().unwrap();
		let err = validate_structure(&dir.path().join("deck.txt"), 8, 3).unwrap_err();
		assert!(matches!(err, FlashkitError::NotFound(_)));
	}

	#[test]
	fn invalid_utf8_is_an_io_error() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("deck.txt");
		fs::write(&path, b"#h\n\xff\tx\n").unwrap();
		let err = validate_structure(&path, 2, 1).unwrap_err();
		assert!(matches!(err, FlashkitError::Io { .. }));
	}
}
