//! Parsing utilities for tab-separated export lines.

use std::io::{self, BufRead};

/// Field delimiter used by flashcard exports.
pub const FIELD_DELIMITER: char = '\t';

/// Strips a trailing `\n` or `\r\n` from a line read verbatim.
pub fn strip_line_terminator(line: &str) -> &str {
	let line = line.strip_suffix('\n').unwrap_or(line);
	line.strip_suffix('\r').unwrap_or(line)
}

/// Splits a verbatim line into its tab-separated fields.
///
/// The line terminator is not part of the last field, so
/// `"a\tb\n"` yields `["a", "b"]`.
pub fn split_fields(line: &str) -> Vec<&str> { strip_line_terminator(line).split(FIELD_DELIMITER).collect() }

/// True for empty or whitespace-only lines.
pub fn is_blank(line: &str) -> bool { line.trim().is_empty() }

/// Iterates over the lines of `reader`, keeping each line's terminator.
///
/// Yields `(line_number, line)` pairs with 1-based line numbers. Content that
/// is not valid UTF-8 surfaces as an `InvalidData` error.
pub fn verbatim_lines<R: BufRead>(mut reader: R) -> impl Iterator<Item = io::Result<(usize, String)>> {
	let mut line_num = 0;
	std::iter::from_fn(move || {
		let mut buf = String::new();
		match reader.read_line(&mut buf) {
			Ok(0) => None,
			Ok(_) => {
				line_num += 1;
				Some(Ok((line_num, buf)))
			}
			Err(e) => Some(Err(e)),
		}
	})
}
