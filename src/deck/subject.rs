//! Subject detection: is one vocabulary tag present on every data line?

use std::{io::BufRead, path::Path};

use regex::Regex;

use crate::utils::{is_blank, open_input, split_fields, verbatim_lines};

/// Closed set of subject tags, matched as whole words.
#[derive(Debug, Clone)]
pub struct SubjectVocabulary {
	tags: Vec<(String, Regex)>,
}

impl SubjectVocabulary {
	pub fn new<I, S>(tags: I) -> Result<Self, regex::Error>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let tags = tags
			.into_iter()
			.map(|tag| {
				let tag: String = tag.into();
				let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&tag)))?;
				Ok((tag, pattern))
			})
			.collect::<Result<_, regex::Error>>()?;
		Ok(Self { tags })
	}

	/// Vocabulary tags found as whole words in `field`, in vocabulary order.
	pub fn matches<'a>(&'a self, field: &str) -> Vec<&'a str> {
		self.tags.iter().filter(|(_, re)| re.is_match(field)).map(|(tag, _)| tag.as_str()).collect()
	}

	pub fn tags(&self) -> impl Iterator<Item = &str> { self.tags.iter().map(|(tag, _)| tag.as_str()) }
}

/// Why a document has no single subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
	NoDataLines,
	/// The first data line carries no vocabulary tag.
	FirstLineUntagged { line: usize },
	/// A line carries more than one vocabulary tag.
	Ambiguous { line: usize, tags: Vec<String> },
	/// A line's tag (or lack of one) differs from the first line's.
	Mismatch { line: usize, expected: String, found: Option<String> },
	/// A line is too short to have the tag column.
	MissingColumn { line: usize, columns: usize },
}

/// Result of scanning a document for a uniform subject tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectCheck {
	Consistent { tag: String, lines_checked: usize },
	Inconsistent(Inconsistency),
}

/// Determines the document's subject tag, if it has exactly one.
///
/// Read errors downgrade to `None`; the caller keeps grouping into the base
/// directory.
pub fn detect_subject(path: &Path, header_lines: usize, tag_index: usize, vocabulary: &SubjectVocabulary) -> Option<String> {
	log::info!("Step 2: Checking for consistent subject tag in column {}...", tag_index + 1);

	let check = match open_input(path) {
		Ok(reader) => check_subject(reader, header_lines, tag_index, vocabulary),
		Err(e) => {
			log::warn!("Error reading file '{}' during subject tag check: {e}", path.display());
			return None;
		}
	};

	match check {
		Ok(SubjectCheck::Consistent { tag, lines_checked }) => {
			log::info!(" -> Consistent subject tag '{tag}' found across all {lines_checked} data lines.");
			Some(tag)
		}
		Ok(SubjectCheck::Inconsistent(reason)) => {
			log_inconsistency(&reason, tag_index, vocabulary);
			log::info!(" -> Subject tags are inconsistent or missing.");
			None
		}
		Err(e) => {
			log::warn!("Error reading file '{}' during subject tag check: {e}", path.display());
			None
		}
	}
}

/// Scans data lines, stopping at the first inconsistency.
pub fn check_subject<R: BufRead>(
	reader: R,
	header_lines: usize,
	tag_index: usize,
	vocabulary: &SubjectVocabulary,
) -> std::io::Result<SubjectCheck> {
	let mut first: Option<String> = None;
	let mut lines_checked = 0;

	for entry in verbatim_lines(reader) {
		let (line_num, line) = entry?;
		if line_num <= header_lines || is_blank(&line) {
			continue;
		}
		lines_checked += 1;

		let fields = split_fields(&line);
		let Some(field) = fields.get(tag_index) else {
			return Ok(SubjectCheck::Inconsistent(Inconsistency::MissingColumn { line: line_num, columns: fields.len() }));
		};

		let found = match vocabulary.matches(field).as_slice() {
			[] => None,
			[tag] => Some(tag.to_string()),
			many => {
				let tags = many.iter().map(ToString::to_string).collect();
				return Ok(SubjectCheck::Inconsistent(Inconsistency::Ambiguous { line: line_num, tags }));
			}
		};

		match first.as_deref() {
			None => {
				let Some(tag) = found else {
					return Ok(SubjectCheck::Inconsistent(Inconsistency::FirstLineUntagged { line: line_num }));
				};
				log::info!("  -> Found potential subject tag '{tag}' on line {line_num}. Checking consistency...");
				first = Some(tag);
			}
			Some(expected) if found.as_deref() != Some(expected) => {
				return Ok(SubjectCheck::Inconsistent(Inconsistency::Mismatch {
					line: line_num,
					expected: expected.to_string(),
					found,
				}));
			}
			Some(_) => {}
		}
	}

	Ok(match first {
		Some(tag) => SubjectCheck::Consistent { tag, lines_checked },
		None => SubjectCheck::Inconsistent(Inconsistency::NoDataLines),
	})
}

fn log_inconsistency(reason: &Inconsistency, tag_index: usize, vocabulary: &SubjectVocabulary) {
	match reason {
		Inconsistency::NoDataLines => log::info!("  Info: No data lines found to check for subject tags."),
		Inconsistency::FirstLineUntagged { line } => log::info!(
			"  Info: First data line ({line}) has no recognized subject tag ({}) in column {}.",
			vocabulary.tags().collect::<Vec<_>>().join(", "),
			tag_index + 1
		),
		Inconsistency::Ambiguous { line, tags } => log::info!(
			"  Info: Line {line} contains multiple subject tags ({}). Treating as inconsistent for directory naming.",
			tags.join(", ")
		),
		Inconsistency::Mismatch { line, expected, found } => log::info!(
			"  Info: Inconsistent subject tag found. Line {line} has tag '{}', expected '{expected}'.",
			found.as_deref().unwrap_or("none")
		),
		Inconsistency::MissingColumn { line, columns } => log::warn!(
			"Line {line} has fewer columns ({columns}) than the tag column ({}). Cannot check subject tag.",
			tag_index + 1
		),
	}
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	const HEADER: &str = "#separator:tab\n#html:true\n#tags column:3\n";

	fn vocab() -> SubjectVocabulary { SubjectVocabulary::new(["ENG", "GK", "MATH", "GI"]).unwrap() }

	fn check(body: &str) -> SubjectCheck {
		let input = format!("{HEADER}{body}");
		check_subject(input.as_bytes(), 3, 2, &vocab()).unwrap()
	}

	#[test]
	fn whole_word_matching() {
		let v = vocab();
		assert_eq!(v.matches("ENG Prelims-1"), vec!["ENG"]);
		assert!(v.matches("ENGINE GKX").is_empty());
		assert_eq!(v.matches("MATH::GI"), vec!["MATH", "GI"]);
	}

	#[test]
	fn uniform_tag_is_detected() {
		let result = check("q1\ta1\tENG Prelims-1\n\nq2\ta2\tPrelims-2 ENG\n");
		assert_eq!(result, SubjectCheck::Consistent { tag: "ENG".to_string(), lines_checked: 2 });
	}

	#[test]
	fn first_line_without_tag() {
		let result = check("q1\ta1\tPrelims-1\nq2\ta2\tENG\n");
		assert_eq!(result, SubjectCheck::Inconsistent(Inconsistency::FirstLineUntagged { line: 4 }));
	}

	#[test]
	fn multiple_tags_on_a_line_are_ambiguous() {
		let result = check("q1\ta1\tENG\nq2\ta2\tENG GK\n");
		assert_eq!(
			result,
			SubjectCheck::Inconsistent(Inconsistency::Ambiguous {
				line: 5,
				tags: vec!["ENG".to_string(), "GK".to_string()]
			})
		);
	}

	#[test]
	fn differing_or_missing_tag_is_a_mismatch() {
		let result = check("q1\ta1\tGK\nq2\ta2\tMATH\n");
		assert_eq!(
			result,
			SubjectCheck::Inconsistent(Inconsistency::Mismatch {
				line: 5,
				expected: "GK".to_string(),
				found: Some("MATH".to_string())
			})
		);

		let result = check("q1\ta1\tGK\nq2\ta2\tnothing\n");
		assert!(matches!(result, SubjectCheck::Inconsistent(Inconsistency::Mismatch { found: None, .. })));
	}

	#[test]
	fn tag_outside_the_tag_column_is_ignored() {
		let result = check("ENG\ta1\tPrelims-1\n");
		assert_eq!(result, SubjectCheck::Inconsistent(Inconsistency::FirstLineUntagged { line: 4 }));
	}

	#[test]
	fn short_line_is_inconsistent() {
		let result = check("q1\tENG\n");
		assert_eq!(result, SubjectCheck::Inconsistent(Inconsistency::MissingColumn { line: 4, columns: 2 }));
	}

	#[test]
	fn no_data_lines() {
		assert_eq!(check("\n  \n"), SubjectCheck::Inconsistent(Inconsistency::NoDataLines));
	}

	#[test]
	fn read_failure_downgrades_to_none() {
		let dir = TempDir::new().unwrap();
		assert_eq!(detect_subject(&dir.path().join("missing.txt"), 3, 2, &vocab()), None);
	}
}
