//! Grouping: split data lines into one output file per group tag.

use std::{collections::HashMap, fs, io::BufRead, path::{Path, PathBuf}};

use regex::Regex;
use serde::Serialize;

use crate::{error::{FlashkitError, Result}, utils::{open_input, sanitize_filename, verbatim_lines, write_atomic}};

/// Group tag to verbatim lines, in first-seen tag order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Groups {
	order:       Vec<String>,
	lines:       HashMap<String, Vec<String>>,
	/// Data lines scanned, including those without a tag.
	pub scanned: usize,
}

impl Groups {
	fn push(&mut self, tag: &str, line: String) {
		match self.lines.get_mut(tag) {
			Some(group) => group.push(line),
			None => {
				self.order.push(tag.to_string());
				self.lines.insert(tag.to_string(), vec![line]);
			}
		}
	}

	pub fn len(&self) -> usize { self.order.len() }

	pub fn is_empty(&self) -> bool { self.order.is_empty() }

	/// Iterates `(tag, lines)` in the order tags were first seen.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.order.iter().filter_map(|tag| self.lines.get(tag).map(|lines| (tag.as_str(), lines.as_slice())))
	}
}

/// Per-file result of writing groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupOutcome {
	pub written: Vec<PathBuf>,
	/// Tags whose file could not be written.
	pub failed:  Vec<String>,
}

/// Reads the first `header_lines` lines verbatim, terminators included.
pub fn read_header(path: &Path, header_lines: usize) -> Result<String> {
	let reader = open_input(path)?;
	let mut header = String::new();
	for entry in verbatim_lines(reader).take(header_lines) {
		let (_, line) = entry.map_err(|e| FlashkitError::from_io(path, e))?;
		header.push_str(&line);
	}
	Ok(header)
}

/// Collects data lines by the first match of `pattern` on each line.
///
/// Header lines are skipped as raw bytes, so an undecodable header does not
/// stop grouping.
pub fn collect_groups<R: BufRead>(mut reader: R, header_lines: usize, pattern: &Regex) -> std::io::Result<Groups> {
	let mut skipped = Vec::new();
	for _ in 0..header_lines {
		skipped.clear();
		if reader.read_until(b'\n', &mut skipped)? == 0 {
			break;
		}
	}

	let mut groups = Groups::default();
	for entry in verbatim_lines(reader) {
		let (_, line) = entry?;
		groups.scanned += 1;
		if let Some(m) = pattern.find(&line) {
			let tag = m.as_str().to_string();
			groups.push(&tag, line);
		}
	}
	Ok(groups)
}

/// Writes `<dir>/<tag>.txt` for every group.
///
/// A failure on one file is logged and that tag is skipped; the remaining
/// groups are still written.
pub fn write_groups(dir: &Path, header: &str, groups: &Groups) -> GroupOutcome {
	let mut outcome = GroupOutcome::default();
	for (tag, lines) in groups.iter() {
		let output_file = dir.join(format!("{}.txt", sanitize_filename(tag)));
		let chunks = std::iter::once(header).chain(lines.iter().map(String::as_str));
		match write_atomic(&output_file, chunks) {
			Ok(path) => {
				log::debug!("  -> Written: {}", path.display());
				outcome.written.push(path);
			}
			Err(e) => {
				log::error!("  Error writing file '{}' for tag '{tag}': {e}. Skipping.", output_file.display());
				outcome.failed.push(tag.to_string());
			}
		}
	}
	outcome
}

/// Groups the data lines of `input` into files under `target_dir`.
///
/// The target directory is created even when no group tag is found. Read
/// errors on the input and failure to create the directory are fatal.
pub fn group_by_tag(
	input: &Path,
	target_dir: &Path,
	header_lines: usize,
	pattern: &Regex,
	fallback_header: &str,
) -> Result<GroupOutcome> {
	log::info!("Step 3: Grouping lines from '{}' by tag pattern '{}'...", input.display(), pattern.as_str());

	let header = read_header(input, header_lines).unwrap_or_else(|e| {
		log::warn!("Could not read header lines from '{}': {e}. Output files will have a default header.", input.display());
		fallback_header.to_string()
	});

	fs::create_dir_all(target_dir).map_err(|e| FlashkitError::from_io(target_dir, e))?;
	log::info!(" -> Output directory: '{}'", target_dir.display());

	let reader = open_input(input)?;
	let groups = collect_groups(reader, header_lines, pattern).map_err(|e| FlashkitError::from_io(input, e))?;
	log::info!(" -> Processed {} data lines for grouping.", groups.scanned);
	log::info!(" -> Found {} unique tags.", groups.len());

	if groups.is_empty() {
		log::info!(" -> No tags matching '{}' found in data lines. No output files generated.", pattern.as_str());
		return Ok(GroupOutcome::default());
	}

	let outcome = write_groups(target_dir, &header, &groups);
	log::info!(" -> Successfully wrote {} files to '{}'.", outcome.written.len(), target_dir.display());
	Ok(outcome)
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	const HEADER: &str = "#separator:tab\n#html:true\n#tags column:3\n";

	fn pattern() -> Regex { Regex::new(r"Prelims-\d+").unwrap() }

	#[test]
	fn lines_are_grouped_by_first_match_in_encounter_order() {
		let input = format!(
			"{HEADER}q1\ta1\tENG Prelims-2\nq2\ta2\tENG\nq3\ta3\tPrelims-1 Prelims-2\nq4\ta4\tPrelims-2\r\n"
		);
		let groups = collect_groups(input.as_bytes(), 3, &pattern()).unwrap();

		assert_eq!(groups.scanned, 4);
		let collected: Vec<_> = groups.iter().collect();
		assert_eq!(collected.len(), 2);
		assert_eq!(collected[0].0, "Prelims-2");
		assert_eq!(collected[0].1, ["q1\ta1\tENG Prelims-2\n".to_string(), "q4\ta4\tPrelims-2\r\n".to_string()]);
		assert_eq!(collected[1].0, "Prelims-1");
		assert_eq!(collected[1].1, ["q3\ta3\tPrelims-1 Prelims-2\n".to_string()]);
	}

	#[test]
	fn header_lines_are_not_grouped() {
		let input = "#Prelims-9\nq\ta\tPrelims-1\n";
		let groups = collect_groups(input.as_bytes(), 1, &pattern()).unwrap();
		assert_eq!(groups.iter().map(|(tag, _)| tag).collect::<Vec<_>>(), vec!["Prelims-1"]);
	}

	#[test]
	fn header_is_read_verbatim() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("deck.txt");
		fs::write(&path, format!("{HEADER}q\ta\tx\n")).unwrap();

		assert_eq!(read_header(&path, 3).unwrap(), HEADER);
		assert_eq!(read_header(&path, 0).unwrap(), "");
		assert_eq!(read_header(&path, 10).unwrap(), format!("{HEADER}q\ta\tx\n"));
	}

	#[test]
	fn writes_one_file_per_tag() {
		let dir = TempDir::new().unwrap();
		let input = dir.path().join("deck.txt");
		fs::write(&input, format!("{HEADER}q1\ta1\tPrelims-1\nq2\ta2\tnone\nq3\ta3\tPrelims-1\nq4\ta4\tPrelims-3\n")).unwrap();
		let target = dir.path().join("out").join("ENG");

		let outcome = group_by_tag(&input, &target, 3, &pattern(), "#fallback\n").unwrap();

		assert!(outcome.failed.is_empty());
		assert_eq!(outcome.written.len(), 2);
		assert_eq!(
			fs::read_to_string(target.join("Prelims-1.txt")).unwrap(),
			format!("{HEADER}q1\ta1\tPrelims-1\nq3\ta3\tPrelims-1\n")
		);
		assert_eq!(fs::read_to_string(target.join("Prelims-3.txt")).unwrap(), format!("{HEADER}q4\ta4\tPrelims-3\n"));
	}

	#[test]
	fn no_tags_writes_nothing_but_creates_target() {
		let dir = TempDir::new().unwrap();
		let input = dir.path().join("deck.txt");
		fs::write(&input, format!("{HEADER}q1\ta1\tENG\n")).unwrap();
		let target = dir.path().join("out");

		let outcome = group_by_tag(&input, &target, 3, &pattern(), "#fallback\n").unwrap();

		assert_eq!(outcome, GroupOutcome::default());
		assert!(target.is_dir());
		assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
	}

	#[test]
	fn unreadable_header_falls_back_to_default() {
		let dir = TempDir::new().unwrap();
		let input = dir.path().join("deck.txt");
		let mut contents = b"#separator:tab\n#html:\xff\n#tags column:3\n".to_vec();
		contents.extend_from_slice(b"q1\ta1\tPrelims-1\n");
		fs::write(&input, contents).unwrap();
		let target = dir.path().join("out");

		let outcome = group_by_tag(&input, &target, 3, &pattern(), "#fallback\n").unwrap();

		assert_eq!(outcome.written, vec![target.join("Prelims-1.txt")]);
		assert_eq!(fs::read_to_string(target.join("Prelims-1.txt")).unwrap(), "#fallback\nq1\ta1\tPrelims-1\n");
	}

	#[test]
	fn header_skip_stops_at_end_of_input() {
		let groups = collect_groups("#only\n".as_bytes(), 3, &pattern()).unwrap();
		assert!(groups.is_empty());
		assert_eq!(groups.scanned, 0);
	}

	#[test]
	fn existing_target_directory_is_reused() {
		let dir = TempDir::new().unwrap();
		let input = dir.path().join("deck.txt");
		fs::write(&input, format!("{HEADER}q1\ta1\tPrelims-1\n")).unwrap();
		let target = dir.path().join("out");
		fs::create_dir_all(&target).unwrap();

		let first = group_by_tag(&input, &target, 3, &pattern(), "").unwrap();
		let contents = fs::read_to_string(target.join("Prelims-1.txt")).unwrap();
		let second = group_by_tag(&input, &target, 3, &pattern(), "").unwrap();

		assert_eq!(first, second);
		assert_eq!(fs::read_to_string(target.join("Prelims-1.txt")).unwrap(), contents);
	}

	#[test]
	fn failed_group_does_not_stop_the_others() {
		let dir = TempDir::new().unwrap();
		// A directory squatting on the destination name makes the rename fail.
		fs::create_dir_all(dir.path().join("Prelims-1.txt").join("occupied")).unwrap();

		let input = format!("{HEADER}q1\ta1\tPrelims-1\nq2\ta2\tPrelims-2\n");
		let groups = collect_groups(input.as_bytes(), 3, &pattern()).unwrap();
		let outcome = write_groups(dir.path(), HEADER, &groups);

		assert_eq!(outcome.failed, vec!["Prelims-1".to_string()]);
		assert_eq!(outcome.written, vec![dir.path().join("Prelims-2.txt")]);
		assert!(dir.path().join("Prelims-1.txt").is_dir());
		let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().filter_map(|e| e.ok()).collect();
		assert_eq!(leftovers.len(), 2, "no temp file left behind");
	}

	#[test]
	fn missing_input_is_fatal() {
		let dir = TempDir::new().unwrap();
		let err = group_by_tag(&dir.path().join("nope.txt"), dir.path(), 3, &pattern(), "").unwrap_err();
		assert!(matches!(err, FlashkitError::NotFound(_)));
	}
}
