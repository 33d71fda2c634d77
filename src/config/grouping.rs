use std::{ops::Deref, path::PathBuf, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::defaults::{default_fallback_header, default_header_lines};

static DEFAULT_GROUP_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"Prelims-\d+").expect("default group pattern compiles"));

/// Compiled group-tag pattern with a string serde representation.
#[derive(Debug, Clone)]
pub struct GroupPattern(Regex);

impl GroupPattern {
	pub fn new(pattern: &str) -> Result<Self, regex::Error> { Regex::new(pattern).map(Self) }
}

impl Default for GroupPattern {
	fn default() -> Self { Self(DEFAULT_GROUP_PATTERN.clone()) }
}

impl Deref for GroupPattern {
	type Target = Regex;

	fn deref(&self) -> &Self::Target { &self.0 }
}

impl PartialEq for GroupPattern {
	fn eq(&self, other: &Self) -> bool { self.0.as_str() == other.0.as_str() }
}

impl Serialize for GroupPattern {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.0.as_str())
	}
}

impl<'de> Deserialize<'de> for GroupPattern {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Self::new(&s).map_err(serde::de::Error::custom)
	}
}

/// Settings for `flashkit group`. Command-line flags override these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingConfig {
	/// Base directory for grouped files
	#[serde(default = "default_output_dir")]
	pub output_dir: PathBuf,

	/// Expected number of tab-separated columns per data line
	#[serde(default = "default_columns")]
	pub columns: usize,

	/// Number of header lines copied verbatim into every output file
	#[serde(default = "default_header_lines")]
	pub header_lines: usize,

	/// 1-based column holding the note tags
	#[serde(default = "default_tag_column")]
	pub tag_column: usize,

	/// Closed vocabulary of subject tags
	#[serde(default = "default_subject_tags")]
	pub subject_tags: Vec<String>,

	/// Regex matching the per-line group tag
	#[serde(default)]
	pub group_pattern: GroupPattern,

	/// Header used when the input's header lines cannot be read
	#[serde(default = "default_fallback_header")]
	pub fallback_header: String,
}

fn default_output_dir() -> PathBuf { PathBuf::from("output") }

const fn default_columns() -> usize { 8 }

const fn default_tag_column() -> usize { 8 }

fn default_subject_tags() -> Vec<String> { ["ENG", "GK", "MATH", "GI"].map(String::from).to_vec() }

impl Default for GroupingConfig {
	fn default() -> Self {
		Self {
			output_dir:      default_output_dir(),
			columns:         default_columns(),
			header_lines:    default_header_lines(),
			tag_column:      default_tag_column(),
			subject_tags:    default_subject_tags(),
			group_pattern:   GroupPattern::default(),
			fallback_header: default_fallback_header(),
		}
	}
}
