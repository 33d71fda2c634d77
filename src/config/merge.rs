use serde::{Deserialize, Serialize};

use super::defaults::{default_fallback_header, default_group_prefix, default_header_lines};

/// Settings for `flashkit merge`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
	/// File name prefix of the per-group files, e.g. `Prelims` for `Prelims-3.txt`
	#[serde(default = "default_group_prefix")]
	pub prefix: String,

	/// Header lines skipped in every input file
	#[serde(default = "default_header_lines")]
	pub header_lines: usize,

	/// Header written once at the top of the merged file
	#[serde(default = "default_fallback_header")]
	pub header: String,
}

impl Default for MergeConfig {
	fn default() -> Self {
		Self {
			prefix:       default_group_prefix(),
			header_lines: default_header_lines(),
			header:       default_fallback_header(),
		}
	}
}
