//! Default values shared by more than one config section.

/// Header lines in an Anki export: `#separator`, `#html` and `#tags column`.
pub const fn default_header_lines() -> usize { 3 }

/// Prefix of the per-group tags and file names, as in `Prelims-12`.
pub fn default_group_prefix() -> String { "Prelims".to_string() }

/// Header written when the input's own header cannot be read.
pub fn default_fallback_header() -> String { "#separator:tab\n#html:true\n#tags column:8\n".to_string() }
