//! Shared utility functions used across the deck pipeline and commands.

mod fs;
mod parsing;

pub use fs::{open_input, sanitize_filename, write_atomic};
pub use parsing::{is_blank, split_fields, verbatim_lines};
