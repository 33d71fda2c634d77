//! Command-line interface for flashkit.
//!
//! - group: Validate a tab-separated export and split it into one file per tag
//! - merge: Join per-group files back into one export
//! - count: Count words in a markdown note, ignoring bold text and headings
//! - config: Generate or show the configuration file

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Main CLI structure parsed by clap.
#[derive(Parser)]
#[command(name = "flashkit")]
#[command(about = "Utilities for flashcard exports and notes", long_about = None)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,

	/// Increase log verbosity (-v debug, -vv trace)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	/// Use this config file instead of the default location
	#[arg(long, global = true)]
	pub config: Option<PathBuf>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
	/// Validate a TSV export and group its lines by tag into separate files
	///
	/// A subject subdirectory (e.g. ENG, GK) is used inside the output
	/// directory when every line carries the same subject tag.
	Group {
		/// Path to the input TSV file
		input: PathBuf,
		/// Base directory for the grouped files [default: output]
		#[arg(short, long)]
		output_dir: Option<PathBuf>,
		/// Expected number of columns per data line [default: 8]
		#[arg(short, long, allow_negative_numbers = true)]
		columns: Option<i64>,
		/// Number of header lines to skip and copy into every output file [default: 3]
		#[arg(short = 'H', long, allow_negative_numbers = true)]
		header_lines: Option<i64>,
		/// 1-based column holding the tags, used for subject detection [default: 8]
		#[arg(long, allow_negative_numbers = true)]
		tag_column: Option<i64>,
		/// Print the run summary as JSON
		#[arg(long)]
		json: bool,
	},
	/// Merge <prefix>-N.txt files of a directory into <dir>_merged.txt
	Merge {
		/// Directory holding the per-group files
		dir: PathBuf,
		/// File name prefix of the group files [default: Prelims]
		#[arg(short, long)]
		prefix: Option<String>,
		/// Header lines skipped in every group file [default: 3]
		#[arg(short = 'H', long, allow_negative_numbers = true)]
		header_lines: Option<i64>,
	},
	/// Count words in a markdown note, excluding bold text and ## headings
	Count {
		/// Note path or obsidian://open?vault=..&file=.. link
		note: String,
		/// Obsidian vault root used to resolve links
		#[arg(long)]
		vault_dir: Option<PathBuf>,
	},
	/// Generate a default config file, or show the current configuration
	Config {
		/// Show the current configuration instead of generating one
		#[arg(short, long)]
		show: bool,
		/// Overwrite an existing config file
		#[arg(short, long)]
		force: bool,
	},
}
