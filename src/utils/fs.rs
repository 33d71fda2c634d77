//! Filesystem helpers: opening inputs and writing outputs atomically.

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::{fs::{self, File}, io::{BufReader, BufWriter, Write}, path::{Path, PathBuf}};

use tempfile::Builder;

use crate::error::{FlashkitError, Result};

/// Opens `path` for buffered reading, mapping failures onto the error taxonomy.
pub fn open_input(path: &Path) -> Result<BufReader<File>> {
	File::open(path).map(BufReader::new).map_err(|e| FlashkitError::from_io(path, e))
}

/// Writes `chunks` to `final_path` through a temp file in the same directory.
///
/// The temp file is renamed over the destination only after every chunk was
/// written and flushed. On any failure the temp file is dropped and removed,
/// so no partial output is left behind.
///
/// New files get the same mode as a plain `fs::write` (0666 minus umask on
/// unix). A replaced file keeps its previous permissions.
pub fn write_atomic<I, S>(final_path: &Path, chunks: I) -> Result<PathBuf>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let parent = match final_path.parent() {
		Some(p) if !p.as_os_str().is_empty() => p,
		_ => Path::new("."),
	};
	let io_err = |e| FlashkitError::from_io(final_path, e);

	let mut builder = Builder::new();
	#[cfg(unix)]
	builder.permissions(fs::Permissions::from_mode(0o666));
	let temp = builder.tempfile_in(parent).map_err(io_err)?;

	let mut writer = BufWriter::new(temp);
	for chunk in chunks {
		writer.write_all(chunk.as_ref().as_bytes()).map_err(io_err)?;
	}
	let temp = writer.into_inner().map_err(|e| io_err(e.into_error()))?;

	match fs::metadata(final_path) {
		Ok(existing) if existing.is_file() => temp.as_file().set_permissions(existing.permissions()).map_err(io_err)?,
		_ => {}
	}
	temp.persist(final_path).map_err(|e| io_err(e.error))?;
	Ok(final_path.to_path_buf())
}

/// Replaces characters that cannot appear in a file name.
pub fn sanitize_filename(name: &str) -> String { name.replace(['/', '\\'], "-").replace(' ', "_") }
