//! Whole-file load and store, plus output name derivation.
//!
//! ROM images are small enough to be handled as one buffer, so there is no
//! streaming here: [`load_file`] reads everything, [`write_file`] writes
//! everything.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::cli::constants::{DECOMPRESSED_INFIX, DEFAULT_EXTENSION};
use crate::displaylevel;

// ---------------------------------------------------------------------------
// Load / store
// ---------------------------------------------------------------------------

/// Reads the whole of `path` into memory.
///
/// Directories are rejected with [`io::ErrorKind::InvalidInput`].
pub fn load_file(path: &Path) -> io::Result<Vec<u8>> {
    if path.is_dir() {
        displaylevel!(1, "{} is a directory -- ignored\n", path.display());
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory", path.display()),
        ));
    }
    let data = fs::read(path)?;
    displaylevel!(4, "loaded {} ({} bytes)\n", path.display(), data.len());
    Ok(data)
}

/// Writes `data` to `path`, replacing any existing file.
pub fn write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    fs::write(path, data)?;
    displaylevel!(4, "wrote {} ({} bytes)\n", path.display(), data.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Output naming
// ---------------------------------------------------------------------------

/// Derives the default output path for `input`.
///
/// `dir/rom.z64` becomes `dir/rom.decompressed.z64`; an input without an
/// extension gets `.decompressed.z64`.
pub fn output_filename(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or(DEFAULT_EXTENSION);

    let mut name = stem.to_os_string();
    name.push(format!(".{}.{}", DECOMPRESSED_INFIX, ext));
    input.with_file_name(name)
}
