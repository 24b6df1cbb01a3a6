//! Filesystem access for database and import paths via `cap-std`.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path for reading using ambient authority.
pub(crate) fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create the directory that will hold `path`, if it has one.
///
/// Returns the directory that was ensured so callers can report it.
pub(crate) fn ensure_parent_dir(path: &Utf8Path) -> io::Result<Option<Utf8PathBuf>> {
    let Some(parent) = path.parent() else {
        return Ok(None);
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(None);
    }

    let anchored = anchor(parent)?;
    let relative = anchored.strip_prefix("/").unwrap_or(&anchored);
    let root = fs_utf8::Dir::open_ambient_dir("/", ambient_authority())?;
    root.create_dir_all(relative)?;
    Ok(Some(parent.to_path_buf()))
}

/// Join a relative path onto the current directory.
///
/// A `Dir` opened at `.` cannot follow `..` above itself, so directories are
/// always created from the filesystem root.
fn anchor(path: &Utf8Path) -> io::Result<Utf8PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = Utf8PathBuf::try_from(std::env::current_dir()?)
        .map_err(camino::FromPathBufError::into_io_error)?;
    Ok(cwd.join(path))
}
