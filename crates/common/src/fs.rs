//! Contains various `std::fs` wrapper functions that also contain the target path in their errors.

use crate::errors::FsPathError;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

type Result<T> = std::result::Result<T, FsPathError>;

/// Wrapper for [`std::fs::read_to_string`].
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|err| FsPathError::read(err, path))
}

/// Wrapper for [`std::fs::write`].
///
/// Writing into an existing file truncates it in place, so its permissions are kept.
pub fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, contents).map_err(|err| FsPathError::write(err, path))
}

/// Wrapper for [`std::fs::copy`].
pub fn copy(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<u64> {
    let (from, to) = (from.as_ref(), to.as_ref());
    fs::copy(from, to).map_err(|err| FsPathError::copy(err, from, to))
}

/// Wrapper for [`std::fs::create_dir_all`].
pub fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|err| FsPathError::create_dir(err, path))
}

/// Recursively removes `path`.
///
/// Removing a path that does not exist is not an error.
pub fn remove_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match fs::remove_dir_all(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            Err(FsPathError::remove_dir(err, path))
        }
        _ => Ok(()),
    }
}

/// Recursively copies the content of the directory `from` into `to`, creating `to` if needed.
///
/// Symlinks are followed, so linked packages are copied as regular files. When `to` lies inside
/// `from` it is skipped rather than copied into itself. Returns the number of files copied.
pub fn copy_dir_all(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<usize> {
    let (from, to) = (from.as_ref(), to.as_ref());
    if !from.is_dir() {
        return Err(FsPathError::NotADirectory { path: from.to_path_buf() });
    }
    create_dir_all(to)?;

    let root = dunce::canonicalize(from).unwrap_or_else(|_| from.to_path_buf());
    let skip = dunce::canonicalize(to).ok();
    let walk = WalkDir::new(&root).min_depth(1).follow_links(true).into_iter();
    let mut copied = 0;
    for entry in walk.filter_entry(|entry| skip.as_deref() != Some(entry.path())) {
        let entry = entry.map_err(|err| FsPathError::walk(err, from))?;
        let Ok(relative) = entry.path().strip_prefix(&root) else { continue };
        let dest = to.join(relative);
        if entry.file_type().is_dir() {
            create_dir_all(&dest)?;
        } else {
            copy(entry.path(), &dest)?;
            copied += 1;
        }
    }
    trace!(?from, ?to, copied, "copied directory");
    Ok(copied)
}

/// Returns all files under `root`, at any depth, whose file name contains `needle`.
///
/// The result is sorted by path.
pub fn files_with_name_containing(root: impl AsRef<Path>, needle: &str) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| FsPathError::walk(err, root))?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().contains(needle) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
