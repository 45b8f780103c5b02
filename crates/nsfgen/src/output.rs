//! Persisting serialized fixtures.
//!
//! Serialization never touches the filesystem; these helpers are the only
//! place bytes leave the process. `write_to` accepts any `Write` sink so
//! callers (and tests) can target memory, stdout or a file alike.
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Error returned by `write_file`.
#[derive(Debug)]
pub enum OutputError {
    /// Creating a directory or writing the file at `path` failed.
    ///
    /// `path` is the directory when creating a parent failed, otherwise
    /// the destination file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Io { path, .. } => write!(f, "failed to write {}", path.display()),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io { source, .. } => Some(source),
        }
    }
}

/// Write `bytes` to `sink` and flush it.
pub fn write_to<W: Write>(bytes: &[u8], sink: &mut W) -> io::Result<()> {
    sink.write_all(bytes)?;
    sink.flush()
}

/// Write `bytes` to `path`, creating missing parent directories.
///
/// An existing file is truncated and overwritten.
pub fn write_file<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), OutputError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let wrap = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(wrap)?;
    write_to(bytes, &mut file).map_err(wrap)
}
