//! FileSystem port - abstraction over file I/O operations
//!
//! The writer, permission guard and promotion engine reach the disk only
//! through this trait.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;
use crate::error::NagstageError;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(PathBuf, std::io::Error),
}

impl FsError {
    /// Attach a path to an I/O error
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(path.to_path_buf(), err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(path, err) => write!(f, "{}: {}", path.display(), err),
        }
    }
}

impl std::error::Error for FsError {}

impl From<FsError> for NagstageError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::PermissionDenied(path) => NagstageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            )),
            FsError::NotFound(path) => NagstageError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )),
            FsError::Io(path, err) => NagstageError::Io(std::io::Error::new(
                err.kind(),
                format!("{}: {}", path.display(), err),
            )),
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with Unix modes
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Truncate-and-rewrite a file, then set its mode bits
    fn write(&self, path: &Path, content: &str, mode: u32) -> FsResult<()>;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Create directory and parents with the given mode
    fn create_dir_all(&self, path: &Path, mode: u32) -> FsResult<()>;

    /// Set mode bits on an existing path
    fn set_mode(&self, path: &Path, mode: u32) -> FsResult<()>;

    /// Whether files can be created inside a directory
    fn is_writable(&self, dir: &Path) -> bool;

    /// Content hash; a missing file yields `ContentHash::absent()`
    fn hash(&self, path: &Path) -> FsResult<ContentHash>;

    /// Move `from` over `to`, replacing it
    fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_display() {
        let err = FsError::NotFound(PathBuf::from("test.txt"));
        assert!(err.to_string().contains("test.txt"));
    }

    #[test]
    fn fs_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let fs_err = FsError::at(Path::new("/prod/objects"), io_err);
        assert!(matches!(fs_err, FsError::PermissionDenied(p) if p == Path::new("/prod/objects")));
    }

    #[test]
    fn denied_file_operation_is_an_io_error() {
        let err: NagstageError = FsError::PermissionDenied(PathBuf::from("/prod/hosts.cfg")).into();
        match err {
            NagstageError::Io(io) => {
                assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied);
                assert!(io.to_string().contains("/prod/hosts.cfg"));
            }
            other => panic!("expected Io, got {:?}", other),
        }
    }
}
