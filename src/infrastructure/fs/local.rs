//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations on Unix.

use std::fs::{self, DirBuilder, Permissions};
use std::io::Write;
use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
use std::path::Path;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};
use crate::domain::value_objects::ContentHash;

/// `EXDEV`: rename across filesystems
const CROSS_DEVICE: i32 = 18;

/// Local file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &str, mode: u32) -> FsResult<()> {
        let mut file = fs::File::create(path).map_err(|e| FsError::at(path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| FsError::at(path, e))?;
        self.set_mode(path, mode)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        fs::remove_file(path).map_err(|e| FsError::at(path, e))
    }

    fn create_dir_all(&self, path: &Path, mode: u32) -> FsResult<()> {
        DirBuilder::new()
            .recursive(true)
            .mode(mode)
            .create(path)
            .map_err(|e| FsError::at(path, e))
    }

    fn set_mode(&self, path: &Path, mode: u32) -> FsResult<()> {
        fs::set_permissions(path, Permissions::from_mode(mode)).map_err(|e| FsError::at(path, e))
    }

    fn is_writable(&self, dir: &Path) -> bool {
        tempfile::Builder::new()
            .prefix(".nagstage-probe")
            .tempfile_in(dir)
            .is_ok()
    }

    fn hash(&self, path: &Path) -> FsResult<ContentHash> {
        match fs::read(path) {
            Ok(bytes) => Ok(ContentHash::from_bytes(&bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ContentHash::absent()),
            Err(e) => Err(FsError::at(path, e)),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if e.raw_os_error() == Some(CROSS_DEVICE) => {
                fs::copy(from, to).map_err(|e| FsError::at(to, e))?;
                fs::remove_file(from).map_err(|e| FsError::at(from, e))
            }
            Err(e) => Err(FsError::at(from, e)),
        }
    }
}
