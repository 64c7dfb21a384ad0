//! Filesystem access used by the resolver.
//!
//! The [`FileSystem`] trait is the only way the server touches disk, so
//! tests can swap in [`MemoryFs`].

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("path not found")]
    NotFound,

    #[error("IO error: {0}")]
    Io(std::io::Error),
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound,
            _ => FsError::Io(err),
        }
    }
}

/// What the resolver needs to know about a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
}

pub trait FileSystem: Send + Sync + 'static {
    fn stat(&self, path: &Path) -> impl Future<Output = Result<FileStat, FsError>> + Send;

    fn read_file(&self, path: &Path) -> impl Future<Output = Result<Bytes, FsError>> + Send;
}

/// The real filesystem, through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn stat(&self, path: &Path) -> impl Future<Output = Result<FileStat, FsError>> + Send {
        async move {
            let meta = tokio::fs::metadata(path).await?;
            Ok(FileStat { is_dir: meta.is_dir() })
        }
    }

    fn read_file(&self, path: &Path) -> impl Future<Output = Result<Bytes, FsError>> + Send {
        async move {
            let content = tokio::fs::read(path).await?;
            Ok(Bytes::from(content))
        }
    }
}

/// In-memory tree of files and directories.
///
/// Adding a file registers all of its ancestors as directories.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: HashMap<PathBuf, Bytes>,
    dirs: HashSet<PathBuf>,
    broken: HashSet<PathBuf>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Bytes>) -> Self {
        let path = path.into();
        for ancestor in path.ancestors().skip(1) {
            self.dirs.insert(ancestor.to_path_buf());
        }
        self.files.insert(path, content.into());
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        for ancestor in path.ancestors() {
            self.dirs.insert(ancestor.to_path_buf());
        }
        self
    }

    /// Makes every access to `path` fail with a non-NotFound I/O error.
    pub fn with_broken(mut self, path: impl Into<PathBuf>) -> Self {
        self.broken.insert(path.into());
        self
    }

    fn check_broken(&self, path: &Path) -> Result<(), FsError> {
        if self.broken.contains(path) {
            return Err(FsError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )));
        }
        Ok(())
    }
}

impl FileSystem for MemoryFs {
    fn stat(&self, path: &Path) -> impl Future<Output = Result<FileStat, FsError>> + Send {
        let result = self.check_broken(path).and_then(|_| {
            if self.files.contains_key(path) {
                Ok(FileStat { is_dir: false })
            } else if self.dirs.contains(path) {
                Ok(FileStat { is_dir: true })
            } else {
                Err(FsError::NotFound)
            }
        });
        std::future::ready(result)
    }

    fn read_file(&self, path: &Path) -> impl Future<Output = Result<Bytes, FsError>> + Send {
        let result = self.check_broken(path).and_then(|_| {
            if self.dirs.contains(path) {
                return Err(FsError::Io(std::io::Error::other("is a directory")));
            }
            self.files.get(path).cloned().ok_or(FsError::NotFound)
        });
        std::future::ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_fs_registers_parent_dirs() {
        let fs = MemoryFs::new().with_file("/www/css/site.css", &b"body{}"[..]);

        assert!(fs.stat(Path::new("/www/css")).await.unwrap().is_dir);
        assert!(fs.stat(Path::new("/www")).await.unwrap().is_dir);
        assert!(!fs.stat(Path::new("/www/css/site.css")).await.unwrap().is_dir);
        assert!(matches!(
            fs.stat(Path::new("/www/missing")).await,
            Err(FsError::NotFound)
        ));
    }

    #[test]
    fn io_not_found_is_distinguished() {
        let err: FsError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(matches!(err, FsError::NotFound));

        let err: FsError = std::io::Error::from(std::io::ErrorKind::PermissionDenied).into();
        assert!(matches!(err, FsError::Io(_)));
    }
}
