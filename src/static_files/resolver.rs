//! Maps a request onto a file under the server root.

use std::path::Path;

use bytes::Bytes;

use crate::http::error::HttpError;
use crate::http::mime::mime_type_for;
use crate::http::request::{Method, Request};
use crate::static_files::fs::{FileSystem, FsError};

/// Index document served for directory requests.
pub const INDEX_FILE: &str = "index.html";

/// A request target resolved to an existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: String,
    pub mime_type: &'static str,
}

#[derive(Debug, Clone)]
pub struct Resolver<F> {
    root: String,
    fs: F,
}

impl<F: FileSystem> Resolver<F> {
    pub fn new(root: impl Into<String>, fs: F) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    /// Resolves the request target to a file path and MIME type.
    ///
    /// The candidate is the root with the raw request target appended.
    /// A directory resolves to its `index.html`.
    pub async fn resolve(&self, request: &Request) -> Result<ResolvedFile, HttpError> {
        if request.method != Method::GET {
            return Err(HttpError::MethodNotAllowed);
        }

        if escapes_root(&request.path) {
            tracing::warn!(path = %request.path, "Refusing path outside the server root");
            return Err(HttpError::NotFound);
        }

        let candidate = format!("{}{}", self.root, request.path);
        let stat = self.fs.stat(Path::new(&candidate)).await.map_err(fs_error)?;

        let path = if stat.is_dir {
            let index = format!("{}/{}", candidate.trim_end_matches('/'), INDEX_FILE);
            let index_stat = self.fs.stat(Path::new(&index)).await.map_err(fs_error)?;
            if index_stat.is_dir {
                return Err(HttpError::NotFound);
            }
            index
        } else {
            candidate
        };

        let mime_type = mime_type_for(&path);
        Ok(ResolvedFile { path, mime_type })
    }

    /// Resolves the request and reads the file's bytes.
    pub async fn load(&self, request: &Request) -> Result<(ResolvedFile, Bytes), HttpError> {
        let resolved = self.resolve(request).await?;
        let content = self
            .fs
            .read_file(Path::new(&resolved.path))
            .await
            .map_err(fs_error)?;

        Ok((resolved, content))
    }
}

fn fs_error(err: FsError) -> HttpError {
    match err {
        FsError::NotFound => HttpError::NotFound,
        FsError::Io(e) => HttpError::Internal(e.to_string()),
    }
}

/// The target is appended to the root as a string, so it must start with
/// `/` and hold no `..` segment to stay below the root.
fn escapes_root(path: &str) -> bool {
    !path.starts_with('/') || path.split('/').any(|segment| segment == "..")
}
