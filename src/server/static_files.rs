//! Static file serving from a document root.

use std::io;
use std::path::{Path, PathBuf};

use crate::config::StaticFilesConfig;
use crate::http::request::Request;
use crate::http::response::Response;

/// Maps request URLs onto files under a document root.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    doc_root: PathBuf,
}

impl StaticFiles {
    pub fn new(doc_root: impl Into<PathBuf>) -> Self {
        Self {
            doc_root: doc_root.into(),
        }
    }

    pub fn from_config(cfg: &StaticFilesConfig) -> Self {
        Self::new(cfg.doc_root.clone())
    }

    pub fn doc_root(&self) -> &Path {
        &self.doc_root
    }

    /// Joins `url` onto the document root after cleaning it lexically.
    ///
    /// The URL is treated as rooted, so `..` segments stop at the document
    /// root instead of escaping it.
    ///
    /// ```
    /// # use triton::server::static_files::StaticFiles;
    /// # use std::path::Path;
    /// let files = StaticFiles::new("/srv/www");
    /// assert_eq!(files.resolve("/a/../b.html"), Path::new("/srv/www/b.html"));
    /// assert_eq!(files.resolve("/../../etc/passwd"), Path::new("/srv/www/etc/passwd"));
    /// ```
    pub fn resolve(&self, url: &str) -> PathBuf {
        let mut segments: Vec<&str> = Vec::new();

        for segment in url.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }

        let mut path = self.doc_root.clone();
        path.extend(segments);
        path
    }

    /// Builds the response for a valid request.
    ///
    /// A missing target, or one whose parent is a regular file, yields a
    /// 404. Any other filesystem error is returned and ends the connection
    /// that asked.
    pub async fn respond(&self, req: Request) -> io::Result<Response> {
        let path = self.resolve(&req.url);

        match tokio::fs::metadata(&path).await {
            Ok(_) => Ok(Response::ok(req, &path).await),
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                Ok(Response::not_found(req))
            }
            Err(e) => Err(e),
        }
    }
}
