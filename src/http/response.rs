use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::http::date::http_date;
use crate::http::mime::mime_type_by_extension;
use crate::http::request::{HTTP_VERSION, Request};

/// File served when the resolved target is a directory.
pub const INDEX_FILE: &str = "index.html";

/// HTTP status codes the server produces.
///
/// - `Ok` (200): file found and served
/// - `BadRequest` (400): malformed or incomplete request
/// - `NotFound` (404): nothing at the requested path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use triton::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use triton::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// A response ready to be written to a client.
///
/// The body is never held in memory: a 200 response records the path of the
/// file to stream, and the writer reads it while sending.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Protocol version for the status line
    pub version: String,
    /// HTTP headers keyed by canonical name
    pub headers: HashMap<String, String>,
    /// The request this answers; `None` for a 400
    pub request: Option<Request>,
    /// File to stream as the body; `None` means no body
    pub file_path: Option<PathBuf>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::NotFound)
///     .header("Connection", "close")
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    request: Option<Request>,
    file_path: Option<PathBuf>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    ///
    /// Every response carries a `Date` header stamped at creation.
    pub fn new(status: StatusCode) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Date".to_string(), http_date(SystemTime::now()));

        Self {
            status,
            headers,
            request: None,
            file_path: None,
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Attaches the originating request, adding `Connection: close` if the
    /// client asked for it.
    pub fn request(mut self, req: Request) -> Self {
        if req.close {
            self.headers
                .insert("Connection".to_string(), "close".to_string());
        }
        self.request = Some(req);
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            version: HTTP_VERSION.to_string(),
            headers: self.headers,
            request: self.request,
            file_path: self.file_path,
        }
    }
}

impl Response {
    /// Creates a 200 OK response serving the file at `path`.
    ///
    /// A directory is served through its `index.html`. If the file's metadata
    /// can't be read the status stays 200, the metadata headers are sent
    /// empty, and writing the body will fail and close the connection.
    pub async fn ok(req: Request, path: &Path) -> Self {
        let mut path = path.to_path_buf();
        let mut meta = tokio::fs::metadata(&path).await;

        if meta.as_ref().is_ok_and(|m| m.is_dir()) {
            path.push(INDEX_FILE);
            meta = tokio::fs::metadata(&path).await;
        }

        let (last_modified, content_type, content_length) = match meta {
            Ok(meta) => {
                let ext = path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let last_modified = meta.modified().map(http_date).unwrap_or_default();

                (
                    last_modified,
                    mime_type_by_extension(&ext).to_string(),
                    meta.len().to_string(),
                )
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not read file metadata, sending empty headers"
                );
                (String::new(), String::new(), String::new())
            }
        };

        ResponseBuilder::new(StatusCode::Ok)
            .header("Last-Modified", last_modified)
            .header("Content-Type", content_type)
            .header("Content-Length", content_length)
            .request(req)
            .file(path)
            .build()
    }

    /// Creates a 400 Bad Request response.
    ///
    /// The connection is always closed after a 400.
    pub fn bad_request() -> Self {
        ResponseBuilder::new(StatusCode::BadRequest)
            .header("Connection", "close")
            .build()
    }

    /// Creates a 404 Not Found response.
    pub fn not_found(req: Request) -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .request(req)
            .build()
    }

    /// Whether the connection must be closed once this response is written.
    pub fn closes_connection(&self) -> bool {
        self.headers.get("Connection").is_some_and(|v| v == "close")
    }
}
