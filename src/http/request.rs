use std::collections::HashMap;
use std::fmt;

/// The only protocol version the server speaks.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP request methods.
///
/// The server only serves static files, so GET is the only method it
/// accepts. Anything else, including a lowercase `get`, is rejected by the
/// parser with a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
}

/// A validated HTTP request.
///
/// `Host` and `Connection` never appear in `headers`; they are lifted into
/// the `host` and `close` fields by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The raw request target, e.g. "/index.html". Not yet resolved against
    /// the document root.
    pub url: String,
    /// Protocol version, always "HTTP/1.1" for a parsed request
    pub version: String,
    /// Remaining headers keyed by their canonical name
    pub headers: HashMap<String, String>,
    /// Value of the mandatory Host header, never empty
    pub host: String,
    /// Set when the client sent `Connection: close`
    pub close: bool,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    url: Option<String>,
    host: Option<String>,
    headers: HashMap<String, String>,
    close: bool,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use triton::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("POST"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            url: None,
            host: None,
            headers: HashMap::new(),
            close: false,
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Adds a header under its canonical name.
    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.insert(canonical_header_key(key), value.into());
        self
    }

    pub fn close(mut self, close: bool) -> Self {
        self.close = close;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let host = self.host.filter(|h| !h.is_empty()).ok_or("host missing")?;

        Ok(Request {
            method: Method::GET,
            url: self.url.ok_or("url missing")?,
            version: HTTP_VERSION.to_string(),
            headers: self.headers,
            host,
            close: self.close,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, in any letter case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&canonical_header_key(key))
            .map(|v| v.as_str())
    }
}

/// Normalizes a header name to canonical form.
///
/// The first letter and every letter following a hyphen are upper-cased,
/// all other letters lower-cased: `content-type` becomes `Content-Type`.
///
/// ```
/// # use triton::http::request::canonical_header_key;
/// assert_eq!(canonical_header_key("host"), "Host");
/// assert_eq!(canonical_header_key("cONTENT-tYPE"), "Content-Type");
/// ```
pub fn canonical_header_key(key: &str) -> String {
    let mut upper = true;

    key.chars()
        .map(|c| {
            let mapped = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            mapped
        })
        .collect()
}
