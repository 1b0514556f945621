use std::collections::HashMap;

use thiserror::Error;
use tokio::io::AsyncBufRead;
use tokio::time::Instant;

use crate::http::line::{LineError, read_line};
use crate::http::request::{HTTP_VERSION, Method, Request, canonical_header_key};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request line {0:?}")]
    InvalidRequestLine(String),
    #[error("unsupported method {0:?}")]
    InvalidMethod(String),
    #[error("unsupported protocol version {0:?}")]
    InvalidVersion(String),
    #[error("header line without a colon: {0:?}")]
    MissingColon(String),
    #[error("header key is not alphanumeric or hyphen: {0:?}")]
    InvalidHeaderKey(String),
    #[error("invalid header value {0:?}")]
    InvalidHeaderValue(String),
    #[error("required header \"Host\" missing or empty")]
    MissingHost,
    #[error(transparent)]
    Line(#[from] LineError),
}

/// A failed attempt to read a request.
///
/// `bytes_received` tells the connection handler whether the client had
/// started a request, which decides between a silent close and a 400.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ReadError {
    pub error: ParseError,
    pub bytes_received: bool,
}

impl ReadError {
    fn new(error: impl Into<ParseError>, bytes_received: bool) -> Self {
        Self {
            error: error.into(),
            bytes_received,
        }
    }
}

/// Reads and validates the next request from `reader`.
///
/// Every line has to arrive before `deadline`.
pub async fn read_request<R>(reader: &mut R, deadline: Instant) -> Result<Request, ReadError>
where
    R: AsyncBufRead + Unpin,
{
    let line = match read_line(reader, deadline).await {
        Ok(line) => line,
        Err(e) => {
            let partial = e.partial();
            return Err(ReadError::new(e, partial));
        }
    };

    // An empty request line counts as nothing received, but still fails
    // validation below.
    let bytes_received = !line.is_empty();

    let (method, url, version) =
        parse_request_line(&line).map_err(|e| ReadError::new(e, bytes_received))?;

    tracing::debug!(request_line = %line, "Read request line");

    let mut headers = HashMap::new();
    let mut host = None;
    let mut close = false;

    loop {
        let line = read_line(reader, deadline)
            .await
            .map_err(|e| ReadError::new(e, bytes_received))?;

        if line.is_empty() {
            break;
        }

        let (key, value) =
            parse_header_line(&line).map_err(|e| ReadError::new(e, bytes_received))?;

        match key.as_str() {
            "Host" => {
                if value.is_empty() {
                    return Err(ReadError::new(ParseError::MissingHost, bytes_received));
                }
                host = Some(value);
            }
            "Connection" => {
                if value == "close" {
                    close = true;
                }
            }
            _ => {
                headers.insert(key, value);
            }
        }
    }

    let host = host.ok_or_else(|| ReadError::new(ParseError::MissingHost, bytes_received))?;

    Ok(Request {
        method,
        url,
        version,
        headers,
        host,
        close,
    })
}

/// Splits and validates `METHOD SP URL SP VERSION`.
pub fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
    let fields: Vec<&str> = line.split(' ').collect();

    let &[method, url, version] = fields.as_slice() else {
        return Err(ParseError::InvalidRequestLine(line.to_string()));
    };

    let method = Method::from_str(method)
        .ok_or_else(|| ParseError::InvalidMethod(method.to_string()))?;

    if version != HTTP_VERSION {
        return Err(ParseError::InvalidVersion(version.to_string()));
    }

    Ok((method, url.to_string(), version.to_string()))
}

/// Splits a header line on its first colon and validates both halves.
///
/// The returned key is in canonical form and the value is trimmed.
pub fn parse_header_line(line: &str) -> Result<(String, String), ParseError> {
    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| ParseError::MissingColon(line.to_string()))?;
    let value = value.trim();

    if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::InvalidHeaderKey(key.to_string()));
    }

    // Only a value of exactly one space is rejected here; other leading
    // whitespace is already gone after trimming.
    if value == " " || value.contains("\r\n") {
        return Err(ParseError::InvalidHeaderValue(value.to_string()));
    }

    Ok((canonical_header_key(key), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn parse_simple_get() {
        let mut req: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let deadline = Instant::now() + Duration::from_secs(1);

        let parsed = read_request(&mut req, deadline).await.unwrap();

        assert_eq!(parsed.url, "/");
        assert_eq!(parsed.host, "example.com");
        assert!(req.is_empty());
    }

    #[test]
    fn header_value_of_one_space_cannot_survive_trimming() {
        let (_, value) = parse_header_line("X-Pad:  ").unwrap();
        assert_eq!(value, "");
    }
}
