//! Deadline-bounded line reading.
//!
//! Requests are read one line at a time. The reader has to tell the connection
//! handler whether anything arrived before a failure, because an idle timeout
//! closes silently while a timeout in the middle of a request gets a 400.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tokio::time::{Instant, timeout_at};

/// Longest accepted line, terminator included.
pub const MAX_LINE_LEN: usize = 8192;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("connection closed")]
    Eof,
    #[error("connection closed in the middle of a line")]
    UnexpectedEof,
    #[error("read deadline exceeded")]
    Timeout { partial: bool },
    #[error("line longer than {} bytes", MAX_LINE_LEN)]
    TooLong,
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LineError {
    /// Whether any byte of the line was received before the failure.
    pub fn partial(&self) -> bool {
        match self {
            LineError::Eof => false,
            LineError::Timeout { partial } => *partial,
            LineError::Io(_) => false,
            LineError::UnexpectedEof | LineError::TooLong | LineError::InvalidUtf8 => true,
        }
    }
}

/// Reads one line terminated by `\r\n` or a bare `\n`, with the terminator
/// stripped.
///
/// Bytes that arrived before the deadline fired are consumed from `reader`
/// and reported through [`LineError::Timeout`]'s `partial` flag.
pub async fn read_line<R>(reader: &mut R, deadline: Instant) -> Result<String, LineError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::with_capacity(128);
    let mut limited = (&mut *reader).take(MAX_LINE_LEN as u64);

    let n = match timeout_at(deadline, limited.read_until(b'\n', &mut buf)).await {
        Ok(read) => read?,
        Err(_) => {
            return Err(LineError::Timeout {
                partial: !buf.is_empty(),
            });
        }
    };

    if n == 0 {
        return Err(LineError::Eof);
    }

    if buf.last() != Some(&b'\n') {
        if buf.len() >= MAX_LINE_LEN {
            return Err(LineError::TooLong);
        }
        return Err(LineError::UnexpectedEof);
    }

    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }

    String::from_utf8(buf).map_err(|_| LineError::InvalidUtf8)
}
