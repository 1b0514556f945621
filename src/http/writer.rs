use std::collections::HashMap;

use anyhow::Context;
use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::{Response, StatusCode};

/// Chunk size used when streaming a file body.
const BODY_CHUNK_SIZE: usize = 8192;

/// Serializes the status line and headers, including the blank line that
/// ends them.
pub fn serialize_head(resp: &Response) -> BytesMut {
    let mut buf = BytesMut::with_capacity(256);

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        resp.version,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    write_sorted_headers(&resp.headers, &mut buf);

    buf
}

/// Writes every header as `Key: Value\r\n` in ascending key order, followed
/// by the terminating `\r\n`.
pub fn write_sorted_headers(headers: &HashMap<String, String>, buf: &mut BytesMut) {
    let mut keys: Vec<&String> = headers.keys().collect();
    keys.sort_unstable();

    for key in keys {
        buf.put_slice(key.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(headers[key].as_bytes());
        buf.put_slice(b"\r\n");
    }

    // Header/body separator
    buf.put_slice(b"\r\n");
}

pub struct ResponseWriter<'a> {
    response: &'a Response,
}

impl<'a> ResponseWriter<'a> {
    pub fn new(response: &'a Response) -> Self {
        Self { response }
    }

    /// Writes the head and, for a 200, streams the file body.
    pub async fn write_to<W>(&self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let head = serialize_head(self.response);
        stream.write_all(&head).await?;

        if self.response.status == StatusCode::Ok {
            if let Some(path) = &self.response.file_path {
                let mut file = tokio::fs::File::open(path)
                    .await
                    .with_context(|| format!("failed to open {}", path.display()))?;
                let mut chunk = vec![0u8; BODY_CHUNK_SIZE];

                loop {
                    let n = file.read(&mut chunk).await?;
                    if n == 0 {
                        break;
                    }
                    stream.write_all(&chunk[..n]).await?;
                }
            }
        }

        stream.flush().await?;

        Ok(())
    }
}
