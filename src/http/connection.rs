use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::Instant;

use crate::http::line::LineError;
use crate::http::parser::{ParseError, ReadError, read_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::static_files::StaticFiles;

/// Default idle timeout for each request attempt.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Connection<S = TcpStream> {
    stream: BufReader<S>,
    files: StaticFiles,
    read_timeout: Duration,
    state: ConnectionState,
}

pub enum ConnectionState {
    AwaitingRequest,
    Serving(Request),
    Rejecting,
    Closing,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, files: StaticFiles) -> Self {
        Self {
            stream: BufReader::new(stream),
            files,
            read_timeout: READ_TIMEOUT,
            state: ConnectionState::AwaitingRequest,
        }
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Serves requests until the client closes, times out, sends something
    /// invalid or asks for `Connection: close`.
    ///
    /// The stream is shut down on every exit path, including errors.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(error = %e, "Shutdown failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closing) {
                ConnectionState::AwaitingRequest => {
                    let deadline = Instant::now() + self.read_timeout;

                    self.state = match read_request(&mut self.stream, deadline).await {
                        Ok(req) => ConnectionState::Serving(req),
                        Err(e) => Self::on_read_error(e),
                    };
                }

                ConnectionState::Serving(req) => {
                    let url = req.url.clone();
                    let response = self.files.respond(req).await?;

                    tracing::info!(
                        url = %url,
                        status = response.status.as_u16(),
                        "Serving request"
                    );

                    ResponseWriter::new(&response)
                        .write_to(&mut self.stream)
                        .await?;

                    if !response.closes_connection() {
                        self.state = ConnectionState::AwaitingRequest;
                    }
                }

                ConnectionState::Rejecting => {
                    ResponseWriter::new(&Response::bad_request())
                        .write_to(&mut self.stream)
                        .await?;
                }

                ConnectionState::Closing => return Ok(()),
            }
        }
    }

    fn on_read_error(e: ReadError) -> ConnectionState {
        match &e.error {
            ParseError::Line(LineError::Eof) if !e.bytes_received => {
                tracing::debug!("Client closed connection");
                ConnectionState::Closing
            }
            ParseError::Line(LineError::Timeout { .. }) if !e.bytes_received => {
                tracing::debug!("Idle timeout, closing connection");
                ConnectionState::Closing
            }
            _ => {
                tracing::warn!(error = %e, bytes_received = e.bytes_received, "Bad request");
                ConnectionState::Rejecting
            }
        }
    }
}
