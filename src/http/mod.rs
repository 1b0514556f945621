//! HTTP protocol implementation.
//!
//! A restricted HTTP/1.1: GET only, no request bodies, requests on a
//! kept-alive connection handled strictly one after another.
//!
//! # Architecture
//!
//! - **`line`**: Reads CRLF-terminated lines under a deadline
//! - **`parser`**: Builds and validates a request from those lines
//! - **`request`**: HTTP request representation and header canonicalization
//! - **`response`**: The 200 / 400 / 404 responses and their builder
//! - **`writer`**: Serializes a response and streams the file body
//! - **`connection`**: The per-connection request-response state machine
//! - **`mime`**: MIME type detection based on file extensions
//! - **`date`**: HTTP-date formatting
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← Deadline reset, read one request
//!        └──────┬───────────┘
//!               │ Request parsed          ── EOF / idle timeout ──→ Closing
//!               ▼                         ── bad or partial ─────→ Rejecting (400)
//!        ┌──────────────────┐
//!        │     Serving      │ ← Build and write 200 / 404
//!        └──────┬───────────┘
//!               ├─ Keep-Alive → AwaitingRequest
//!               └─ Connection: close / write error → Closing
//! ```
//!
//! # Example
//!
//! ```ignore
//! use triton::http::connection::Connection;
//! use triton::server::static_files::StaticFiles;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let files = StaticFiles::new("./www");
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let files = files.clone();
//!         tokio::spawn(async move {
//!             if let Err(e) = Connection::new(socket, files).run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod date;
pub mod line;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
