//! Triton - a minimal HTTP/1.1 static file server
//!
//! Core library for request parsing, response writing and connection
//! handling.

pub mod config;
pub mod http;
pub mod server;
