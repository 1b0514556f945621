//! TCP listener and static file dispatch.

pub mod listener;
pub mod static_files;
