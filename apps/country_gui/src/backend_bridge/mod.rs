//! Backend worker: owns the async runtime and the HTTP client.

pub mod commands;
pub mod runtime;
