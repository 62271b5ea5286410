//! Inbound interfaces. HTTP is the only one: an axum router over the engine.

pub mod http;
