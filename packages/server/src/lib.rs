//! Room synchronization server for coderoom.
//!
//! This library implements the authoritative room state store, the session
//! registry/broadcast hub, and the per-connection synchronization protocol
//! handler behind an axum WebSocket transport.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
