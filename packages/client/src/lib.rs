//! Client room controller for coderoom.
//!
//! Mirrors one room's state (code buffer, language, chat log) on the
//! client side, applies remote updates, and emits local intents over the
//! synchronization protocol.

pub mod controller;
pub mod error;
pub mod session;
pub mod templates;
