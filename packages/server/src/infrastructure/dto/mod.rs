//! Data Transfer Objects for the synchronization protocol.
//!
//! Only one wire protocol exists (the websocket event channel); HTTP
//! endpoints respond with ad-hoc JSON values.

pub mod websocket;
