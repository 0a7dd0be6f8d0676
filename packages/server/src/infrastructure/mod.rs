//! Infrastructure layer: concrete implementations of the domain traits
//! plus the wire-format DTOs.

pub mod broadcast;
pub mod dto;
pub mod store;
