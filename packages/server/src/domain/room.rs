//! Authoritative per-room state.

use serde::{Deserialize, Serialize};

use super::value_object::Language;

/// Buffer contents a fresh room starts with.
pub const DEFAULT_CODE: &str = "// Start coding...";

/// Authoritative state of one room: the shared code buffer and the current
/// editor language.
///
/// Created lazily on first join and kept for the process lifetime. Every
/// code-change or language-change event fully overwrites the relevant
/// field in server arrival order (last write wins; no merge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomState {
    pub code: String,
    pub language: Language,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            code: DEFAULT_CODE.to_string(),
            language: Language::JavaScript,
        }
    }
}
