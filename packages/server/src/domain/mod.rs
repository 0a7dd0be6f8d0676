//! Domain layer: value objects, entities, and the traits the rest of the
//! crate is wired through.

mod broadcast;
mod chat;
mod room;
mod store;
mod value_object;

pub use broadcast::{BroadcastError, RoomBroadcaster, SessionChannel};
pub use chat::ChatMessage;
pub use room::{DEFAULT_CODE, RoomState};
pub use store::RoomStore;
pub use value_object::{Language, RoomId, SessionId, ValueObjectError};

#[cfg(test)]
pub use store::MockRoomStore;
