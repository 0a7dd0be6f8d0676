//! UseCase layer: one struct per protocol event contract.
//!
//! Each usecase is constructed over `Arc<dyn ...>` collaborators so the
//! transport layer stays free of storage and delivery concerns, and so
//! tests can swap in mocks.

mod change_code;
mod change_language;
mod connect_session;
mod disconnect_session;
mod error;
mod join_room;
mod send_chat;

pub use change_code::ChangeCodeUseCase;
pub use change_language::ChangeLanguageUseCase;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::StaleEvent;
pub use join_room::JoinRoomUseCase;
pub use send_chat::SendChatUseCase;
