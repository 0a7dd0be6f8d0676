//! Server state shared across request handlers.

use std::sync::Arc;

use crate::usecase::{
    ChangeCodeUseCase, ChangeLanguageUseCase, ConnectSessionUseCase, DisconnectSessionUseCase,
    JoinRoomUseCase, SendChatUseCase,
};

/// Shared application state: the usecases every connection dispatches into.
pub struct AppState {
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub change_code_usecase: Arc<ChangeCodeUseCase>,
    pub change_language_usecase: Arc<ChangeLanguageUseCase>,
    pub send_chat_usecase: Arc<SendChatUseCase>,
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
}
