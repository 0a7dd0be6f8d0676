//! Server execution logic.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::usecase::{
    ChangeCodeUseCase, ChangeLanguageUseCase, ConnectSessionUseCase, DisconnectSessionUseCase,
    JoinRoomUseCase, SendChatUseCase,
};

use super::{
    handler::{http::health_check, websocket::websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Room synchronization server.
///
/// Owns the wired usecases and exposes the websocket endpoint, a health
/// check, and the static client bundle with an SPA index fallback (room
/// URLs are client-side routes).
pub struct Server {
    connect_session_usecase: Arc<ConnectSessionUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    change_code_usecase: Arc<ChangeCodeUseCase>,
    change_language_usecase: Arc<ChangeLanguageUseCase>,
    send_chat_usecase: Arc<SendChatUseCase>,
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
}

impl Server {
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        change_code_usecase: Arc<ChangeCodeUseCase>,
        change_language_usecase: Arc<ChangeLanguageUseCase>,
        send_chat_usecase: Arc<SendChatUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    ) -> Self {
        Self {
            connect_session_usecase,
            join_room_usecase,
            change_code_usecase,
            change_language_usecase,
            send_chat_usecase,
            disconnect_session_usecase,
        }
    }

    /// Run the server.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3000)
    /// * `static_dir` - Directory holding the built client bundle
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified
    /// address or if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
        static_dir: PathBuf,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            connect_session_usecase: self.connect_session_usecase,
            join_room_usecase: self.join_room_usecase,
            change_code_usecase: self.change_code_usecase,
            change_language_usecase: self.change_language_usecase,
            send_chat_usecase: self.send_chat_usecase,
            disconnect_session_usecase: self.disconnect_session_usecase,
        });

        // Any non-API path falls through to the client bundle, with
        // index.html as the SPA fallback for room routes
        let index = static_dir.join("index.html");
        let app = Router::new()
            .route("/ws", get(websocket_handler))
            .route("/api/health", get(health_check))
            .fallback_service(ServeDir::new(&static_dir).fallback(ServeFile::new(index)))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Room synchronization server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
