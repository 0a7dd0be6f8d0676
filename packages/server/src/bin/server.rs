//! Collaborative code room synchronization server.
//!
//! Holds the authoritative state of every room (code buffer + language),
//! relays edits, language switches and chat between the room's sessions,
//! and serves the built client bundle.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin coderoom-server
//! cargo run --bin coderoom-server -- --host 0.0.0.0 --port 3000
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use coderoom_server::{
    domain::{RoomBroadcaster, RoomStore},
    infrastructure::{broadcast::WebSocketBroadcaster, store::InMemoryRoomStore},
    ui::Server,
    usecase::{
        ChangeCodeUseCase, ChangeLanguageUseCase, ConnectSessionUseCase,
        DisconnectSessionUseCase, JoinRoomUseCase, SendChatUseCase,
    },
};
use coderoom_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Collaborative code room synchronization server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to (defaults to the PORT environment
    /// variable when set)
    #[arg(short = 'p', long, default_value_t = default_port())]
    port: u16,

    /// Directory holding the built client bundle
    #[arg(long, default_value = "client/dist")]
    static_dir: PathBuf,
}

fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3000)
}

/// APP_ENV only affects logging verbosity, never protocol behavior.
fn default_log_level(app_env: &str) -> &'static str {
    if app_env == "production" { "info" } else { "debug" }
}

#[tokio::main]
async fn main() {
    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), default_log_level(&app_env));

    let args = Args::parse();
    tracing::info!("Environment: {}", app_env);

    // Initialize dependencies in order:
    // 1. Room store
    // 2. Broadcast hub + clock
    // 3. UseCases
    // 4. Server

    let store: Arc<dyn RoomStore> = Arc::new(InMemoryRoomStore::new());
    let hub: Arc<dyn RoomBroadcaster> = Arc::new(WebSocketBroadcaster::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(hub.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(store.clone(), hub.clone()));
    let change_code_usecase = Arc::new(ChangeCodeUseCase::new(store.clone(), hub.clone()));
    let change_language_usecase = Arc::new(ChangeLanguageUseCase::new(store.clone(), hub.clone()));
    let send_chat_usecase = Arc::new(SendChatUseCase::new(hub.clone(), clock));
    let disconnect_session_usecase = Arc::new(DisconnectSessionUseCase::new(hub));

    let server = Server::new(
        connect_session_usecase,
        join_room_usecase,
        change_code_usecase,
        change_language_usecase,
        send_chat_usecase,
        disconnect_session_usecase,
    );
    if let Err(e) = server.run(args.host, args.port, args.static_dir).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
