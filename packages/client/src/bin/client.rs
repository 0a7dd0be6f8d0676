//! CLI room client for the collaborative code room.
//!
//! Connects to a room server, joins a room, mirrors its state, and lets
//! you chat, switch the room language, or replace the shared buffer from
//! the terminal.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin coderoom-client -- --room interview-42 --name Alice
//! cargo run --bin coderoom-client -- -r interview-42 -n Bob -u ws://host:3000/ws
//! ```

use clap::Parser;

use coderoom_client::session::run_session;
use coderoom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "CLI client for the collaborative code room", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Room to join (opaque id; share it with your pair)
    #[arg(short = 'r', long)]
    room: String,

    /// Display name attached to chat messages
    #[arg(short = 'n', long, default_value = "Anonymous")]
    name: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_session(&args.url, args.room, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
