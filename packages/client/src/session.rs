//! WebSocket client session management.

use std::io::Write as _;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use coderoom_server::domain::Language;
use coderoom_server::infrastructure::dto::websocket::ServerEvent;
use coderoom_shared::time::timestamp_to_rfc3339;

use crate::controller::RoomController;
use crate::error::ClientError;

fn redisplay_prompt(name: &str) {
    print!("{}> ", name);
    let _ = std::io::stdout().flush();
}

/// Run the room client session: connect, handshake, join, then pump
/// events and stdin until either side ends.
pub async fn run_session(
    url: &str,
    room_id: String,
    display_name: String,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to room server");

    let (mut write, mut read) = ws_stream.split();
    let controller = Arc::new(Mutex::new(RoomController::new(room_id.clone())));

    // The first frame must be the session handshake; without an identity
    // we cannot attach a sender to chat messages.
    let session_id = loop {
        match read.next().await {
            Some(Ok(Message::Text(text))) => {
                match serde_json::from_str::<ServerEvent>(&text) {
                    Ok(ServerEvent::Connected { session_id }) => {
                        let mut controller = controller.lock().await;
                        controller.apply(ServerEvent::Connected {
                            session_id: session_id.clone(),
                        });
                        break session_id;
                    }
                    Ok(other) => {
                        tracing::warn!("Expected handshake, got {:?}; waiting", other);
                    }
                    Err(e) => {
                        tracing::warn!("Unparseable frame before handshake: {}", e);
                    }
                }
            }
            Some(Ok(Message::Close(_))) | None => return Err(ClientError::HandshakeMissing),
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(ClientError::ConnectionError(e.to_string())),
        }
    };

    tracing::info!("Session id: {}", session_id);

    // Join exactly once; the snapshot arrives as a sync-state event
    let join_intent = { controller.lock().await.join_intent() };
    let join_json = serde_json::to_string(&join_intent)
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::Text(join_json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    println!(
        "\nJoined room '{}' as '{}'. Type to chat, '/lang <name>' to switch language,\n'/code <text>' to replace the buffer. Press Ctrl+C to exit.\n",
        room_id, display_name
    );

    // Inbound: apply every event to the mirror and narrate it
    let controller_for_read = controller.clone();
    let name_for_read = display_name.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let event = match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Unparseable frame: {}", e);
                            continue;
                        }
                    };

                    let mut controller = controller_for_read.lock().await;
                    describe_event(&event, &controller);
                    controller.apply(event);
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    // Stdin runs on a blocking thread (rustyline is synchronous) and feeds
    // the async write loop through a channel
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let prompt_name = display_name.clone();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", prompt_name);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Outbound: turn input lines into intents
    let controller_for_write = controller.clone();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let intent = {
                let mut controller = controller_for_write.lock().await;
                if let Some(rest) = line.strip_prefix("/lang ") {
                    match rest.trim().parse::<Language>() {
                        Ok(language) => Some(controller.switch_language(language)),
                        Err(e) => {
                            println!("{}", e);
                            None
                        }
                    }
                } else if let Some(rest) = line.strip_prefix("/code ") {
                    Some(controller.edit(rest.to_string()))
                } else {
                    let intent =
                        controller.compose_chat(line.clone(), display_name.clone());
                    if intent.is_none() {
                        println!("Not connected yet, message dropped");
                    }
                    intent
                }
            };

            let Some(intent) = intent else { continue };

            let json = match serde_json::to_string(&intent) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize intent: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send intent: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut read_task => {
            write_task.abort();
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
    }

    Ok(())
}

/// Print a human-readable line for an inbound event, before it is applied.
fn describe_event(event: &ServerEvent, controller: &RoomController) {
    match event {
        ServerEvent::Connected { session_id } => {
            println!("\n* reconnected as {}", session_id);
        }
        ServerEvent::SyncState { code, language } => {
            println!(
                "\n* room synced: language {}, {} chars in buffer",
                language,
                code.len()
            );
        }
        ServerEvent::UserJoined { session_id } => {
            println!("\n* {} joined the room", session_id);
        }
        ServerEvent::CodeChange { code } => {
            println!("\n* buffer updated ({} chars)", code.len());
        }
        ServerEvent::LanguageChange { language } => {
            println!("\n* language is now {}", language);
        }
        ServerEvent::ChatMessage {
            message,
            sender,
            sender_name,
            timestamp,
        } => {
            let me = controller.session_id() == Some(sender.as_str());
            let marker = if me { " (you)" } else { "" };
            println!(
                "\n[{}] {}{}: {}",
                timestamp_to_rfc3339(*timestamp),
                sender_name,
                marker,
                message
            );
        }
    }
}
