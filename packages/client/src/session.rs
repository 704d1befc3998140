//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use lanchat_server::infrastructure::dto::websocket::{
    ChatKind, ClientEvent, InboundChatPayload, ServerEvent,
};

use crate::{
    command::Command,
    error::ClientError,
    formatter::MessageFormatter,
    ui::{print_with_prompt, redisplay_prompt},
};

/// Encode a client event as a text frame
fn encode(event: &ClientEvent) -> Result<Message, ClientError> {
    Ok(Message::Text(serde_json::to_string(event)?.into()))
}

/// Build the chat event for a text or image command
fn chat_event(name: &str, kind: ChatKind, msg: String, url: Option<String>) -> ClientEvent {
    ClientEvent::Message(InboundChatPayload {
        username: name.to_string(),
        kind,
        msg: Some(msg),
        url,
    })
}

/// Print one frame received from the server
fn display(text: &str, name: &str) {
    let output = match serde_json::from_str::<ServerEvent>(text) {
        Ok(ServerEvent::Message(message)) => MessageFormatter::format_chat_message(&message),
        Ok(ServerEvent::Presence(presence)) => MessageFormatter::format_presence(&presence, name),
        Ok(ServerEvent::Error(error)) => MessageFormatter::format_error(&error.reason),
        // If parsing fails, display as raw text
        Err(_) => MessageFormatter::format_raw_message(text),
    };
    print_with_prompt(&output, name);
}

/// Run one WebSocket client session
///
/// Registers the current name, then relays input lines to the server and
/// prints whatever the server sends until the user quits or the connection drops.
///
/// # Arguments
///
/// * `url` - WebSocket server URL
/// * `name` - Current display name (updated by `/name`)
/// * `input_rx` - Lines typed by the user
///
/// # Returns
///
/// * `Ok(())` - The user quit
/// * `Err(ClientError)` - The connection failed or was lost
pub async fn run_client_session(
    url: &str,
    name: &watch::Sender<String>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. \
         Commands: /image <url> [caption], /name <new name>, /quit\n",
        name.borrow().as_str()
    );

    let (mut write, mut read) = ws_stream.split();

    // Register the current name before anything else
    let register = encode(&ClientEvent::Register(name.borrow().clone()))?;
    write
        .send(register)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    loop {
        tokio::select! {
            incoming = read.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    display(text.as_str(), name.borrow().as_str());
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionLost);
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                Some(Ok(_)) => {}
            },
            line = input_rx.recv() => {
                // Input closed (Ctrl+C / Ctrl+D): treat as quit
                let Some(line) = line else {
                    write.close().await.ok();
                    return Ok(());
                };

                let current_name = name.borrow().clone();
                let event = match Command::parse(&line) {
                    Ok(Command::Quit) => {
                        write.close().await.ok();
                        return Ok(());
                    }
                    Ok(Command::Rename(new_name)) => {
                        name.send_replace(new_name.clone());
                        ClientEvent::Register(new_name)
                    }
                    Ok(Command::Text(msg)) => chat_event(&current_name, ChatKind::Text, msg, None),
                    Ok(Command::Image { url, caption }) => {
                        chat_event(&current_name, ChatKind::Image, caption, Some(url))
                    }
                    Err(e) => {
                        print_with_prompt(&format!("\n{}\n", e), &current_name);
                        continue;
                    }
                };

                if let Err(e) = write.send(encode(&event)?).await {
                    tracing::warn!("Failed to send message: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                redisplay_prompt(name.borrow().as_str());
            }
        }
    }
}
