//! Message formatting utilities for client display.

use lanchat_server::infrastructure::dto::websocket::{
    ChatKind, OutboundChatPayload, PresencePayload,
};

/// Image URLs longer than this are summarized instead of printed
const MAX_URL_DISPLAY_LEN: usize = 80;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a relayed chat message
    ///
    /// # Arguments
    ///
    /// * `message` - The relayed message
    ///
    /// # Returns
    ///
    /// A formatted string with the chat message
    pub fn format_chat_message(message: &OutboundChatPayload) -> String {
        match message.kind {
            ChatKind::Text => format!(
                "\n[{}] @{}: {}\n",
                message.timestamp, message.username, message.msg
            ),
            ChatKind::Image => {
                let url = message.url.as_deref().unwrap_or_default();
                let mut output = format!(
                    "\n[{}] @{} sent an image: {}\n",
                    message.timestamp,
                    message.username,
                    Self::describe_url(url)
                );
                if !message.msg.is_empty() {
                    output.push_str(&format!("        {}\n", message.msg));
                }
                output
            }
            ChatKind::System => format!("\n[{}] * {}\n", message.timestamp, message.msg),
        }
    }

    /// Format a presence update
    ///
    /// # Arguments
    ///
    /// * `presence` - Online count and unique names
    /// * `current_name` - The current client's name (to mark as "me")
    ///
    /// # Returns
    ///
    /// A formatted string with the presence list
    pub fn format_presence(presence: &PresencePayload, current_name: &str) -> String {
        let users = if presence.users.is_empty() {
            "(nobody)".to_string()
        } else {
            presence
                .users
                .iter()
                .map(|user| {
                    if user == current_name {
                        format!("{} (me)", user)
                    } else {
                        user.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("\n= Online ({}): {}\n", presence.count, users)
    }

    /// Format a rejection of the last frame sent by this client
    pub fn format_error(reason: &str) -> String {
        format!("\n! Rejected by server: {}\n", reason)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    /// Data URLs carry the whole image, so only their media type and size are shown
    fn describe_url(url: &str) -> String {
        if let Some(rest) = url.strip_prefix("data:") {
            let media_type = rest.split([';', ',']).next().unwrap_or_default();
            return format!("<inline {}, {} bytes>", media_type, url.len());
        }
        if url.chars().count() > MAX_URL_DISPLAY_LEN {
            let head: String = url.chars().take(MAX_URL_DISPLAY_LEN).collect();
            return format!("{}...", head);
        }
        url.to_string()
    }
}
