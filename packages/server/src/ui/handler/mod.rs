//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{get_presence, health_check, index};
pub use websocket::websocket_handler;
