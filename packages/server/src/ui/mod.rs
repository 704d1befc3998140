//! Chat relay server: HTTP page, WebSocket endpoint and HTTP API.

mod connection_tracker;
mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{DEFAULT_MAX_MESSAGE_SIZE, Server, ServerError};
pub use state::AppState;
