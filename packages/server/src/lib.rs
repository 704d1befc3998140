//! LAN chat relay library.
//!
//! This library provides a WebSocket chat relay that rebroadcasts chat messages
//! (text or embedded images) to every connected client, together with presence
//! updates (online count and unique names).

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
