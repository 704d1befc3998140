//! Utilities shared by the LAN chat server and client.

pub mod logger;
pub mod time;
