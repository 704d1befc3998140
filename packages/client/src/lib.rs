//! Terminal client for the LAN chat relay.

pub mod command;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
