//! Terminal chat client with reconnection support.
//!
//! Connects to the LAN chat relay, registers a display name and sends lines from stdin.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin lanchat-client -- --name Alice
//! cargo run --bin lanchat-client -- -n Bob -u ws://192.168.0.10:8080/ws
//! ```

use clap::Parser;

use lanchat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "lanchat-client")]
#[command(about = "Terminal client for the LAN chat relay", long_about = None)]
struct Args {
    /// Display name (blank names appear as "Anon")
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&[env!("CARGO_BIN_NAME")], "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = lanchat_client::run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
