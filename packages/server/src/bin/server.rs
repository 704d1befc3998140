//! LAN chat relay server.
//!
//! Relays chat messages (text or embedded images) to every connected client and
//! keeps them informed of who is online.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin lanchat-server
//! cargo run --bin lanchat-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;

use lanchat_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemoryConnectionRegistry,
    },
    ui::{AppState, DEFAULT_MAX_MESSAGE_SIZE, Server},
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetPresenceUseCase, PresencePublisher,
        RegisterNameUseCase, RelayMessageUseCase,
    },
};
use lanchat_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "lanchat-server")]
#[command(about = "LAN chat relay server with presence support", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Maximum size of one WebSocket message in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGE_SIZE)]
    max_message_size: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(
        &[env!("CARGO_BIN_NAME"), "lanchat-shared", "tower_http"],
        "debug",
    );

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. MessagePusher
    // 3. PresencePublisher
    // 4. UseCases
    // 5. AppState
    // 6. Server

    // 1. Create Registry (in-memory)
    let registry = Arc::new(InMemoryConnectionRegistry::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create PresencePublisher (shared by every usecase that changes presence)
    let publisher = Arc::new(PresencePublisher::new(message_pusher.clone()));

    // 4. Create UseCases
    let clock = Arc::new(SystemClock);
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        publisher.clone(),
    ));
    let register_name_usecase = Arc::new(RegisterNameUseCase::new(
        registry.clone(),
        publisher.clone(),
    ));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        publisher.clone(),
        clock.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        publisher,
    ));
    let get_presence_usecase = Arc::new(GetPresenceUseCase::new(registry));

    // 5. Create AppState
    let state = AppState {
        connect_client_usecase,
        register_name_usecase,
        relay_message_usecase,
        disconnect_client_usecase,
        get_presence_usecase,
        message_pusher,
        clock,
        max_message_size: args.max_message_size,
    };

    // 6. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
