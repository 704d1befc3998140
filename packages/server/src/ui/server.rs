//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    connection_tracker::{ConnectionGuard, ConnectionTracker},
    handler::{get_presence, health_check, index, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Default limit for one WebSocket message (large GIFs arrive as data URLs)
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

/// Announcement broadcast to every client right before the server stops
const SHUTDOWN_ANNOUNCEMENT: &str = "Server is shutting down";

/// How long shutdown waits for WebSocket connections to flush and close
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Error type returned by the server entry points
pub type ServerError = Box<dyn std::error::Error + Send + Sync>;

/// LAN chat relay server
///
/// This struct encapsulates the server state and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new Server instance
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router: chat page, WebSocket endpoint and HTTP API
    fn router(state: Arc<AppState>, guard: ConnectionGuard) -> Router {
        Router::new()
            // 静的ページ
            .route("/", get(index))
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/presence", get(get_presence))
            .layer(Extension(guard))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the chat server until Ctrl+C or SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Open http://{}/ in your browser", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// Before the listener closes, a system announcement is broadcast to all clients.
    /// Returns once every WebSocket connection has flushed its pending frames and
    /// closed, or after `SHUTDOWN_GRACE_PERIOD`.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app_state = Arc::new(self.state);
        let relay_message_usecase = app_state.relay_message_usecase.clone();
        let message_pusher = app_state.message_pusher.clone();
        let tracker = ConnectionTracker::new();
        let app = Self::router(app_state, tracker.guard());

        tracing::info!("LAN chat server listening on {}", listener.local_addr()?);

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                if let Err(e) = relay_message_usecase.announce(SHUTDOWN_ANNOUNCEMENT).await {
                    tracing::warn!("Failed to announce shutdown: {}", e);
                }
                // Closing the channels lets every writer send what is queued and stop
                let closed = message_pusher.unregister_all().await;
                tracing::info!("Closing {} WebSocket connections", closed);
            })
            .await?;

        if !tracker.wait(SHUTDOWN_GRACE_PERIOD).await {
            tracing::warn!(
                "WebSocket connections still open after {:?}",
                SHUTDOWN_GRACE_PERIOD
            );
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
