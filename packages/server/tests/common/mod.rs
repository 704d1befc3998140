//! Shared helpers for in-process integration tests.
//!
//! Each test starts its own server on an ephemeral port and talks to it with
//! real WebSocket and HTTP clients.

#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::{Mutex, oneshot},
    task::JoinHandle,
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

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
use lanchat_shared::time::SystemClock;

/// How long a test waits for an expected frame
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Running server bound to 127.0.0.1 on an ephemeral port
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    serve_task: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Wire every component the way the binary does and start serving
    pub async fn start() -> Self {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))));
        let publisher = Arc::new(PresencePublisher::new(message_pusher.clone()));
        let clock = Arc::new(SystemClock);

        let state = AppState {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                publisher.clone(),
            )),
            register_name_usecase: Arc::new(RegisterNameUseCase::new(
                registry.clone(),
                publisher.clone(),
            )),
            relay_message_usecase: Arc::new(RelayMessageUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                publisher.clone(),
                clock.clone(),
            )),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                publisher,
            )),
            get_presence_usecase: Arc::new(GetPresenceUseCase::new(registry)),
            message_pusher,
            clock,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        };

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let serve_task = tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = Server::new(state).serve(listener, shutdown).await {
                eprintln!("Test server error: {}", e);
            }
        });

        TestServer {
            addr,
            shutdown: Some(shutdown_tx),
            serve_task: Some(serve_task),
        }
    }

    /// WebSocket endpoint URL
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// HTTP URL for `path`
    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger graceful shutdown
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }

    /// Trigger graceful shutdown and wait until `serve` has returned
    pub async fn stop(&mut self) {
        self.shutdown();
        if let Some(task) = self.serve_task.take() {
            tokio::time::timeout(RECV_TIMEOUT, task)
                .await
                .expect("Timed out waiting for the server to stop")
                .expect("Server task panicked");
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// WebSocket client speaking the `{"event", "data"}` protocol
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect without registering a name
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect to test server");
        TestClient { stream }
    }

    /// Send a raw text frame
    pub async fn send_raw(&mut self, frame: &str) {
        self.stream
            .send(Message::Text(frame.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    /// Send an event envelope
    pub async fn send_event(&mut self, event: &str, data: Value) {
        let frame = json!({ "event": event, "data": data }).to_string();
        self.send_raw(&frame).await;
    }

    /// Register a display name
    pub async fn register(&mut self, name: &str) {
        self.send_event("register", json!(name)).await;
    }

    /// Send a text message
    pub async fn send_text(&mut self, username: &str, msg: &str) {
        self.send_event(
            "message",
            json!({ "username": username, "type": "text", "msg": msg }),
        )
        .await;
    }

    /// Receive the next event envelope, skipping control frames
    pub async fn recv(&mut self) -> Value {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for a frame")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
            }
        }
    }

    /// Receive frames until one matches `event` and `pred`, returning its data
    pub async fn recv_until<F>(&mut self, event: &str, pred: F) -> Value
    where
        F: Fn(&Value) -> bool,
    {
        loop {
            let frame = self.recv().await;
            if frame["event"] == event && pred(&frame["data"]) {
                return frame["data"].clone();
            }
        }
    }

    /// Wait until a presence update with `count` online users arrives
    pub async fn recv_presence(&mut self, count: u64) -> Value {
        self.recv_until("presence", |data| data["count"] == count)
            .await
    }

    /// Wait until the server closes the connection
    pub async fn expect_closed(&mut self) {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for the connection to close");
            match frame {
                None | Some(Err(_)) | Some(Ok(Message::Close(_))) => return,
                Some(Ok(Message::Text(text))) => panic!("Unexpected frame: {}", text.as_str()),
                Some(Ok(_)) => {}
            }
        }
    }

    /// Close the connection
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }

    /// Assert no event envelope arrives within `wait`
    pub async fn assert_silent(&mut self, wait: Duration) {
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(wait, self.stream.next()).await
        {
            panic!("Unexpected frame: {}", text.as_str());
        }
    }
}

/// Check the `HH:MM` shape of a timestamp
pub fn is_minute_timestamp(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit())
}
