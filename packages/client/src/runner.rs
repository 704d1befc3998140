//! Client execution logic with reconnection support.

use std::time::Duration;

use tokio::sync::watch;

use super::{error::ClientError, session::run_client_session, ui::spawn_input_reader};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Check if the client should attempt to reconnect.
///
/// `current_attempt` counts the failures so far.
fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}

/// Run the terminal client with reconnection logic
///
/// Returns when the user quits, or with `ClientError::ReconnectExhausted`
/// after too many failed connection attempts.
pub async fn run_client(url: String, name: String) -> Result<(), ClientError> {
    // The name and the input reader survive reconnections
    let (name_tx, name_rx) = watch::channel(name);
    let mut input_rx = spawn_input_reader(name_rx);
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            name_tx.borrow().as_str(),
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &name_tx, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If connection ended normally (user exit), don't reconnect
                break;
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    return Err(ClientError::ReconnectExhausted(MAX_RECONNECT_ATTEMPTS));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
