//! UI utilities for the client.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{mpsc, watch};

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(name: &str) {
    print!("{}> ", name);
    std::io::stdout().flush().ok();
}

/// Print a block of output followed by the prompt
pub fn print_with_prompt(output: &str, name: &str) {
    print!("{}", output);
    redisplay_prompt(name);
}

/// Spawn a blocking thread that reads lines with rustyline.
///
/// The thread outlives individual connections so that reconnecting does not
/// start a second reader on the same terminal. The prompt follows the
/// current display name. The returned channel closes on Ctrl+C or Ctrl+D.
pub fn spawn_input_reader(name: watch::Receiver<String>) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            let prompt = format!("{}> ", name.borrow().as_str());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
