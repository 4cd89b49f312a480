//! Stdin command loop for running the host standalone.
//!
//! Reads one JSON object per line in the host runtime's invocation shape,
//! `{"command_name": {args...}}`, dispatches it, and prints the JSON
//! result to stdout.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::commands::command::CommandContext;
use crate::commands::registry::CommandRegistry;

/// Dispatch a single `{"command_name": {args...}}` line.
async fn dispatch_line(registry: &CommandRegistry, line: &str) -> serde_json::Value {
    let parsed: serde_json::Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            return serde_json::json!({
                "status": "error",
                "message": format!("Invalid JSON: {e}"),
            });
        }
    };

    let Some((name, params)) = parsed.as_object().and_then(|obj| obj.iter().next()) else {
        return serde_json::json!({
            "status": "error",
            "message": "Expected an object like {\"command_name\": {...}}",
        });
    };

    let ctx = CommandContext::default();
    match registry.dispatch(name, params.clone(), &ctx).await {
        Ok(output) => {
            debug!(command = %name, elapsed_ms = output.duration.as_millis() as u64, "Command completed");
            output.result
        }
        Err(e) => serde_json::json!({
            "status": "error",
            "message": e.to_string(),
        }),
    }
}

/// Run the command loop until stdin reaches EOF.
pub async fn run_command_loop(registry: Arc<CommandRegistry>) {
    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    eprint!("> ");
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    eprint!("> ");
                    continue;
                }
                let result = dispatch_line(&registry, line).await;
                println!("{result}");
                eprint!("> ");
            }
            Ok(None) => break, // EOF
            Err(e) => {
                tracing::error!("Error reading stdin: {}", e);
                break;
            }
        }
    }
}
