//! Command abstraction for host-runtime callable actions.

use std::time::Duration;

use async_trait::async_trait;

/// Errors from command dispatch and execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),
}

/// Output of a command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// JSON result handed back to the host runtime.
    pub result: serde_json::Value,
    /// Wall-clock execution time.
    pub duration: Duration,
}

impl CommandOutput {
    /// Create an output from a JSON result.
    pub fn new(result: serde_json::Value, duration: Duration) -> Self {
        Self { result, duration }
    }
}

/// Context passed to command execution by the host runtime.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Conversation/session identifier, if the host tracks one.
    pub session_id: Option<String>,
    /// Host-specific metadata.
    pub metadata: serde_json::Value,
}

/// A callable action exposed to the agent.
#[async_trait]
pub trait Command: Send + Sync {
    /// Command name as registered with the host runtime.
    fn name(&self) -> &str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema of the accepted parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the command with JSON parameters.
    async fn execute(
        &self,
        params: serde_json::Value,
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError>;
}

/// Extract a required string parameter.
pub fn require_str<'a>(
    params: &'a serde_json::Value,
    key: &str,
) -> Result<&'a str, CommandError> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| CommandError::InvalidParameters(format!("missing string parameter: {key}")))
}
