//! Shared types for the outgoing-message pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A message in the outgoing conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

impl ChatMessage {
    /// Create a system message with plain text content.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a user message with plain text content.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }
}

/// Message content in one of the three shapes hosts produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain string content.
    Text(String),
    /// A structured `{"type": "text", "text": ...}` object.
    Block(TextBlock),
    /// A list of content parts.
    Parts(Vec<ContentPart>),
}

/// A structured text object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl TextBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// One part of a multi-part content list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    /// Host-specific fields carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Optional per-turn context handed to pipeline steps by the host.
#[derive(Debug, Clone, Default)]
pub struct StepContext {
    /// Conversation/session identifier, if the host tracks one.
    pub session_id: Option<String>,
    /// Host-specific metadata.
    pub metadata: serde_json::Value,
}

/// A named transformation applied to the outgoing message list.
///
/// Implementations must be infallible at this boundary: on any internal
/// failure they return the input unchanged.
#[async_trait]
pub trait PipelineStep: Send + Sync {
    /// Step name, used by the host for registration and logging.
    fn name(&self) -> &str;

    /// Transform the outgoing message list.
    async fn apply(
        &self,
        messages: Vec<ChatMessage>,
        ctx: Option<&StepContext>,
    ) -> Vec<ChatMessage>;
}
