//! Catalog injection — tells the model which custom tags it may emit.
//!
//! Runs once per outgoing turn and appends a listing of available
//! components to the first message. The catalog is recomputed fresh from
//! storage on every call; no state is retained between invocations.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::error::RegistryError;
use crate::pipeline::types::{ChatMessage, MessageContent, PipelineStep, StepContext};
use crate::registry::{ComponentRegistry, ComponentSummary};

/// Heading of the injected catalog block.
pub const CATALOG_HEADING: &str = "## Custom UI Components";

const CATALOG_INSTRUCTION: &str =
    "These components are available to embed directly in responses:";

/// Source of the component catalog.
///
/// Injected into [`CatalogStep`] so the step can be unit-tested without
/// real filesystem state.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Current component listing. Components whose metadata lookup fails
    /// are excluded, never reported as an error for the whole catalog.
    async fn catalog(&self) -> Result<Vec<ComponentSummary>, RegistryError>;
}

#[async_trait]
impl CatalogSource for ComponentRegistry {
    async fn catalog(&self) -> Result<Vec<ComponentSummary>, RegistryError> {
        self.list().await
    }
}

/// Pipeline step that appends the component catalog to the first message.
pub struct CatalogStep {
    source: Arc<dyn CatalogSource>,
}

impl CatalogStep {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl PipelineStep for CatalogStep {
    fn name(&self) -> &str {
        "inject_component_catalog"
    }

    async fn apply(
        &self,
        messages: Vec<ChatMessage>,
        _ctx: Option<&StepContext>,
    ) -> Vec<ChatMessage> {
        match self.source.catalog().await {
            Ok(entries) => append_catalog(messages, &entries),
            Err(e) => {
                // Conversation continuity wins over catalog completeness.
                error!(error = %e, "Catalog lookup failed, leaving messages unchanged");
                messages
            }
        }
    }
}

/// Render the catalog block appended to the first message.
pub fn render_catalog(entries: &[ComponentSummary]) -> String {
    let bullets: Vec<String> = entries
        .iter()
        .map(|e| format!("- `<{0}></{0}>`: {1}", e.name, e.description))
        .collect();

    format!(
        "\n\n{CATALOG_HEADING}\n\n{CATALOG_INSTRUCTION}\n\n{}\n",
        bullets.join("\n")
    )
}

/// Append the catalog block to the first message's text content.
///
/// With zero entries or zero messages the input is returned unchanged.
/// Only the first message is touched; the three content shapes are each
/// handled in place.
pub fn append_catalog(
    mut messages: Vec<ChatMessage>,
    entries: &[ComponentSummary],
) -> Vec<ChatMessage> {
    if entries.is_empty() || messages.is_empty() {
        return messages;
    }

    let block = render_catalog(entries);
    if let Some(first) = messages.first_mut() {
        match &mut first.content {
            MessageContent::Text(text) => text.push_str(&block),
            MessageContent::Block(b) if b.kind == "text" => b.text.push_str(&block),
            MessageContent::Block(_) => {}
            MessageContent::Parts(parts) => {
                if let Some(part) = parts.first_mut() {
                    part.text.push_str(&block);
                }
            }
        }
    }
    messages
}
