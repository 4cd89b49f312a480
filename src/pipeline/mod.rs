//! Outgoing-message pipeline integration.
//!
//! The host runtime calls a named step once per outgoing turn with the
//! full message list. Steps transform and return the list; a step must
//! never fail the turn, so every error path falls back to returning the
//! input unchanged.

pub mod catalog;
pub mod types;

pub use catalog::{CatalogSource, CatalogStep, append_catalog, render_catalog};
pub use types::{ChatMessage, ContentPart, MessageContent, PipelineStep, StepContext, TextBlock};
