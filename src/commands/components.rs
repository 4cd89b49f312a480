//! The component CRUD commands exposed to the agent.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::commands::command::{
    Command, CommandContext, CommandError, CommandOutput, require_str,
};
use crate::commands::registry::CommandRegistry;
use crate::error::RegistryError;
use crate::registry::ComponentRegistry;

fn status_error(message: impl std::fmt::Display) -> serde_json::Value {
    json!({"status": "error", "message": message.to_string()})
}

/// Pull the `component_name` parameter, mirroring the documented contract:
/// a missing or non-string name is a reported error, not a dispatch fault.
fn component_name(params: &serde_json::Value) -> Result<&str, serde_json::Value> {
    match params.get("component_name").and_then(|v| v.as_str()) {
        Some(name) => Ok(name),
        None => Err(status_error("Name is required")),
    }
}

/// Register the built-in component commands with the host seam.
pub fn register_component_commands(
    commands: &CommandRegistry,
    registry: Arc<ComponentRegistry>,
) {
    commands.register_sync(Arc::new(CreateComponentCommand {
        registry: Arc::clone(&registry),
    }));
    commands.register_sync(Arc::new(ListComponentsCommand {
        registry: Arc::clone(&registry),
    }));
    commands.register_sync(Arc::new(DeleteComponentCommand {
        registry: Arc::clone(&registry),
    }));
    commands.register_sync(Arc::new(ReadComponentCommand { registry }));
}

// ── create_component ────────────────────────────────────────────────

/// Create or update a custom UI web component.
pub struct CreateComponentCommand {
    registry: Arc<ComponentRegistry>,
}

#[async_trait]
impl Command for CreateComponentCommand {
    fn name(&self) -> &str {
        "create_component"
    }

    fn description(&self) -> &str {
        "Create or update a custom UI web component. The JavaScript code should \
         define a class extending HTMLElement and register it with \
         customElements.define. The saved component can then be used as \
         <component-name></component-name> in responses."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "component_name": {
                    "type": "string",
                    "description": "Component name (lowercase with hyphens, e.g. 'customer-list')"
                },
                "text": {
                    "type": "string",
                    "description": "The JavaScript code defining the web component"
                }
            },
            "required": ["component_name", "text"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        let start = Instant::now();
        let name = match component_name(&params) {
            Ok(name) => name,
            Err(result) => return Ok(CommandOutput::new(result, start.elapsed())),
        };
        let text = require_str(&params, "text")?;

        let result = match self.registry.create_or_update(name, text).await {
            Ok(saved) => {
                info!(component = %saved.name, "Component saved");
                json!({
                    "status": "success",
                    "message": format!(
                        "Component '{0}' saved. Use <{0}></{0}> in responses.",
                        saved.name
                    ),
                    "path": saved.path.display().to_string(),
                })
            }
            Err(RegistryError::InvalidName(rule)) => status_error(rule),
            Err(e) => {
                error!(error = %e, "Failed to save component");
                status_error(e)
            }
        };

        Ok(CommandOutput::new(result, start.elapsed()))
    }
}

// ── list_components ─────────────────────────────────────────────────

/// List all available custom UI components.
pub struct ListComponentsCommand {
    registry: Arc<ComponentRegistry>,
}

#[async_trait]
impl Command for ListComponentsCommand {
    fn name(&self) -> &str {
        "list_components"
    }

    fn description(&self) -> &str {
        "List all available custom UI components with their descriptions."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(
        &self,
        _params: serde_json::Value,
        _ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        let start = Instant::now();
        let result = match self.registry.list().await {
            Ok(components) => json!({ "components": components }),
            Err(e) => {
                error!(error = %e, "Failed to list components");
                status_error(e)
            }
        };
        Ok(CommandOutput::new(result, start.elapsed()))
    }
}

// ── delete_component ────────────────────────────────────────────────

/// Delete a custom UI component.
pub struct DeleteComponentCommand {
    registry: Arc<ComponentRegistry>,
}

#[async_trait]
impl Command for DeleteComponentCommand {
    fn name(&self) -> &str {
        "delete_component"
    }

    fn description(&self) -> &str {
        "Delete a custom UI component by name."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "component_name": {
                    "type": "string",
                    "description": "The component name to delete"
                }
            },
            "required": ["component_name"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        let start = Instant::now();
        let name = match component_name(&params) {
            Ok(name) => name,
            Err(result) => return Ok(CommandOutput::new(result, start.elapsed())),
        };

        let result = match self.registry.delete(name).await {
            Ok(()) => {
                info!(component = %name, "Component deleted");
                json!({
                    "status": "success",
                    "message": format!("Component '{name}' deleted"),
                })
            }
            Err(e @ RegistryError::NotFound { .. }) => status_error(e),
            Err(e) => {
                error!(error = %e, "Failed to delete component");
                status_error(e)
            }
        };

        Ok(CommandOutput::new(result, start.elapsed()))
    }
}

// ── read_component ──────────────────────────────────────────────────

/// Read the source code of a custom UI component.
pub struct ReadComponentCommand {
    registry: Arc<ComponentRegistry>,
}

#[async_trait]
impl Command for ReadComponentCommand {
    fn name(&self) -> &str {
        "read_component"
    }

    fn description(&self) -> &str {
        "Read the source code of a custom UI component."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "component_name": {
                    "type": "string",
                    "description": "The component name to read"
                }
            },
            "required": ["component_name"]
        })
    }

    async fn execute(
        &self,
        params: serde_json::Value,
        _ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        let start = Instant::now();
        let name = match component_name(&params) {
            Ok(name) => name,
            Err(result) => return Ok(CommandOutput::new(result, start.elapsed())),
        };

        let result = match self.registry.read(name).await {
            Ok(component) => json!({
                "name": component.name,
                "text": component.source,
            }),
            Err(e @ RegistryError::NotFound { .. }) => status_error(e),
            Err(e) => {
                error!(error = %e, "Failed to read component");
                status_error(e)
            }
        };

        Ok(CommandOutput::new(result, start.elapsed()))
    }
}
