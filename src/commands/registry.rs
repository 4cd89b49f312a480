//! Command registry — the seam the host runtime hooks into.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::commands::command::{Command, CommandContext, CommandError, CommandOutput};

/// Names of built-in commands that cannot be shadowed by dynamic registrations.
const PROTECTED_COMMAND_NAMES: &[&str] = &[
    "create_component",
    "list_components",
    "delete_component",
    "read_component",
];

/// Definition advertised to the host runtime for each command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Registry of available commands.
pub struct CommandRegistry {
    commands: RwLock<HashMap<String, Arc<dyn Command>>>,
    /// Tracks which names were registered as built-in (protected from shadowing).
    builtin_names: RwLock<HashSet<String>>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            commands: RwLock::new(HashMap::new()),
            builtin_names: RwLock::new(HashSet::new()),
        }
    }

    /// Register a command. Rejects dynamic commands that try to shadow a built-in name.
    pub async fn register(&self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        if self.builtin_names.read().await.contains(&name) {
            tracing::warn!(
                command = %name,
                "Rejected command registration: would shadow a built-in command"
            );
            return;
        }
        self.commands.write().await.insert(name.clone(), command);
        tracing::debug!("Registered command: {}", name);
    }

    /// Register a command (sync version for startup, marks as built-in).
    pub fn register_sync(&self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        if let Ok(mut commands) = self.commands.try_write() {
            commands.insert(name.clone(), command);
            if PROTECTED_COMMAND_NAMES.contains(&name.as_str())
                && let Ok(mut builtins) = self.builtin_names.try_write()
            {
                builtins.insert(name.clone());
            }
            tracing::debug!("Registered command: {}", name);
        }
    }

    /// Unregister a command.
    pub async fn unregister(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.write().await.remove(name)
    }

    /// Get a command by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.read().await.get(name).cloned()
    }

    /// Check if a command exists.
    pub async fn has(&self, name: &str) -> bool {
        self.commands.read().await.contains_key(name)
    }

    /// List all command names.
    pub async fn list(&self) -> Vec<String> {
        self.commands.read().await.keys().cloned().collect()
    }

    /// Get the number of registered commands.
    pub fn count(&self) -> usize {
        self.commands.try_read().map(|c| c.len()).unwrap_or(0)
    }

    /// Get command definitions for the host runtime.
    pub async fn definitions(&self) -> Vec<CommandDefinition> {
        self.commands
            .read()
            .await
            .values()
            .map(|command| CommandDefinition {
                name: command.name().to_string(),
                description: command.description().to_string(),
                parameters: command.parameters_schema(),
            })
            .collect()
    }

    /// Look up a command by name and execute it.
    pub async fn dispatch(
        &self,
        name: &str,
        params: serde_json::Value,
        ctx: &CommandContext,
    ) -> Result<CommandOutput, CommandError> {
        let command = self
            .get(name)
            .await
            .ok_or_else(|| CommandError::Unknown(name.to_string()))?;
        command.execute(params, ctx).await
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    struct MockCommand {
        name: String,
    }

    #[async_trait]
    impl Command for MockCommand {
        fn name(&self) -> &str {
            &self.name
        }
        fn description(&self) -> &str {
            "A mock command for testing"
        }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object", "properties": {}})
        }
        async fn execute(
            &self,
            _params: serde_json::Value,
            _ctx: &CommandContext,
        ) -> Result<CommandOutput, CommandError> {
            Ok(CommandOutput::new(
                serde_json::json!({"status": "success"}),
                Duration::from_millis(1),
            ))
        }
    }

    #[tokio::test]
    async fn register_and_get() {
        let registry = CommandRegistry::new();
        registry
            .register(Arc::new(MockCommand {
                name: "test_cmd".to_string(),
            }))
            .await;

        assert!(registry.has("test_cmd").await);
        assert!(!registry.has("nonexistent").await);
        assert_eq!(registry.get("test_cmd").await.unwrap().name(), "test_cmd");
    }

    #[tokio::test]
    async fn dispatch_unknown_command() {
        let registry = CommandRegistry::new();
        let ctx = CommandContext::default();
        let err = registry
            .dispatch("nope", serde_json::json!({}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Unknown(_)));
    }

    #[tokio::test]
    async fn builtin_names_cannot_be_shadowed() {
        let registry = CommandRegistry::new();
        registry.register_sync(Arc::new(MockCommand {
            name: "create_component".to_string(),
        }));

        struct Impostor;
        #[async_trait]
        impl Command for Impostor {
            fn name(&self) -> &str {
                "create_component"
            }
            fn description(&self) -> &str {
                "shadow"
            }
            fn parameters_schema(&self) -> serde_json::Value {
                serde_json::json!({})
            }
            async fn execute(
                &self,
                _params: serde_json::Value,
                _ctx: &CommandContext,
            ) -> Result<CommandOutput, CommandError> {
                unreachable!()
            }
        }

        registry.register(Arc::new(Impostor)).await;
        let kept = registry.get("create_component").await.unwrap();
        assert_eq!(kept.description(), "A mock command for testing");
    }

    #[tokio::test]
    async fn definitions_include_schema() {
        let registry = CommandRegistry::new();
        registry
            .register(Arc::new(MockCommand {
                name: "my_cmd".to_string(),
            }))
            .await;

        let defs = registry.definitions().await;
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "my_cmd");
        assert!(defs[0].parameters.is_object());
    }

    #[tokio::test]
    async fn count_and_unregister() {
        let registry = CommandRegistry::new();
        registry
            .register(Arc::new(MockCommand {
                name: "temp".to_string(),
            }))
            .await;
        assert_eq!(registry.count(), 1);
        assert!(registry.list().await.contains(&"temp".to_string()));

        registry.unregister("temp").await;
        assert!(!registry.has("temp").await);
    }
}
