//! Component registry — validated CRUD over the store.
//!
//! Names double as custom-element tag names, so they follow the custom
//! element rules the browser enforces: lowercase, at least one hyphen,
//! alphanumeric once hyphens are removed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::describe;
use crate::error::{NameError, RegistryError};
use crate::store::ComponentStore;

/// A stored component with its full source.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    pub name: String,
    pub source: String,
}

/// A component's listing entry: name plus derived description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub name: String,
    pub description: String,
}

/// Result of a successful create/update.
#[derive(Debug, Clone)]
pub struct SavedComponent {
    pub name: String,
    pub path: PathBuf,
}

/// Validate and normalize a component name.
///
/// Trims whitespace and lowercases, then checks: non-empty, contains a
/// hyphen, and alphanumeric once hyphens are removed. Returns the
/// normalized name.
pub fn validate_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if !name.contains('-') {
        return Err(NameError::MissingHyphen);
    }
    let bare: String = name.chars().filter(|c| *c != '-').collect();
    if bare.is_empty() || !bare.chars().all(char::is_alphanumeric) {
        return Err(NameError::NotAlphanumeric);
    }
    Ok(name)
}

/// Registry of custom UI components.
pub struct ComponentRegistry {
    store: ComponentStore,
}

impl ComponentRegistry {
    /// Create a registry over the given store.
    pub fn new(store: ComponentStore) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &ComponentStore {
        &self.store
    }

    /// Create a component, or overwrite an existing one with the same name.
    ///
    /// The source is written verbatim; no versioning, no merge.
    pub async fn create_or_update(
        &self,
        name: &str,
        source: &str,
    ) -> Result<SavedComponent, RegistryError> {
        let name = validate_name(name)?;
        let path = self.store.write(&name, source).await?;
        debug!(component = %name, path = %path.display(), "Saved component");
        Ok(SavedComponent { name, path })
    }

    /// Read a component's source.
    pub async fn read(&self, name: &str) -> Result<Component, RegistryError> {
        let source = self.store.read(name).await?;
        Ok(Component {
            name: ComponentStore::sanitize(name),
            source,
        })
    }

    /// Delete a component. Deleting an unknown name is a reported error.
    pub async fn delete(&self, name: &str) -> Result<(), RegistryError> {
        self.store.remove(name).await?;
        debug!(component = %name, "Deleted component");
        Ok(())
    }

    /// List all stored components with derived descriptions.
    ///
    /// Entries that fail to read are skipped rather than aborting the
    /// whole listing. Ordering follows the store and is not meaningful.
    pub async fn list(&self) -> Result<Vec<ComponentSummary>, RegistryError> {
        let names = self.store.list_names().await?;
        let mut summaries = Vec::with_capacity(names.len());
        for name in names {
            match self.store.read(&name).await {
                Ok(source) => summaries.push(ComponentSummary {
                    description: describe::or_default(describe::description_full(&source)),
                    name,
                }),
                Err(e) => {
                    warn!(component = %name, error = %e, "Skipping unreadable component");
                }
            }
        }
        Ok(summaries)
    }
}
