//! Directory-backed component storage.
//!
//! Components live in a single flat directory, one `{name}.js` file per
//! component. The directory path is supplied at construction time. No
//! subdirectories, no sidecar metadata: a component's name and its file
//! are in 1:1 correspondence.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::RegistryError;

/// File extension for stored component definitions.
const COMPONENT_EXT: &str = "js";

/// Flat-directory store for component source files.
pub struct ComponentStore {
    root: PathBuf,
}

impl ComponentStore {
    /// Create a store rooted at `root`. The directory is created lazily.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the storage directory exists.
    pub async fn ensure_dir(&self) -> Result<(), RegistryError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Strip path-separator and parent-directory sequences from a name.
    ///
    /// Applied before every path resolution so no logical name can escape
    /// the component directory.
    pub fn sanitize(name: &str) -> String {
        name.replace('/', "").replace('\\', "").replace("..", "")
    }

    /// Resolve a component name to its storage path.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let safe = Self::sanitize(name);
        self.root.join(format!("{safe}.{COMPONENT_EXT}"))
    }

    /// Whether a component file exists.
    pub async fn exists(&self, name: &str) -> bool {
        fs::try_exists(self.path_for(name)).await.unwrap_or(false)
    }

    /// Write (overwrite) a component's source, returning the resolved path.
    pub async fn write(&self, name: &str, source: &str) -> Result<PathBuf, RegistryError> {
        self.ensure_dir().await?;
        let path = self.path_for(name);
        fs::write(&path, source).await?;
        Ok(path)
    }

    /// Read a component's source.
    pub async fn read(&self, name: &str) -> Result<String, RegistryError> {
        let path = self.path_for(name);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(RegistryError::NotFound {
                name: Self::sanitize(name),
            });
        }
        Ok(fs::read_to_string(&path).await?)
    }

    /// Delete a component file. Deleting a missing component is an error.
    pub async fn remove(&self, name: &str) -> Result<(), RegistryError> {
        let path = self.path_for(name);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(RegistryError::NotFound {
                name: Self::sanitize(name),
            });
        }
        fs::remove_file(&path).await?;
        Ok(())
    }

    /// List stored component names.
    ///
    /// A missing directory yields an empty list. Names are sorted for
    /// stability; ordering is not part of the contract.
    pub async fn list_names(&self) -> Result<Vec<String>, RegistryError> {
        if !fs::try_exists(&self.root).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let mut read_dir = fs::read_dir(&self.root).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            let path = entry.path();
            let is_component = path.extension().and_then(|e| e.to_str()) == Some(COMPONENT_EXT)
                && entry.metadata().await.map(|m| m.is_file()).unwrap_or(false);
            if is_component
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
