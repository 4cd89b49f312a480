//! Configuration types.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Service configuration.
///
/// The component directory is threaded into the store at construction time
/// so tests can point at an isolated temporary directory.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory where component definitions are stored, one `{name}.js` per component.
    pub components_dir: PathBuf,
    /// Port for the HTTP asset server.
    pub http_port: u16,
    /// Whether to run the stdin command loop alongside the server.
    pub stdio_commands: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            components_dir: PathBuf::from("data/ui"),
            http_port: 8080,
            stdio_commands: true,
        }
    }
}

impl ServiceConfig {
    /// Build configuration from environment variables, falling back to defaults.
    ///
    /// - `WIDGET_HOST_DIR`: component storage directory
    /// - `WIDGET_HOST_PORT`: HTTP port
    /// - `WIDGET_HOST_STDIO`: set to `0` or `false` to disable the stdin command loop
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("WIDGET_HOST_DIR") {
            config.components_dir = PathBuf::from(dir);
        }

        if let Ok(port) = std::env::var("WIDGET_HOST_PORT") {
            config.http_port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "WIDGET_HOST_PORT".to_string(),
                message: format!("not a valid port number: {port}"),
            })?;
        }

        if let Ok(stdio) = std::env::var("WIDGET_HOST_STDIO") {
            config.stdio_commands = !matches!(stdio.as_str(), "0" | "false" | "no");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.components_dir, PathBuf::from("data/ui"));
        assert_eq!(config.http_port, 8080);
        assert!(config.stdio_commands);
    }
}
