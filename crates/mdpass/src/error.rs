//! Error types.

use std::path::PathBuf;

/// Failure to load a [`RenderConfig`].
///
/// Rendering itself cannot fail; only loading a [`RenderConfig`] can.
///
/// [`RenderConfig`]: crate::RenderConfig
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The render configuration file does not exist.
    #[error("Render configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The render configuration file exists but could not be read.
    #[error("Failed to read render configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML or a render option has the wrong type.
    #[error("Invalid render configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),
    /// A render option is out of range.
    #[error("Invalid render configuration: {0}")]
    Validation(String),
}
