//! Renderer configuration.
//!
//! Settings are read from TOML, either as bare keys or from a `[markdown]`
//! table so they can live in a host application's own config file:
//!
//! ```toml
//! [markdown]
//! hard_line_breaks = false
//! max_nesting_depth = 16
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Table name used when the settings are embedded in a larger file.
const SECTION: &str = "markdown";

/// Rendering options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Turn two or more trailing spaces into `<br/>` inside paragraphs.
    pub hard_line_breaks: bool,
    /// Maximum nesting of lists and blockquotes. Deeper containers are
    /// rendered as plain text.
    pub max_nesting_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hard_line_breaks: true,
            max_nesting_depth: 32,
        }
    }
}

impl RenderConfig {
    /// Parse configuration from a TOML string.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or mistyped values and
    /// `ConfigError::Validation` if a value is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use mdpass::RenderConfig;
    ///
    /// let config = RenderConfig::from_toml_str("hard_line_breaks = false").unwrap();
    /// assert!(!config.hard_line_breaks);
    /// assert_eq!(config.max_nesting_depth, 32);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(content)?;
        let config: Self = match table.remove(SECTION) {
            Some(section) => section.try_into()?,
            None => toml::Value::Table(table).try_into()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist,
    /// `ConfigError::Io` if it cannot be read, and the errors of
    /// [`RenderConfig::from_toml_str`] for its content.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `max_nesting_depth` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_nesting_depth == 0 {
            return Err(ConfigError::Validation(
                "max_nesting_depth must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }
}
