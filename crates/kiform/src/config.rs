//! Configuration types for the footprint codec.
//!
//! This module provides configuration structures that control how footprints
//! are written and what new footprints carry. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining format and factory settings.
//! - [`FormatConfig`] - Controls the text layout, such as the indentation width.
//! - [`FactoryConfig`] - Controls the version and generator stamped on new footprints.
//!
//! # Example
//!
//! ```
//! # use kiform::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.format().indent_width(), 2);
//! assert_eq!(config.factory().generator(), "kiform");
//! ```

use serde::Deserialize;

use kiform_core::factory::{DEFAULT_GENERATOR, DEFAULT_VERSION, Factory};

/// Top-level configuration combining format and factory settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Format configuration section.
    #[serde(default)]
    format: FormatConfig,

    /// Factory configuration section.
    #[serde(default)]
    factory: FactoryConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified format and factory configurations.
    pub fn new(format: FormatConfig, factory: FactoryConfig) -> Self {
        Self { format, factory }
    }

    /// Returns the format configuration.
    pub fn format(&self) -> &FormatConfig {
        &self.format
    }

    /// Returns the factory configuration.
    pub fn factory(&self) -> &FactoryConfig {
        &self.factory
    }
}

/// Text layout configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    /// Spaces per nesting level.
    #[serde(default = "default_indent_width")]
    indent_width: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
        }
    }
}

impl FormatConfig {
    pub fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }

    /// Returns the number of spaces per nesting level.
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }
}

fn default_indent_width() -> usize {
    2
}

/// Values stamped on footprints created from scratch.
#[derive(Debug, Clone, Deserialize)]
pub struct FactoryConfig {
    /// Generator written into `(generator ...)`.
    #[serde(default = "default_generator")]
    generator: String,

    /// Format version written into `(version ...)`.
    #[serde(default = "default_version")]
    version: i64,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            generator: default_generator(),
            version: default_version(),
        }
    }
}

impl FactoryConfig {
    pub fn new(generator: impl Into<String>, version: i64) -> Self {
        Self {
            generator: generator.into(),
            version,
        }
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// A [`Factory`] using these settings.
    pub fn factory(&self) -> Factory {
        Factory::new(self.version, self.generator.as_str())
    }
}

fn default_generator() -> String {
    DEFAULT_GENERATOR.to_string()
}

fn default_version() -> i64 {
    DEFAULT_VERSION
}
