//! Kiform - A codec for KiCad footprint files.
//!
//! Reads `.kicad_mod` S-expression text into a typed [`Footprint`], writes a
//! footprint back out in the layout KiCad itself produces, and creates new
//! SMD, through-hole or other footprints from scratch.

pub mod config;
pub mod schema;

mod error;
mod style;

pub use kiform_core::{factory, footprint, geometry, graphics, model, pad};

pub use error::{ErrorCategory, KiformError};
pub use style::FootprintStyle;

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info, trace};
use tempfile::NamedTempFile;

use kiform_core::{
    factory::FootprintIds,
    footprint::{Footprint, MountType},
};
use kiform_parser::Formatter;

use config::AppConfig;
use schema::{FromNode, ToNode};

/// Reads, writes and creates footprints.
///
/// # Examples
///
/// ```rust
/// use kiform::{FootprintCodec, config::AppConfig};
///
/// let source = r#"(footprint "R_0603" (layer "F.Cu") (attr smd))"#;
///
/// let codec = FootprintCodec::new(AppConfig::default());
/// let footprint = codec.decode(source).expect("Failed to decode");
/// assert_eq!(footprint.library_id, "R_0603");
///
/// let text = codec.encode(&footprint);
/// assert_eq!(text, "(footprint \"R_0603\"\n  (layer \"F.Cu\")\n  (attr smd)\n)\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FootprintCodec {
    config: AppConfig,
}

impl FootprintCodec {
    /// Create a new codec with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Decode footprint text.
    ///
    /// # Errors
    ///
    /// Returns [`KiformError::Decode`] carrying the source text for malformed
    /// text, a tree of the wrong shape, or a value that does not coerce.
    pub fn decode(&self, source: &str) -> Result<Footprint, KiformError> {
        info!(source_len = source.len(); "Decoding footprint");

        let tree = kiform_parser::parse(source)
            .map_err(|err| KiformError::new_decode_error(err, source))?;
        debug!(tag = tree.tag(), children_len = tree.len(); "Tree parsed");

        let footprint = Footprint::from_node(&tree)
            .map_err(|err| KiformError::new_decode_error(err.into(), source))?;

        debug!(
            library_id = footprint.library_id,
            pads_len = footprint.pads.len(),
            graphic_items_len = footprint.graphic_items.len();
            "Footprint decoded",
        );
        trace!(footprint:?; "Decoded footprint");

        Ok(footprint)
    }

    /// Read and decode the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`KiformError::Io`] when the file cannot be read, otherwise as
    /// [`decode`](Self::decode).
    pub fn decode_path(&self, path: impl AsRef<Path>) -> Result<Footprint, KiformError> {
        let path = path.as_ref();
        info!(path:? = path; "Reading footprint");
        let source = fs::read_to_string(path)?;
        self.decode(&source)
    }

    /// Encode `footprint` as text ending in a newline.
    pub fn encode(&self, footprint: &Footprint) -> String {
        let tree = footprint.to_node();
        trace!(tree:?; "Encoded tree");

        let formatter = Formatter::new(self.config.format().indent_width());
        let text = formatter.render(&tree, &FootprintStyle);
        debug!(library_id = footprint.library_id, text_len = text.len(); "Footprint encoded");

        text
    }

    /// Encode `footprint` and write it to `path`.
    ///
    /// The text goes to a temporary file next to `path` which then replaces
    /// it, so a failed write never leaves a truncated file behind.
    ///
    /// # Errors
    ///
    /// Returns [`KiformError::Io`] when the file cannot be written.
    pub fn encode_to_path(
        &self,
        footprint: &Footprint,
        path: impl AsRef<Path>,
    ) -> Result<(), KiformError> {
        let path = path.as_ref();
        let text = self.encode(footprint);

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut file = NamedTempFile::new_in(&dir)?;
        file.write_all(text.as_bytes())?;
        file.persist(path).map_err(|err| err.error)?;

        info!(path:? = path, bytes = text.len(); "Footprint written");
        Ok(())
    }

    /// Create a new footprint stamped with the configured version and
    /// generator.
    pub fn create_new(&self, mount: MountType, ids: FootprintIds) -> Footprint {
        info!(mount:% = mount; "Creating footprint");
        self.config.factory().factory().create(mount, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatConfig;

    #[test]
    fn test_decode_error_keeps_source() {
        let source = "(footprint \"X\" (layer \"F.Cu\") (bogus 1))";
        let err = FootprintCodec::default().decode(source).unwrap_err();
        match err {
            KiformError::Decode { src, .. } => assert_eq!(src, source),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_encode_uses_configured_indent() {
        let config = AppConfig::new(FormatConfig::new(4), Default::default());
        let codec = FootprintCodec::new(config);
        let footprint = codec.decode(r#"(footprint "X" (layer "F.Cu"))"#).unwrap();
        assert_eq!(codec.encode(&footprint), "(footprint \"X\"\n    (layer \"F.Cu\")\n)\n");
    }

    #[test]
    fn test_create_new_uses_configured_generator() {
        let config: AppConfig = toml::from_str("[factory]\ngenerator = \"pcbnew\"\nversion = 20221018").unwrap();
        let footprint =
            FootprintCodec::new(config).create_new(MountType::Smd, FootprintIds::new("R"));
        assert_eq!(footprint.generator.as_deref(), Some("pcbnew"));
        assert_eq!(footprint.version, Some(20221018));
    }
}
