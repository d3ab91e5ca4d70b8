//! Construction of new footprints with sensible defaults.
//!
//! Every footprint from the [`Factory`] carries the three standard texts
//! (reference, value and a user `${REFERENCE}` on the fabrication layer).
//! SMD and THT footprints also get their attribute flag and a starter pad.
//!
//! # Example
//!
//! ```
//! # use kiform_core::factory::{Factory, FootprintIds};
//! # use kiform_core::footprint::MountType;
//! let footprint = Factory::default().create(MountType::Smd, FootprintIds::new("R_0603"));
//! assert_eq!(footprint.value(), Some("R_0603"));
//! assert_eq!(footprint.reference(), Some("REF**"));
//! assert_eq!(footprint.pads.len(), 1);
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

use crate::{
    footprint::{Attributes, Footprint, MountType},
    geometry::{Position, Size},
    graphics::{FpText, GraphicItem, TextKind},
    pad::{Drill, Pad, PadShape, PadType},
};

/// Format version written by new footprints.
pub const DEFAULT_VERSION: i64 = 20211014;

/// Generator written by new footprints.
pub const DEFAULT_GENERATOR: &str = "kiform";

/// Library identifier used when none is given.
pub const DEFAULT_LIBRARY_ID: &str = "Footprint";

/// Reference text used when none is given.
pub const DEFAULT_REFERENCE: &str = "REF**";

const TEXT_SIZE: f64 = 1.0;
const TEXT_THICKNESS: f64 = 0.15;

/// Identifiers of a new footprint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FootprintIds {
    pub library_id: Option<String>,
    /// Defaults to the library identifier.
    pub value: Option<String>,
    /// Defaults to `REF**`.
    pub reference: Option<String>,
}

impl FootprintIds {
    pub fn new(library_id: impl Into<String>) -> Self {
        Self {
            library_id: Some(library_id.into()),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Builds new footprints.
#[derive(Debug, Clone)]
pub struct Factory {
    version: i64,
    generator: String,
}

impl Default for Factory {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION, DEFAULT_GENERATOR)
    }
}

impl Factory {
    pub fn new(version: i64, generator: impl Into<String>) -> Self {
        Self {
            version,
            generator: generator.into(),
        }
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }

    /// Create a footprint of the given mount type.
    ///
    /// The edit timestamp is set to the current time; callers that need
    /// stable output overwrite [`Footprint::tedit`].
    pub fn create(&self, mount: MountType, ids: FootprintIds) -> Footprint {
        let library_id = ids
            .library_id
            .unwrap_or_else(|| DEFAULT_LIBRARY_ID.to_string());
        let value = ids.value.unwrap_or_else(|| library_id.clone());
        let reference = ids
            .reference
            .unwrap_or_else(|| DEFAULT_REFERENCE.to_string());

        let mut footprint = Footprint::new(library_id);
        footprint.version = Some(self.version);
        footprint.generator = Some(self.generator.clone());
        footprint.tedit = Some(edit_stamp());
        footprint.attributes = Attributes::for_mount(mount);
        footprint.graphic_items = vec![
            standard_text(TextKind::Reference, reference, -0.5, "F.SilkS"),
            standard_text(TextKind::Value, value, 1.0, "F.Fab"),
            standard_text(TextKind::User, "${REFERENCE}", 2.5, "F.Fab"),
        ];
        footprint.pads = starter_pad(mount).into_iter().collect();

        debug!(
            mount:% = mount,
            library_id = footprint.library_id.as_str();
            "Created footprint"
        );
        footprint
    }
}

fn standard_text(kind: TextKind, text: impl Into<String>, y: f64, layer: &str) -> GraphicItem {
    let mut text = FpText::new(
        kind,
        text,
        Position::new(0.0, y).with_unlocked(true),
        layer,
    );
    text.effects.font.size = Size::square(TEXT_SIZE);
    text.effects.font.thickness = Some(TEXT_THICKNESS);
    GraphicItem::Text(text)
}

fn starter_pad(mount: MountType) -> Option<Pad> {
    match mount {
        MountType::Smd => Some(Pad::new(
            "1",
            PadType::Smd,
            PadShape::Rect,
            Position::new(0.0, 0.0),
            Size::square(1.0),
            ["F.Cu", "F.Paste", "F.Mask"],
        )),
        MountType::Tht => Some(
            Pad::new(
                "1",
                PadType::ThruHole,
                PadShape::Circle,
                Position::new(0.0, 0.0),
                Size::square(1.7),
                ["F.Cu", "B.Cu", "F.Mask", "B.Mask"],
            )
            .with_drill(Drill::round(1.0)),
        ),
        MountType::Other => None,
    }
}

/// The current time as an edit timestamp: uppercase hexadecimal seconds
/// since the Unix epoch.
pub fn edit_stamp() -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("{seconds:X}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::Attribute;

    #[test]
    fn test_common_defaults() {
        let footprint = Factory::default().create(MountType::Other, FootprintIds::default());

        assert_eq!(footprint.library_id, DEFAULT_LIBRARY_ID);
        assert_eq!(footprint.version, Some(DEFAULT_VERSION));
        assert_eq!(footprint.generator.as_deref(), Some(DEFAULT_GENERATOR));
        assert_eq!(footprint.layer, "F.Cu");
        assert_eq!(footprint.graphic_items.len(), 3);

        let reference = footprint.text(TextKind::Reference).unwrap();
        assert_eq!(reference.text, DEFAULT_REFERENCE);
        assert_eq!(reference.layer, "F.SilkS");
        assert_eq!(reference.position, Position::new(0.0, -0.5).with_unlocked(true));
        assert_eq!(reference.effects.font.thickness, Some(0.15));

        let user = footprint.text(TextKind::User).unwrap();
        assert_eq!(user.text, "${REFERENCE}");
        assert_eq!(user.position.y(), 2.5);
    }

    #[test]
    fn test_smd() {
        let footprint = Factory::default().create(MountType::Smd, FootprintIds::new("C_0402"));

        assert_eq!(footprint.mount_type(), MountType::Smd);
        assert!(footprint.attributes.contains(Attribute::Smd));

        let pad = footprint.pad("1").unwrap();
        assert_eq!(pad.kind, PadType::Smd);
        assert_eq!(pad.shape, PadShape::Rect);
        assert!(pad.drill.is_none());
    }

    #[test]
    fn test_tht() {
        let footprint = Factory::default().create(MountType::Tht, FootprintIds::new("PinHeader"));

        assert_eq!(footprint.mount_type(), MountType::Tht);
        let pad = footprint.pad("1").unwrap();
        assert_eq!(pad.kind, PadType::ThruHole);
        assert_eq!(pad.size, Size::square(1.7));
        assert_eq!(pad.drill, Some(Drill::round(1.0)));
        assert_eq!(pad.layers, ["F.Cu", "B.Cu", "F.Mask", "B.Mask"]);
    }

    #[test]
    fn test_other_has_no_attributes_or_pads() {
        let footprint = Factory::default().create(MountType::Other, FootprintIds::new("Logo"));
        assert!(footprint.attributes.is_empty());
        assert!(footprint.pads.is_empty());
    }

    #[test]
    fn test_ids_override_texts() {
        let ids = FootprintIds::new("R_0603")
            .with_value("10k")
            .with_reference("R1");
        let footprint = Factory::new(20221018, "pcbnew").create(MountType::Smd, ids);

        assert_eq!(footprint.value(), Some("10k"));
        assert_eq!(footprint.reference(), Some("R1"));
        assert_eq!(footprint.version, Some(20221018));
        assert_eq!(footprint.generator.as_deref(), Some("pcbnew"));
    }

    #[test]
    fn test_edit_stamp_is_uppercase_hex() {
        let stamp = edit_stamp();
        assert!(!stamp.is_empty());
        assert!(
            stamp
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }
}
