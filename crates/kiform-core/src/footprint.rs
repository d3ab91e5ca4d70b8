//! The footprint entity.

use std::{collections::BTreeSet, fmt};

use indexmap::IndexMap;
use kiform_parser::{
    Atom, Node, keywords,
    schema::{FieldValue, Keyword},
};

use crate::{
    geometry::Position,
    graphics::{FpText, GraphicItem, TextKind},
    model::Model,
    pad::Pad,
};

/// Layer a new footprint is placed on.
pub const DEFAULT_LAYER: &str = "F.Cu";

keywords! {
    /// One flag of a footprint's `(attr ...)` list.
    ///
    /// Declaration order is the order flags are written in.
    pub enum Attribute {
        ThroughHole => "through_hole",
        Smd => "smd",
        BoardOnly => "board_only",
        ExcludeFromPosFiles => "exclude_from_pos_files",
        ExcludeFromBom => "exclude_from_bom",
        AllowMissingCourtyard => "allow_missing_courtyard",
    }
}

/// How a footprint is mounted, derived from its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountType {
    Smd,
    Tht,
    Other,
}

impl fmt::Display for MountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountType::Smd => write!(f, "SMD"),
            MountType::Tht => write!(f, "THT"),
            MountType::Other => write!(f, "Other"),
        }
    }
}

/// The set of footprint attribute flags.
///
/// An empty set is never written: it encodes as the absence of the `attr`
/// node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeSet<Attribute>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// The attributes a factory footprint of `mount` starts with.
    pub fn for_mount(mount: MountType) -> Self {
        match mount {
            MountType::Smd => [Attribute::Smd].into_iter().collect(),
            MountType::Tht => [Attribute::ThroughHole].into_iter().collect(),
            MountType::Other => Self::new(),
        }
    }

    /// Add a flag; returns whether it was new.
    pub fn insert(&mut self, attribute: Attribute) -> bool {
        self.0.insert(attribute)
    }

    pub fn remove(&mut self, attribute: Attribute) -> bool {
        self.0.remove(&attribute)
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        self.0.contains(&attribute)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Flags in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.0.iter().copied()
    }

    /// `smd` wins over `through_hole` when a file sets both.
    pub fn mount_type(&self) -> MountType {
        if self.contains(Attribute::Smd) {
            MountType::Smd
        } else if self.contains(Attribute::ThroughHole) {
            MountType::Tht
        } else {
            MountType::Other
        }
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Attribute> for Attributes {
    fn extend<I: IntoIterator<Item = Attribute>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Written as bare flags in canonical order.
impl FieldValue for Attributes {
    fn write(&self, node: &mut Node) {
        for attribute in self.iter() {
            node.push(Atom::symbol(attribute.as_str()));
        }
    }

    fn is_empty(&self) -> bool {
        Attributes::is_empty(self)
    }
}

/// Autoplacer costs, 0 to 10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoplaceCost {
    pub rotate_90: Option<i64>,
    pub rotate_180: Option<i64>,
}

/// Footprint-level overrides of board design rules.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalOverrides {
    pub solder_mask_margin: Option<f64>,
    pub solder_paste_margin: Option<f64>,
    pub solder_paste_ratio: Option<f64>,
    pub clearance: Option<f64>,
    pub zone_connect: Option<i64>,
    pub thermal_width: Option<f64>,
    pub thermal_gap: Option<f64>,
}

/// A reusable land pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    /// Library identifier, e.g. `Resistor_SMD:R_0603_1608Metric`.
    pub library_id: String,
    pub locked: bool,
    pub placed: bool,
    pub version: Option<i64>,
    pub generator: Option<String>,
    pub layer: String,
    /// Legacy edit timestamp as uppercase hexadecimal seconds.
    pub tedit: Option<String>,
    pub tstamp: Option<String>,
    /// Placement on a board; absent in library files.
    pub position: Option<Position>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub properties: IndexMap<String, String>,
    pub path: Option<String>,
    pub autoplace_cost: AutoplaceCost,
    pub overrides: LocalOverrides,
    pub attributes: Attributes,
    pub graphic_items: Vec<GraphicItem>,
    pub pads: Vec<Pad>,
    pub models: Vec<Model>,
}

impl Footprint {
    /// An empty footprint on the default layer.
    pub fn new(library_id: impl Into<String>) -> Self {
        Self {
            library_id: library_id.into(),
            locked: false,
            placed: false,
            version: None,
            generator: None,
            layer: DEFAULT_LAYER.to_string(),
            tedit: None,
            tstamp: None,
            position: None,
            description: None,
            tags: None,
            properties: IndexMap::new(),
            path: None,
            autoplace_cost: AutoplaceCost::default(),
            overrides: LocalOverrides::default(),
            attributes: Attributes::new(),
            graphic_items: Vec::new(),
            pads: Vec::new(),
            models: Vec::new(),
        }
    }

    pub fn mount_type(&self) -> MountType {
        self.attributes.mount_type()
    }

    /// The first text of `kind`.
    pub fn text(&self, kind: TextKind) -> Option<&FpText> {
        self.graphic_items
            .iter()
            .filter_map(GraphicItem::as_text)
            .find(|text| text.kind == kind)
    }

    /// What the reference text shows, e.g. `REF**`.
    pub fn reference(&self) -> Option<&str> {
        self.text(TextKind::Reference).map(|text| text.text.as_str())
    }

    /// What the value text shows.
    pub fn value(&self) -> Option<&str> {
        self.text(TextKind::Value).map(|text| text.text.as_str())
    }

    /// Look up a pad by number.
    pub fn pad(&self, number: &str) -> Option<&Pad> {
        self.pads.iter().find(|pad| pad.number == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_canonical_order() {
        let attributes: Attributes = [
            Attribute::ExcludeFromBom,
            Attribute::Smd,
            Attribute::ExcludeFromPosFiles,
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = attributes.iter().collect();
        assert_eq!(
            order,
            [
                Attribute::Smd,
                Attribute::ExcludeFromPosFiles,
                Attribute::ExcludeFromBom
            ]
        );
    }

    #[test]
    fn test_mount_type_from_attributes() {
        assert_eq!(Attributes::for_mount(MountType::Smd).mount_type(), MountType::Smd);
        assert_eq!(Attributes::for_mount(MountType::Tht).mount_type(), MountType::Tht);
        assert_eq!(Attributes::new().mount_type(), MountType::Other);

        let board_only: Attributes = [Attribute::BoardOnly].into_iter().collect();
        assert_eq!(board_only.mount_type(), MountType::Other);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut attributes = Attributes::new();
        assert!(attributes.insert(Attribute::Smd));
        assert!(!attributes.insert(Attribute::Smd));
        assert_eq!(attributes.len(), 1);
        assert!(attributes.remove(Attribute::Smd));
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_attributes_write_as_flags() {
        let attributes: Attributes = [Attribute::ExcludeFromBom, Attribute::ThroughHole]
            .into_iter()
            .collect();
        let mut node = Node::new("attr");
        attributes.write(&mut node);
        assert_eq!(
            node,
            Node::new("attr")
                .with_symbol("through_hole")
                .with_symbol("exclude_from_bom")
        );
        assert!(FieldValue::is_empty(&Attributes::new()));
    }

    #[test]
    fn test_text_lookup() {
        let mut footprint = Footprint::new("R_0603");
        footprint.graphic_items.push(
            FpText::new(TextKind::Reference, "R1", Position::new(0.0, -1.0), "F.SilkS").into(),
        );
        footprint.graphic_items.push(
            FpText::new(TextKind::Value, "10k", Position::new(0.0, 1.0), "F.Fab").into(),
        );

        assert_eq!(footprint.reference(), Some("R1"));
        assert_eq!(footprint.value(), Some("10k"));
        assert!(footprint.text(TextKind::User).is_none());
        assert_eq!(footprint.layer, DEFAULT_LAYER);
    }
}
