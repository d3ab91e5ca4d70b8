//! The footprint root.

use kiform_core::{
    footprint::{Attribute, Attributes, Footprint},
    graphics::GraphicItem,
    model::Model,
    pad::Pad,
};
use kiform_parser::{
    Node,
    error::Result,
    keywords,
    schema::{Elision, FieldSpec, Fields, NodeBuilder},
};

use super::{
    FromNode, ToNode, child_tag,
    primitives::{
        LAYER, decode_integer, decode_number, decode_position, decode_text, leaf, position_node,
        symbol_node,
    },
};

const ENTITY: &str = "footprint";
/// Root tag of KiCad 5 footprints.
const LEGACY_ENTITY: &str = "module";

const VERSION: FieldSpec<i64> = FieldSpec::always("version");
const DESCR: FieldSpec<String> = FieldSpec::always("descr");
const TAGS: FieldSpec<String> = FieldSpec::always("tags");
const PATH: FieldSpec<String> = FieldSpec::always("path");
const AUTOPLACE_COST_90: FieldSpec<i64> = FieldSpec::always("autoplace_cost90");
const AUTOPLACE_COST_180: FieldSpec<i64> = FieldSpec::always("autoplace_cost180");
const SOLDER_MASK_MARGIN: FieldSpec<f64> = FieldSpec::always("solder_mask_margin");
const SOLDER_PASTE_MARGIN: FieldSpec<f64> = FieldSpec::always("solder_paste_margin");
const SOLDER_PASTE_RATIO: FieldSpec<f64> = FieldSpec::always("solder_paste_ratio");
const CLEARANCE: FieldSpec<f64> = FieldSpec::always("clearance");
const ZONE_CONNECT: FieldSpec<i64> = FieldSpec::always("zone_connect");
const THERMAL_WIDTH: FieldSpec<f64> = FieldSpec::always("thermal_width");
const THERMAL_GAP: FieldSpec<f64> = FieldSpec::always("thermal_gap");
/// An empty attribute set is never written.
const ATTR: FieldSpec<Attributes> = FieldSpec::new("attr", Elision::IfEmpty);

keywords! {
    enum FootprintTag {
        Version => "version",
        Generator => "generator",
        Layer => "layer",
        Tedit => "tedit",
        Tstamp => "tstamp",
        At => "at",
        Descr => "descr",
        Tags => "tags",
        Property => "property",
        Path => "path",
        AutoplaceCost90 => "autoplace_cost90",
        AutoplaceCost180 => "autoplace_cost180",
        SolderMaskMargin => "solder_mask_margin",
        SolderPasteMargin => "solder_paste_margin",
        SolderPasteRatio => "solder_paste_ratio",
        Clearance => "clearance",
        ZoneConnect => "zone_connect",
        ThermalWidth => "thermal_width",
        ThermalGap => "thermal_gap",
        Attr => "attr",
        FpText => "fp_text",
        FpLine => "fp_line",
        FpRect => "fp_rect",
        FpCircle => "fp_circle",
        FpArc => "fp_arc",
        FpPoly => "fp_poly",
        FpCurve => "fp_curve",
        Pad => "pad",
        Model => "model",
    }
}

impl FromNode for Footprint {
    fn from_node(node: &Node) -> Result<Self> {
        let mut fields = Fields::expect(node, &[ENTITY, LEGACY_ENTITY], ENTITY)?;
        let locked = fields.flag("locked");
        let placed = fields.flag("placed");
        let library_id = fields.next_text("library id")?;

        let mut footprint = Footprint::new(library_id);
        footprint.locked = locked;
        footprint.placed = placed;

        let mut layer = None;
        let mut attributes = None;
        for child in fields.nodes() {
            let overrides = &mut footprint.overrides;
            match child_tag::<FootprintTag>(&fields, child)? {
                FootprintTag::Version => {
                    fields.set_once(&mut footprint.version, child, decode_integer(child, ENTITY)?)?
                }
                FootprintTag::Generator => {
                    fields.set_once(&mut footprint.generator, child, decode_text(child, ENTITY)?)?
                }
                FootprintTag::Layer => fields.set_once(&mut layer, child, decode_text(child, ENTITY)?)?,
                FootprintTag::Tedit => {
                    fields.set_once(&mut footprint.tedit, child, decode_text(child, ENTITY)?)?
                }
                FootprintTag::Tstamp => {
                    fields.set_once(&mut footprint.tstamp, child, decode_text(child, ENTITY)?)?
                }
                FootprintTag::At => {
                    fields.set_once(&mut footprint.position, child, decode_position(child, ENTITY)?)?
                }
                FootprintTag::Descr => {
                    fields.set_once(&mut footprint.description, child, decode_text(child, ENTITY)?)?
                }
                FootprintTag::Tags => {
                    fields.set_once(&mut footprint.tags, child, decode_text(child, ENTITY)?)?
                }
                FootprintTag::Property => {
                    let (key, value) = decode_property(child)?;
                    let mut seen = footprint.properties.contains_key(&key).then_some(());
                    fields.set_once(&mut seen, child, ())?;
                    footprint.properties.insert(key, value);
                }
                FootprintTag::Path => {
                    fields.set_once(&mut footprint.path, child, decode_text(child, ENTITY)?)?
                }
                FootprintTag::AutoplaceCost90 => fields.set_once(
                    &mut footprint.autoplace_cost.rotate_90,
                    child,
                    decode_integer(child, ENTITY)?,
                )?,
                FootprintTag::AutoplaceCost180 => fields.set_once(
                    &mut footprint.autoplace_cost.rotate_180,
                    child,
                    decode_integer(child, ENTITY)?,
                )?,
                FootprintTag::SolderMaskMargin => fields.set_once(
                    &mut overrides.solder_mask_margin,
                    child,
                    decode_number(child, ENTITY)?,
                )?,
                FootprintTag::SolderPasteMargin => fields.set_once(
                    &mut overrides.solder_paste_margin,
                    child,
                    decode_number(child, ENTITY)?,
                )?,
                FootprintTag::SolderPasteRatio => fields.set_once(
                    &mut overrides.solder_paste_ratio,
                    child,
                    decode_number(child, ENTITY)?,
                )?,
                FootprintTag::Clearance => {
                    fields.set_once(&mut overrides.clearance, child, decode_number(child, ENTITY)?)?
                }
                FootprintTag::ZoneConnect => fields.set_once(
                    &mut overrides.zone_connect,
                    child,
                    decode_integer(child, ENTITY)?,
                )?,
                FootprintTag::ThermalWidth => fields.set_once(
                    &mut overrides.thermal_width,
                    child,
                    decode_number(child, ENTITY)?,
                )?,
                FootprintTag::ThermalGap => {
                    fields.set_once(&mut overrides.thermal_gap, child, decode_number(child, ENTITY)?)?
                }
                FootprintTag::Attr => {
                    fields.set_once(&mut attributes, child, decode_attributes(child)?)?
                }
                FootprintTag::FpText
                | FootprintTag::FpLine
                | FootprintTag::FpRect
                | FootprintTag::FpCircle
                | FootprintTag::FpArc
                | FootprintTag::FpPoly
                | FootprintTag::FpCurve => {
                    footprint.graphic_items.push(GraphicItem::from_node(child)?)
                }
                FootprintTag::Pad => footprint.pads.push(Pad::from_node(child)?),
                FootprintTag::Model => footprint.models.push(Model::from_node(child)?),
            }
        }
        fields.finish()?;

        if let Some(layer) = layer {
            footprint.layer = layer;
        }
        footprint.attributes = attributes.unwrap_or_default();
        Ok(footprint)
    }
}

impl ToNode for Footprint {
    fn to_node(&self) -> Node {
        let overrides = &self.overrides;
        NodeBuilder::new(ENTITY)
            .string(self.library_id.as_str())
            .flag("locked", self.locked)
            .flag("placed", self.placed)
            .opt_field(&VERSION, self.version.as_ref())
            .opt_child(
                self.generator
                    .as_deref()
                    .map(|generator| symbol_node("generator", generator)),
            )
            .field(&LAYER, &self.layer)
            .opt_child(self.tedit.as_deref().map(|tedit| symbol_node("tedit", tedit)))
            .opt_child(self.tstamp.as_deref().map(|tstamp| symbol_node("tstamp", tstamp)))
            .opt_child(self.position.map(position_node))
            .opt_field(&DESCR, self.description.as_ref())
            .opt_field(&TAGS, self.tags.as_ref())
            .children(self.properties.iter().map(|(key, value)| {
                NodeBuilder::new("property")
                    .string(key.as_str())
                    .string(value.as_str())
                    .build()
            }))
            .opt_field(&PATH, self.path.as_ref())
            .opt_field(&AUTOPLACE_COST_90, self.autoplace_cost.rotate_90.as_ref())
            .opt_field(&AUTOPLACE_COST_180, self.autoplace_cost.rotate_180.as_ref())
            .opt_field(&SOLDER_MASK_MARGIN, overrides.solder_mask_margin.as_ref())
            .opt_field(&SOLDER_PASTE_MARGIN, overrides.solder_paste_margin.as_ref())
            .opt_field(&SOLDER_PASTE_RATIO, overrides.solder_paste_ratio.as_ref())
            .opt_field(&CLEARANCE, overrides.clearance.as_ref())
            .opt_field(&ZONE_CONNECT, overrides.zone_connect.as_ref())
            .opt_field(&THERMAL_WIDTH, overrides.thermal_width.as_ref())
            .opt_field(&THERMAL_GAP, overrides.thermal_gap.as_ref())
            .field(&ATTR, &self.attributes)
            .children(self.graphic_items.iter().map(ToNode::to_node))
            .children(self.pads.iter().map(ToNode::to_node))
            .children(self.models.iter().map(ToNode::to_node))
            .build()
    }
}

/// `(property "key" "value")`.
fn decode_property(node: &Node) -> Result<(String, String)> {
    let mut fields = Fields::new(node, ENTITY);
    leaf(&fields)?;
    let key = fields.next_text("property name")?;
    let value = fields.next_text("property value")?;
    fields.finish()?;
    Ok((key, value))
}

/// `(attr flag...)`; the legacy `virtual` flag stands for both exclusions.
fn decode_attributes(node: &Node) -> Result<Attributes> {
    let mut fields = Fields::new(node, ENTITY);
    leaf(&fields)?;
    let mut attributes = Attributes::new();
    if fields.flag("virtual") {
        attributes.extend([Attribute::ExcludeFromPosFiles, Attribute::ExcludeFromBom]);
    }
    while fields.has_next() {
        attributes.insert(fields.next_keyword::<Attribute>("attribute")?);
    }
    fields.finish()?;
    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use kiform_core::{footprint::MountType, geometry::Position};
    use kiform_parser::{ErrorCode, parse};

    use super::*;

    fn decode(source: &str) -> Result<Footprint> {
        let node = parse(source).unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"));
        Footprint::from_node(&node)
    }

    #[test]
    fn test_header() {
        let footprint = decode(
            r#"(footprint "R_0603" locked (version 20211014) (generator pcbnew)
                 (layer "B.Cu") (tedit 5F68FEEE) (at 10 20 90)
                 (descr "Resistor SMD 0603") (tags "resistor")
                 (property "Sheetfile" "main.kicad_sch") (property "Sheetname" "")
                 (path "/abc") (autoplace_cost90 3) (attr smd))"#,
        )
        .unwrap();

        assert_eq!(footprint.library_id, "R_0603");
        assert!(footprint.locked);
        assert!(!footprint.placed);
        assert_eq!(footprint.version, Some(20211014));
        assert_eq!(footprint.generator.as_deref(), Some("pcbnew"));
        assert_eq!(footprint.layer, "B.Cu");
        assert_eq!(footprint.tedit.as_deref(), Some("5F68FEEE"));
        assert_eq!(footprint.position, Some(Position::new(10.0, 20.0).with_angle(90.0)));
        assert_eq!(footprint.description.as_deref(), Some("Resistor SMD 0603"));
        assert_eq!(
            footprint.properties.keys().collect::<Vec<_>>(),
            ["Sheetfile", "Sheetname"]
        );
        assert_eq!(footprint.autoplace_cost.rotate_90, Some(3));
        assert_eq!(footprint.mount_type(), MountType::Smd);
    }

    #[test]
    fn test_legacy_module() {
        let footprint = decode("(module R_0603 (tedit 5B307E3A) (attr virtual))").unwrap();
        assert_eq!(footprint.library_id, "R_0603");
        assert_eq!(footprint.layer, "F.Cu");
        assert_eq!(footprint.version, None);
        assert!(footprint.attributes.contains(Attribute::ExcludeFromPosFiles));
        assert!(footprint.attributes.contains(Attribute::ExcludeFromBom));
        assert_eq!(footprint.to_node().tag(), "footprint");
    }

    #[test]
    fn test_empty_attr_is_dropped() {
        let footprint = decode(r#"(footprint "X" (layer "F.Cu") (attr))"#).unwrap();
        assert!(footprint.attributes.is_empty());
        assert!(footprint.to_node().find("attr").is_none());
    }

    #[test]
    fn test_wrong_root() {
        let err = decode("(kicad_symbol_lib (version 20211014))").unwrap_err();
        assert_eq!(err.code(), ErrorCode::E200);
    }

    #[test]
    fn test_unknown_tag_names_entity_and_line() {
        let err = decode("(footprint \"X\"\n  (layer \"F.Cu\")\n  (zone (net 0)))").unwrap_err();
        assert_eq!(err.code(), ErrorCode::E202);
        assert_eq!(err.message(), "footprint: unknown tag `zone`");
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_unknown_attribute() {
        let err = decode(r#"(footprint "X" (attr smd glued))"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::E301);
    }

    #[test]
    fn test_duplicate_property() {
        let err = decode(r#"(footprint "X" (property "a" "1") (property "a" "2"))"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::E204);
    }

    #[test]
    fn test_missing_library_id() {
        let err = decode("(footprint (layer \"F.Cu\"))").unwrap_err();
        assert_eq!(err.code(), ErrorCode::E203);
    }

    #[test]
    fn test_children_order_on_encode() {
        let footprint = decode(
            r#"(footprint "X" (attr through_hole)
                 (model "a.wrl")
                 (pad "1" smd rect (at 0 0) (size 1 1) (layers "F.Cu"))
                 (fp_line (start 0 0) (end 1 0) (layer "F.SilkS") (width 0.12))
                 (layer "F.Cu"))"#,
        )
        .unwrap();

        let node = footprint.to_node();
        let tags: Vec<_> = node.nodes().map(Node::tag).collect();
        assert_eq!(tags, ["layer", "attr", "fp_line", "pad", "model"]);
    }
}
