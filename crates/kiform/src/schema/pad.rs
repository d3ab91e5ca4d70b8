//! Pads.
//!
//! A pad is written as a header (number, type, shape and the placement,
//! drill, layer and net fields) followed by optional trailing overrides. The
//! trailing section is the one place unknown nodes are tolerated: once the
//! layer list has been seen, an unrecognised node is kept in
//! [`Pad::extra`] and written back after the known overrides.

use kiform_core::{
    geometry::{Position, Size},
    pad::{
        ChamferCorner, CustomClearance, CustomPadOptions, Drill, Net, Pad, PadProperty, PadShape,
        PadType,
    },
};
use kiform_parser::{
    Node,
    error::Result,
    keywords,
    schema::{Elision, FieldSpec, Fields, Keyword, NodeBuilder},
};

use super::{
    FromNode, ToNode, child_tag,
    primitives::{
        decode_integer, decode_list, decode_number, decode_point, decode_position, decode_size,
        decode_switch, decode_text, leaf, point_node, position_node, size_node, symbol_node,
    },
};

const ENTITY: &str = "pad";

const PROPERTY: FieldSpec<PadProperty> = FieldSpec::always("property");
const LAYERS: FieldSpec<Vec<String>> = FieldSpec::always("layers");
const ROUNDRECT_RRATIO: FieldSpec<f64> = FieldSpec::always("roundrect_rratio");
const CHAMFER_RATIO: FieldSpec<f64> = FieldSpec::always("chamfer_ratio");
const CHAMFER: FieldSpec<Vec<ChamferCorner>> = FieldSpec::new("chamfer", Elision::IfEmpty);
const PIN_FUNCTION: FieldSpec<String> = FieldSpec::always("pinfunction");
const PIN_TYPE: FieldSpec<String> = FieldSpec::always("pintype");
const DIE_LENGTH: FieldSpec<f64> = FieldSpec::always("die_length");
const SOLDER_MASK_MARGIN: FieldSpec<f64> = FieldSpec::always("solder_mask_margin");
const SOLDER_PASTE_MARGIN: FieldSpec<f64> = FieldSpec::always("solder_paste_margin");
const SOLDER_PASTE_MARGIN_RATIO: FieldSpec<f64> = FieldSpec::always("solder_paste_margin_ratio");
const CLEARANCE: FieldSpec<f64> = FieldSpec::always("clearance");
const ZONE_CONNECT: FieldSpec<i64> = FieldSpec::always("zone_connect");
const THERMAL_WIDTH: FieldSpec<f64> = FieldSpec::always("thermal_width");
const THERMAL_GAP: FieldSpec<f64> = FieldSpec::always("thermal_gap");
const OPTIONS_CLEARANCE: FieldSpec<CustomClearance> = FieldSpec::always("clearance");
const OPTIONS_ANCHOR: FieldSpec<PadShape> = FieldSpec::always("anchor");

keywords! {
    enum PadTag {
        At => "at",
        Size => "size",
        RectDelta => "rect_delta",
        Drill => "drill",
        Property => "property",
        Layers => "layers",
        RemoveUnusedLayers => "remove_unused_layers",
        KeepEndLayers => "keep_end_layers",
        RoundrectRratio => "roundrect_rratio",
        ChamferRatio => "chamfer_ratio",
        Chamfer => "chamfer",
        Net => "net",
        PinFunction => "pinfunction",
        PinType => "pintype",
        Tstamp => "tstamp",
        DieLength => "die_length",
        SolderMaskMargin => "solder_mask_margin",
        SolderPasteMargin => "solder_paste_margin",
        SolderPasteMarginRatio => "solder_paste_margin_ratio",
        Clearance => "clearance",
        ZoneConnect => "zone_connect",
        ThermalWidth => "thermal_width",
        ThermalGap => "thermal_gap",
        Options => "options",
        Primitives => "primitives",
    }
}

impl PadTag {
    fn is_header(self) -> bool {
        self <= PadTag::Tstamp
    }
}

keywords! {
    enum OptionsTag {
        Clearance => "clearance",
        Anchor => "anchor",
    }
}

/// Whether `tag` belongs to a pad's header rather than its trailing section.
pub(crate) fn is_pad_header(tag: &str) -> bool {
    PadTag::from_keyword(tag).is_some_and(PadTag::is_header)
}

impl FromNode for Pad {
    fn from_node(node: &Node) -> Result<Self> {
        let mut fields = Fields::expect(node, &[ENTITY], ENTITY)?;
        let locked = fields.flag("locked");
        let number = fields.next_text("number")?;
        let kind = fields.next_keyword::<PadType>("type")?;
        let shape = fields.next_keyword::<PadShape>("shape")?;

        let mut position = None;
        let mut size = None;
        let mut layers = None;
        let mut pad = Pad::new(
            number,
            kind,
            shape,
            Position::default(),
            Size::default(),
            Vec::<String>::new(),
        );
        pad.locked = locked;

        for child in fields.nodes() {
            let Some(tag) = PadTag::from_keyword(child.tag()) else {
                if layers.is_none() {
                    return Err(fields.unknown(child));
                }
                pad.extra.push(child.clone());
                continue;
            };
            match tag {
                PadTag::At => fields.set_once(&mut position, child, decode_position(child, ENTITY)?)?,
                PadTag::Size => fields.set_once(&mut size, child, decode_size(child, ENTITY)?)?,
                PadTag::RectDelta => {
                    fields.set_once(&mut pad.rect_delta, child, decode_point(child, ENTITY)?)?
                }
                PadTag::Drill => fields.set_once(&mut pad.drill, child, decode_drill(child)?)?,
                PadTag::Property => {
                    fields.set_once(&mut pad.property, child, decode_property(child)?)?
                }
                PadTag::Layers => fields.set_once(&mut layers, child, decode_list(child, ENTITY)?)?,
                PadTag::RemoveUnusedLayers => {
                    pad.remove_unused_layers = decode_switch(child, ENTITY)?
                }
                PadTag::KeepEndLayers => pad.keep_end_layers = decode_switch(child, ENTITY)?,
                PadTag::RoundrectRratio => {
                    fields.set_once(&mut pad.roundrect_rratio, child, decode_number(child, ENTITY)?)?
                }
                PadTag::ChamferRatio => {
                    fields.set_once(&mut pad.chamfer_ratio, child, decode_number(child, ENTITY)?)?
                }
                PadTag::Chamfer => pad.chamfer = decode_chamfer(child)?,
                PadTag::Net => fields.set_once(&mut pad.net, child, decode_net(child)?)?,
                PadTag::PinFunction => {
                    fields.set_once(&mut pad.pin_function, child, decode_text(child, ENTITY)?)?
                }
                PadTag::PinType => {
                    fields.set_once(&mut pad.pin_type, child, decode_text(child, ENTITY)?)?
                }
                PadTag::Tstamp => {
                    fields.set_once(&mut pad.tstamp, child, decode_text(child, ENTITY)?)?
                }
                PadTag::DieLength => {
                    fields.set_once(&mut pad.die_length, child, decode_number(child, ENTITY)?)?
                }
                PadTag::SolderMaskMargin => fields.set_once(
                    &mut pad.solder_mask_margin,
                    child,
                    decode_number(child, ENTITY)?,
                )?,
                PadTag::SolderPasteMargin => fields.set_once(
                    &mut pad.solder_paste_margin,
                    child,
                    decode_number(child, ENTITY)?,
                )?,
                PadTag::SolderPasteMarginRatio => fields.set_once(
                    &mut pad.solder_paste_margin_ratio,
                    child,
                    decode_number(child, ENTITY)?,
                )?,
                PadTag::Clearance => {
                    fields.set_once(&mut pad.clearance, child, decode_number(child, ENTITY)?)?
                }
                PadTag::ZoneConnect => {
                    fields.set_once(&mut pad.zone_connect, child, decode_integer(child, ENTITY)?)?
                }
                PadTag::ThermalWidth => {
                    fields.set_once(&mut pad.thermal_width, child, decode_number(child, ENTITY)?)?
                }
                PadTag::ThermalGap => {
                    fields.set_once(&mut pad.thermal_gap, child, decode_number(child, ENTITY)?)?
                }
                PadTag::Options => fields.set_once(&mut pad.options, child, decode_options(child)?)?,
                PadTag::Primitives => {
                    fields.set_once(&mut pad.primitives, child, decode_primitives(child)?)?
                }
            }
        }

        pad.position = fields.require(position, "at")?;
        pad.size = fields.require(size, "size")?;
        pad.layers = fields.require(layers, "layers")?;
        fields.finish()?;
        Ok(pad)
    }
}

impl ToNode for Pad {
    fn to_node(&self) -> Node {
        NodeBuilder::new(ENTITY)
            .string(self.number.as_str())
            .keyword(self.kind)
            .keyword(self.shape)
            .flag("locked", self.locked)
            .child(position_node(self.position))
            .child(size_node(self.size))
            .opt_child(self.rect_delta.map(|delta| point_node("rect_delta", delta)))
            .opt_child(self.drill.as_ref().map(drill_node))
            .opt_field(&PROPERTY, self.property.as_ref())
            .field(&LAYERS, &self.layers)
            .opt_child(self.remove_unused_layers.then(|| Node::new("remove_unused_layers")))
            .opt_child(self.keep_end_layers.then(|| Node::new("keep_end_layers")))
            .opt_field(&ROUNDRECT_RRATIO, self.roundrect_rratio.as_ref())
            .opt_field(&CHAMFER_RATIO, self.chamfer_ratio.as_ref())
            .field(&CHAMFER, &self.chamfer)
            .opt_child(self.net.as_ref().map(net_node))
            .opt_field(&PIN_FUNCTION, self.pin_function.as_ref())
            .opt_field(&PIN_TYPE, self.pin_type.as_ref())
            .opt_child(self.tstamp.as_deref().map(|tstamp| symbol_node("tstamp", tstamp)))
            // Trailing overrides
            .opt_field(&DIE_LENGTH, self.die_length.as_ref())
            .opt_field(&SOLDER_MASK_MARGIN, self.solder_mask_margin.as_ref())
            .opt_field(&SOLDER_PASTE_MARGIN, self.solder_paste_margin.as_ref())
            .opt_field(&SOLDER_PASTE_MARGIN_RATIO, self.solder_paste_margin_ratio.as_ref())
            .opt_field(&CLEARANCE, self.clearance.as_ref())
            .opt_field(&ZONE_CONNECT, self.zone_connect.as_ref())
            .opt_field(&THERMAL_WIDTH, self.thermal_width.as_ref())
            .opt_field(&THERMAL_GAP, self.thermal_gap.as_ref())
            .opt_child(self.options.as_ref().map(options_node))
            .opt_child(self.primitives.as_ref().map(|primitives| {
                NodeBuilder::new("primitives")
                    .children(primitives.iter().cloned())
                    .build()
            }))
            .children(self.extra.iter().cloned())
            .build()
    }
}

/// `(drill [oval] [diameter [width]] [(offset x y)])`.
fn decode_drill(node: &Node) -> Result<Drill> {
    let mut fields = Fields::new(node, ENTITY);
    let oval = fields.flag("oval");
    let diameter = fields.next_opt_number("drill diameter")?;
    let width = match diameter {
        Some(_) => fields.next_opt_number("drill width")?,
        None => None,
    };

    let mut offset = None;
    for child in fields.nodes() {
        match child.tag() {
            "offset" => fields.set_once(&mut offset, child, decode_point(child, ENTITY)?)?,
            _ => return Err(fields.unknown(child)),
        }
    }
    fields.finish()?;

    Ok(Drill {
        oval,
        diameter,
        width,
        offset,
    })
}

fn drill_node(drill: &Drill) -> Node {
    NodeBuilder::new("drill")
        .flag("oval", drill.oval)
        .opt_number(drill.diameter)
        .opt_number(drill.width)
        .opt_child(drill.offset.map(|offset| point_node("offset", offset)))
        .build()
}

fn decode_property(node: &Node) -> Result<PadProperty> {
    let mut fields = Fields::new(node, ENTITY);
    leaf(&fields)?;
    let property = fields.next_keyword::<PadProperty>("property")?;
    fields.finish()?;
    Ok(property)
}

fn decode_chamfer(node: &Node) -> Result<Vec<ChamferCorner>> {
    let mut fields = Fields::new(node, ENTITY);
    leaf(&fields)?;
    let mut corners = Vec::new();
    while fields.has_next() {
        corners.push(fields.next_keyword::<ChamferCorner>("chamfer corner")?);
    }
    fields.finish()?;
    Ok(corners)
}

/// `(net number "name")`.
fn decode_net(node: &Node) -> Result<Net> {
    let mut fields = Fields::new(node, ENTITY);
    leaf(&fields)?;
    let number = fields.next_integer("net number")?;
    let name = fields.next_text("net name")?;
    fields.finish()?;
    Ok(Net { number, name })
}

fn net_node(net: &Net) -> Node {
    NodeBuilder::new("net")
        .symbol(net.number.to_string())
        .string(net.name.as_str())
        .build()
}

/// `(options (clearance outline|convexhull) (anchor shape))`.
fn decode_options(node: &Node) -> Result<CustomPadOptions> {
    let fields = Fields::new(node, ENTITY);
    let mut options = CustomPadOptions::default();
    for child in fields.nodes() {
        let mut value = Fields::new(child, ENTITY);
        leaf(&value)?;
        match child_tag::<OptionsTag>(&fields, child)? {
            OptionsTag::Clearance => {
                let clearance = value.next_keyword::<CustomClearance>("custom clearance")?;
                fields.set_once(&mut options.clearance, child, clearance)?;
            }
            OptionsTag::Anchor => {
                let anchor = value.next_keyword::<PadShape>("anchor shape")?;
                fields.set_once(&mut options.anchor, child, anchor)?;
            }
        }
        value.finish()?;
    }
    fields.finish()?;
    Ok(options)
}

fn options_node(options: &CustomPadOptions) -> Node {
    NodeBuilder::new("options")
        .opt_field(&OPTIONS_CLEARANCE, options.clearance.as_ref())
        .opt_field(&OPTIONS_ANCHOR, options.anchor.as_ref())
        .build()
}

/// The drawing primitives of a custom pad, kept as written.
fn decode_primitives(node: &Node) -> Result<Vec<Node>> {
    let fields = Fields::new(node, ENTITY);
    let primitives = fields.nodes().cloned().collect();
    fields.finish()?;
    Ok(primitives)
}

#[cfg(test)]
mod tests {
    use kiform_core::geometry::Point;
    use kiform_parser::{ErrorCode, parse};

    use super::*;

    fn node(source: &str) -> Node {
        parse(source).unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"))
    }

    fn decode(source: &str) -> Result<Pad> {
        Pad::from_node(&node(source))
    }

    fn assert_reencodes(source: &str) {
        let tree = node(source);
        let pad = Pad::from_node(&tree).unwrap_or_else(|err| panic!("{source}: {err}"));
        assert_eq!(pad.to_node(), tree, "{source}");
    }

    /// Encoded children past the header.
    fn trailing(pad: &Pad) -> usize {
        pad.to_node()
            .nodes()
            .filter(|child| !is_pad_header(child.tag()))
            .count()
    }

    #[test]
    fn test_smd_pad() {
        let pad = decode(r#"(pad "1" smd roundrect (at -0.825 0 180) (size 0.8 0.95) (layers "F.Cu" "F.Paste" "F.Mask") (roundrect_rratio 0.25))"#).unwrap();
        assert_eq!(pad.number, "1");
        assert_eq!(pad.kind, PadType::Smd);
        assert_eq!(pad.shape, PadShape::RoundRect);
        assert_eq!(pad.position, Position::new(-0.825, 0.0).with_angle(180.0));
        assert_eq!(pad.size, Size::new(0.8, 0.95));
        assert_eq!(pad.roundrect_rratio, Some(0.25));
        assert_eq!(trailing(&pad), 0);
    }

    #[test]
    fn test_header_fields_reencode() {
        assert_reencodes(
            r#"(pad "1" thru_hole rect locked (at 0 0) (size 1.7 1.7) (drill 1) (layers "*.Cu" "*.Mask") (remove_unused_layers) (keep_end_layers) (net 1 "GND") (pinfunction "A") (pintype "passive") (tstamp 3b2a77a4-53f4-4e4b-8d4a-61d212b43a8a))"#,
        );
        assert_reencodes(
            r#"(pad "2" thru_hole oval (at 2.54 0) (size 1.7 2.5) (drill oval 1 1.8 (offset 0.1 0)) (property pad_prop_castellated) (layers "*.Cu" "*.Mask"))"#,
        );
        assert_reencodes(
            r#"(pad "3" smd trapezoid (at 0 0) (size 1 1) (rect_delta 0 0.2) (layers "F.Cu"))"#,
        );
        assert_reencodes(
            r#"(pad "4" smd roundrect (at 0 0) (size 1 1) (layers "F.Cu") (roundrect_rratio 0.25) (chamfer_ratio 0.2) (chamfer top_left bottom_right))"#,
        );
        assert_reencodes(r#"(pad "" np_thru_hole circle (at 0 0) (size 1 1) (drill 1) (layers "*.Cu" "*.Mask"))"#);
    }

    #[test]
    fn test_trailing_overrides_reencode() {
        assert_reencodes(
            r#"(pad "1" smd rect (at 0 0) (size 1 1) (layers "F.Cu") (die_length 0.1) (solder_mask_margin 0.05) (solder_paste_margin -0.02) (solder_paste_margin_ratio -0.1) (clearance 0.2) (zone_connect 2) (thermal_width 0.3) (thermal_gap 0.4))"#,
        );
    }

    #[test]
    fn test_custom_pad() {
        let source = r#"(pad "1" smd custom (at 0 0) (size 0.5 0.5) (layers "F.Cu" "F.Mask")
            (options (clearance convexhull) (anchor circle))
            (primitives (gr_poly (pts (xy 0 0) (xy 1 0) (xy 1 1)) (width 0) (fill yes))))"#;
        let pad = decode(source).unwrap();
        let options = pad.options.as_ref().unwrap();
        assert_eq!(options.clearance, Some(CustomClearance::ConvexHull));
        assert_eq!(options.anchor, Some(PadShape::Circle));
        assert_eq!(pad.primitives.as_ref().map(Vec::len), Some(1));
        assert_eq!(trailing(&pad), 2);
        assert_eq!(pad.to_node(), node(source));
    }

    #[test]
    fn test_unknown_trailing_nodes_are_kept() {
        let source = r#"(pad "1" smd rect (at 0 0) (size 1 1) (layers "F.Cu") (teardrops (best_length_ratio 0.5)) (zone_connect 0))"#;
        let pad = decode(source).unwrap();
        assert_eq!(pad.extra, [node("(teardrops (best_length_ratio 0.5))")]);

        let encoded = pad.to_node();
        let tags: Vec<_> = encoded.nodes().map(Node::tag).collect();
        assert_eq!(tags, ["at", "size", "layers", "zone_connect", "teardrops"]);
    }

    #[test]
    fn test_unknown_header_node_is_an_error() {
        let err = decode(r#"(pad "1" smd rect (at 0 0) (shine 1) (size 1 1) (layers "F.Cu"))"#)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::E202);
        assert_eq!(err.message(), "pad: unknown tag `shine`");
    }

    #[test]
    fn test_missing_layers() {
        let err = decode(r#"(pad "1" smd rect (at 0 0) (size 1 1))"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::E201);
    }

    #[test]
    fn test_invalid_values() {
        let err = decode(r#"(pad "1" smd hexagon (at 0 0) (size 1 1) (layers "F.Cu"))"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::E301);

        let err = decode(r#"(pad "1" smd rect (at 0 0) (size 1 x) (layers "F.Cu"))"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::E300);

        let err = decode(r#"(pad "1" smd rect (at 0 0) (size 1 1) (layers "F.Cu") (zone_connect 1.5))"#)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::E300);
    }

    #[test]
    fn test_header_tags() {
        assert!(is_pad_header("layers"));
        assert!(is_pad_header("tstamp"));
        assert!(!is_pad_header("die_length"));
        assert!(!is_pad_header("teardrops"));
    }

    #[test]
    fn test_drill_forms() {
        let drill = decode_drill(&node("(drill oval 1 1.8)")).unwrap();
        assert!(drill.oval);
        assert_eq!((drill.diameter, drill.width), (Some(1.0), Some(1.8)));

        let drill = decode_drill(&node("(drill 0.8 (offset 0.1 -0.1))")).unwrap();
        assert_eq!(drill.offset, Some(Point::new(0.1, -0.1)));
        assert!(!drill.oval);
    }
}
