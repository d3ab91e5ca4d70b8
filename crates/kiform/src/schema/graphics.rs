//! Texts and drawn shapes.

use kiform_core::{
    geometry::{Point, Size},
    graphics::{
        Effects, Fill, Font, FpArc, FpCircle, FpCurve, FpLine, FpPoly, FpRect, FpText,
        GraphicItem, Justify, TextKind,
    },
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
        LAYER, WIDTH, decode_number, decode_point, decode_position, decode_size, decode_switch,
        decode_text, leaf, point_node, position_node, size_node, symbol_node,
    },
};

const FACE: FieldSpec<String> = FieldSpec::always("face");
const THICKNESS: FieldSpec<f64> = FieldSpec::always("thickness");
const LINE_SPACING: FieldSpec<f64> = FieldSpec::always("line_spacing");
const JUSTIFY: FieldSpec<Vec<Justify>> = FieldSpec::new("justify", Elision::IfEmpty);
const FILL: FieldSpec<Fill> = FieldSpec::always("fill");
const ANGLE: FieldSpec<f64> = FieldSpec::always("angle");

keywords! {
    enum TextTag {
        At => "at",
        Layer => "layer",
        Hide => "hide",
        Effects => "effects",
        Tstamp => "tstamp",
    }
}

keywords! {
    enum EffectsTag {
        Font => "font",
        Justify => "justify",
        Hide => "hide",
    }
}

keywords! {
    enum FontTag {
        Face => "face",
        Size => "size",
        Thickness => "thickness",
        LineSpacing => "line_spacing",
        Bold => "bold",
        Italic => "italic",
    }
}

keywords! {
    /// Child tags of every drawn shape; each shape accepts a subset.
    enum ShapeTag {
        Start => "start",
        Mid => "mid",
        End => "end",
        Center => "center",
        Angle => "angle",
        Pts => "pts",
        Layer => "layer",
        Width => "width",
        Fill => "fill",
        Locked => "locked",
        Tstamp => "tstamp",
    }
}

impl FromNode for GraphicItem {
    fn from_node(node: &Node) -> Result<Self> {
        Ok(match node.tag() {
            "fp_line" => GraphicItem::Line(FpLine::from_node(node)?),
            "fp_rect" => GraphicItem::Rect(FpRect::from_node(node)?),
            "fp_circle" => GraphicItem::Circle(FpCircle::from_node(node)?),
            "fp_arc" => GraphicItem::Arc(FpArc::from_node(node)?),
            "fp_poly" => GraphicItem::Poly(FpPoly::from_node(node)?),
            "fp_curve" => GraphicItem::Curve(FpCurve::from_node(node)?),
            "fp_text" => GraphicItem::Text(FpText::from_node(node)?),
            _ => return Err(Fields::new(node, "footprint").unknown(node)),
        })
    }
}

impl ToNode for GraphicItem {
    fn to_node(&self) -> Node {
        match self {
            GraphicItem::Text(text) => text.to_node(),
            GraphicItem::Line(line) => line.to_node(),
            GraphicItem::Rect(rect) => rect.to_node(),
            GraphicItem::Circle(circle) => circle.to_node(),
            GraphicItem::Arc(arc) => arc.to_node(),
            GraphicItem::Poly(poly) => poly.to_node(),
            GraphicItem::Curve(curve) => curve.to_node(),
        }
    }
}

impl FromNode for FpText {
    fn from_node(node: &Node) -> Result<Self> {
        const ENTITY: &str = "fp_text";
        let mut fields = Fields::expect(node, &[ENTITY], ENTITY)?;
        let kind = fields.next_keyword::<TextKind>("kind")?;
        let text = fields.next_text("text")?;
        let mut hide = fields.flag("hide");

        let mut position = None;
        let mut layer = None;
        let mut effects = None;
        let mut tstamp = None;
        for child in fields.nodes() {
            match child_tag::<TextTag>(&fields, child)? {
                TextTag::At => {
                    fields.set_once(&mut position, child, decode_position(child, ENTITY)?)?
                }
                TextTag::Layer => fields.set_once(&mut layer, child, decode_text(child, ENTITY)?)?,
                TextTag::Hide => hide = decode_switch(child, ENTITY)?,
                TextTag::Effects => {
                    fields.set_once(&mut effects, child, decode_effects(child)?)?
                }
                TextTag::Tstamp => {
                    fields.set_once(&mut tstamp, child, decode_text(child, ENTITY)?)?
                }
            }
        }

        let position = fields.require(position, "at")?;
        let layer = fields.require(layer, "layer")?;
        fields.finish()?;

        Ok(FpText {
            kind,
            text,
            position,
            layer,
            hide,
            effects: effects.unwrap_or_default(),
            tstamp,
        })
    }
}

impl ToNode for FpText {
    fn to_node(&self) -> Node {
        NodeBuilder::new("fp_text")
            .keyword(self.kind)
            .string(self.text.as_str())
            .child(position_node(self.position))
            .field(&LAYER, &self.layer)
            .flag("hide", self.hide)
            .child(effects_node(&self.effects))
            .opt_child(self.tstamp.as_deref().map(|tstamp| symbol_node("tstamp", tstamp)))
            .build()
    }
}

fn decode_effects(node: &Node) -> Result<Effects> {
    const ENTITY: &str = "effects";
    let mut fields = Fields::new(node, ENTITY);
    let mut hide = fields.flag("hide");

    let mut font = None;
    let mut justify = None;
    for child in fields.nodes() {
        match child_tag::<EffectsTag>(&fields, child)? {
            EffectsTag::Font => fields.set_once(&mut font, child, decode_font(child)?)?,
            EffectsTag::Justify => {
                fields.set_once(&mut justify, child, decode_justify(child)?)?
            }
            EffectsTag::Hide => hide = decode_switch(child, ENTITY)?,
        }
    }
    fields.finish()?;

    Ok(Effects {
        font: font.unwrap_or_default(),
        justify: justify.unwrap_or_default(),
        hide,
    })
}

fn effects_node(effects: &Effects) -> Node {
    NodeBuilder::new("effects")
        .child(font_node(&effects.font))
        .field(&JUSTIFY, &effects.justify)
        .flag("hide", effects.hide)
        .build()
}

fn decode_font(node: &Node) -> Result<Font> {
    const ENTITY: &str = "font";
    let mut fields = Fields::new(node, ENTITY);
    let mut bold = fields.flag("bold");
    let mut italic = fields.flag("italic");

    let mut face = None;
    let mut size = None;
    let mut thickness = None;
    let mut line_spacing = None;
    for child in fields.nodes() {
        match child_tag::<FontTag>(&fields, child)? {
            FontTag::Face => fields.set_once(&mut face, child, decode_text(child, ENTITY)?)?,
            FontTag::Size => fields.set_once(&mut size, child, decode_size(child, ENTITY)?)?,
            FontTag::Thickness => {
                fields.set_once(&mut thickness, child, decode_number(child, ENTITY)?)?
            }
            FontTag::LineSpacing => {
                fields.set_once(&mut line_spacing, child, decode_number(child, ENTITY)?)?
            }
            FontTag::Bold => bold = decode_switch(child, ENTITY)?,
            FontTag::Italic => italic = decode_switch(child, ENTITY)?,
        }
    }
    fields.finish()?;

    Ok(Font {
        face,
        size: size.unwrap_or(Size::square(1.0)),
        thickness,
        bold,
        italic,
        line_spacing,
    })
}

fn font_node(font: &Font) -> Node {
    NodeBuilder::new("font")
        .opt_field(&FACE, font.face.as_ref())
        .child(size_node(font.size))
        .opt_field(&THICKNESS, font.thickness.as_ref())
        .flag("bold", font.bold)
        .flag("italic", font.italic)
        .opt_field(&LINE_SPACING, font.line_spacing.as_ref())
        .build()
}

fn decode_justify(node: &Node) -> Result<Vec<Justify>> {
    let mut fields = Fields::new(node, "effects");
    leaf(&fields)?;
    let mut justify = Vec::new();
    while fields.has_next() {
        justify.push(fields.next_keyword::<Justify>("justification")?);
    }
    fields.finish()?;
    Ok(justify)
}

/// The children of a drawn shape, before the shape checks which it needs.
#[derive(Default)]
struct Parts {
    start: Option<Point>,
    mid: Option<Point>,
    end: Option<Point>,
    center: Option<Point>,
    angle: Option<f64>,
    points: Option<Vec<Point>>,
    layer: Option<String>,
    width: Option<f64>,
    fill: Option<Fill>,
    locked: bool,
    tstamp: Option<String>,
}

impl Parts {
    /// Collect the children of `node`, accepting only the `allowed` tags.
    fn collect<'n>(
        node: &'n Node,
        entity: &'static str,
        allowed: &[ShapeTag],
    ) -> Result<(Self, Fields<'n>)> {
        let mut fields = Fields::expect(node, &[entity], entity)?;
        let mut parts = Parts {
            locked: fields.flag("locked"),
            ..Parts::default()
        };

        for child in fields.nodes() {
            let tag = child_tag::<ShapeTag>(&fields, child)?;
            if !allowed.contains(&tag) {
                return Err(fields.unknown(child));
            }
            match tag {
                ShapeTag::Start => {
                    fields.set_once(&mut parts.start, child, decode_point(child, entity)?)?
                }
                ShapeTag::Mid => fields.set_once(&mut parts.mid, child, decode_point(child, entity)?)?,
                ShapeTag::End => fields.set_once(&mut parts.end, child, decode_point(child, entity)?)?,
                ShapeTag::Center => {
                    fields.set_once(&mut parts.center, child, decode_point(child, entity)?)?
                }
                ShapeTag::Angle => {
                    fields.set_once(&mut parts.angle, child, decode_number(child, entity)?)?
                }
                ShapeTag::Pts => {
                    fields.set_once(&mut parts.points, child, decode_points(child, entity)?)?
                }
                ShapeTag::Layer => {
                    fields.set_once(&mut parts.layer, child, decode_text(child, entity)?)?
                }
                ShapeTag::Width => {
                    fields.set_once(&mut parts.width, child, decode_number(child, entity)?)?
                }
                ShapeTag::Fill => {
                    fields.set_once(&mut parts.fill, child, decode_fill(child, entity)?)?
                }
                ShapeTag::Locked => parts.locked = decode_switch(child, entity)?,
                ShapeTag::Tstamp => {
                    fields.set_once(&mut parts.tstamp, child, decode_text(child, entity)?)?
                }
            }
        }

        Ok((parts, fields))
    }
}

fn decode_fill(node: &Node, entity: &'static str) -> Result<Fill> {
    let mut fields = Fields::new(node, entity);
    leaf(&fields)?;
    let fill = fields.next_keyword::<Fill>("fill")?;
    fields.finish()?;
    Ok(fill)
}

/// `(pts (xy x y)...)`.
fn decode_points(node: &Node, entity: &'static str) -> Result<Vec<Point>> {
    let fields = Fields::new(node, entity);
    let mut points = Vec::new();
    for child in fields.nodes() {
        match child.tag() {
            "xy" => points.push(decode_point(child, entity)?),
            _ => return Err(fields.unknown(child)),
        }
    }
    fields.finish()?;
    Ok(points)
}

fn points_node(points: &[Point]) -> Node {
    NodeBuilder::new("pts")
        .children(points.iter().map(|point| point_node("xy", *point)))
        .build()
}

/// Append the children every shape ends with.
fn finish_shape(
    builder: NodeBuilder,
    layer: &str,
    width: Option<&f64>,
    fill: Option<&Fill>,
    locked: bool,
    tstamp: Option<&str>,
) -> Node {
    builder
        .field(&LAYER, &layer.to_owned())
        .opt_field(&WIDTH, width)
        .opt_field(&FILL, fill)
        .flag("locked", locked)
        .opt_child(tstamp.map(|tstamp| symbol_node("tstamp", tstamp)))
        .build()
}

const COMMON: [ShapeTag; 4] = [ShapeTag::Layer, ShapeTag::Width, ShapeTag::Locked, ShapeTag::Tstamp];

fn allowed<const N: usize>(specific: [ShapeTag; N]) -> Vec<ShapeTag> {
    specific.into_iter().chain(COMMON).collect()
}

impl FromNode for FpLine {
    fn from_node(node: &Node) -> Result<Self> {
        let (parts, fields) =
            Parts::collect(node, "fp_line", &allowed([ShapeTag::Start, ShapeTag::End]))?;
        let line = FpLine {
            start: fields.require(parts.start, "start")?,
            end: fields.require(parts.end, "end")?,
            layer: fields.require(parts.layer, "layer")?,
            width: parts.width,
            locked: parts.locked,
            tstamp: parts.tstamp,
        };
        fields.finish()?;
        Ok(line)
    }
}

impl ToNode for FpLine {
    fn to_node(&self) -> Node {
        let builder = NodeBuilder::new("fp_line")
            .child(point_node("start", self.start))
            .child(point_node("end", self.end));
        finish_shape(
            builder,
            &self.layer,
            self.width.as_ref(),
            None,
            self.locked,
            self.tstamp.as_deref(),
        )
    }
}

impl FromNode for FpRect {
    fn from_node(node: &Node) -> Result<Self> {
        let (parts, fields) = Parts::collect(
            node,
            "fp_rect",
            &allowed([ShapeTag::Start, ShapeTag::End, ShapeTag::Fill]),
        )?;
        let rect = FpRect {
            start: fields.require(parts.start, "start")?,
            end: fields.require(parts.end, "end")?,
            layer: fields.require(parts.layer, "layer")?,
            width: parts.width,
            fill: parts.fill,
            locked: parts.locked,
            tstamp: parts.tstamp,
        };
        fields.finish()?;
        Ok(rect)
    }
}

impl ToNode for FpRect {
    fn to_node(&self) -> Node {
        let builder = NodeBuilder::new("fp_rect")
            .child(point_node("start", self.start))
            .child(point_node("end", self.end));
        finish_shape(
            builder,
            &self.layer,
            self.width.as_ref(),
            self.fill.as_ref(),
            self.locked,
            self.tstamp.as_deref(),
        )
    }
}

impl FromNode for FpCircle {
    fn from_node(node: &Node) -> Result<Self> {
        let (parts, fields) = Parts::collect(
            node,
            "fp_circle",
            &allowed([ShapeTag::Center, ShapeTag::End, ShapeTag::Fill]),
        )?;
        let circle = FpCircle {
            center: fields.require(parts.center, "center")?,
            end: fields.require(parts.end, "end")?,
            layer: fields.require(parts.layer, "layer")?,
            width: parts.width,
            fill: parts.fill,
            locked: parts.locked,
            tstamp: parts.tstamp,
        };
        fields.finish()?;
        Ok(circle)
    }
}

impl ToNode for FpCircle {
    fn to_node(&self) -> Node {
        let builder = NodeBuilder::new("fp_circle")
            .child(point_node("center", self.center))
            .child(point_node("end", self.end));
        finish_shape(
            builder,
            &self.layer,
            self.width.as_ref(),
            self.fill.as_ref(),
            self.locked,
            self.tstamp.as_deref(),
        )
    }
}

impl FromNode for FpArc {
    fn from_node(node: &Node) -> Result<Self> {
        let (parts, fields) = Parts::collect(
            node,
            "fp_arc",
            &allowed([ShapeTag::Start, ShapeTag::Mid, ShapeTag::End, ShapeTag::Angle]),
        )?;
        let arc = FpArc {
            start: fields.require(parts.start, "start")?,
            mid: parts.mid,
            end: fields.require(parts.end, "end")?,
            angle: parts.angle,
            layer: fields.require(parts.layer, "layer")?,
            width: parts.width,
            locked: parts.locked,
            tstamp: parts.tstamp,
        };
        fields.finish()?;
        Ok(arc)
    }
}

impl ToNode for FpArc {
    fn to_node(&self) -> Node {
        let builder = NodeBuilder::new("fp_arc")
            .child(point_node("start", self.start))
            .opt_child(self.mid.map(|mid| point_node("mid", mid)))
            .child(point_node("end", self.end))
            .opt_field(&ANGLE, self.angle.as_ref());
        finish_shape(
            builder,
            &self.layer,
            self.width.as_ref(),
            None,
            self.locked,
            self.tstamp.as_deref(),
        )
    }
}

impl FromNode for FpPoly {
    fn from_node(node: &Node) -> Result<Self> {
        let (parts, fields) =
            Parts::collect(node, "fp_poly", &allowed([ShapeTag::Pts, ShapeTag::Fill]))?;
        let poly = FpPoly {
            points: fields.require(parts.points, "pts")?,
            layer: fields.require(parts.layer, "layer")?,
            width: parts.width,
            fill: parts.fill,
            locked: parts.locked,
            tstamp: parts.tstamp,
        };
        fields.finish()?;
        Ok(poly)
    }
}

impl ToNode for FpPoly {
    fn to_node(&self) -> Node {
        let builder = NodeBuilder::new("fp_poly").child(points_node(&self.points));
        finish_shape(
            builder,
            &self.layer,
            self.width.as_ref(),
            self.fill.as_ref(),
            self.locked,
            self.tstamp.as_deref(),
        )
    }
}

impl FromNode for FpCurve {
    fn from_node(node: &Node) -> Result<Self> {
        let (parts, fields) = Parts::collect(node, "fp_curve", &allowed([ShapeTag::Pts]))?;
        let curve = FpCurve {
            points: fields.require(parts.points, "pts")?,
            layer: fields.require(parts.layer, "layer")?,
            width: parts.width,
            locked: parts.locked,
            tstamp: parts.tstamp,
        };
        fields.finish()?;
        Ok(curve)
    }
}

impl ToNode for FpCurve {
    fn to_node(&self) -> Node {
        let builder = NodeBuilder::new("fp_curve").child(points_node(&self.points));
        finish_shape(
            builder,
            &self.layer,
            self.width.as_ref(),
            None,
            self.locked,
            self.tstamp.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use kiform_core::geometry::Position;
    use kiform_parser::{ErrorCode, parse};

    use super::*;

    fn node(source: &str) -> Node {
        parse(source).unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"))
    }

    fn assert_reencodes<T: FromNode + ToNode>(source: &str) {
        let tree = node(source);
        let decoded = T::from_node(&tree).unwrap_or_else(|err| panic!("{source}: {err}"));
        assert_eq!(decoded.to_node(), tree, "{source}");
    }

    #[test]
    fn test_text() {
        let text = FpText::from_node(&node(
            r#"(fp_text reference "R1" (at 0 -1.43 90) (layer "F.SilkS") hide
                 (effects (font (size 1 1.2) (thickness 0.15)) (justify left mirror))
                 (tstamp 0b4c1f44-8e6c-4a53-9f32-2a2bd1b3c1c1))"#,
        ))
        .unwrap();

        assert_eq!(text.kind, TextKind::Reference);
        assert_eq!(text.text, "R1");
        assert_eq!(text.position, Position::new(0.0, -1.43).with_angle(90.0));
        assert!(text.hide);
        assert_eq!(text.effects.font.size, Size::new(1.0, 1.2));
        assert_eq!(text.effects.justify, [Justify::Left, Justify::Mirror]);
        assert!(text.tstamp.is_some());
    }

    #[test]
    fn test_text_reencodes() {
        assert_reencodes::<FpText>(
            r#"(fp_text user "${REFERENCE}" (at 0 2.5 unlocked) (layer "F.Fab") (effects (font (size 1 1) (thickness 0.15))))"#,
        );
        assert_reencodes::<FpText>(
            r#"(fp_text value "X" (at 0 0) (layer "F.Fab") (effects (font (face "KiCad Font") (size 1 1) bold italic (line_spacing 1.2)) hide))"#,
        );
    }

    #[test]
    fn test_text_defaults_font_size() {
        let text = FpText::from_node(&node(
            r#"(fp_text user "x" (at 0 0) (layer "F.Fab") (effects (font (thickness 0.1))))"#,
        ))
        .unwrap();
        assert_eq!(text.effects.font.size, Size::square(1.0));
    }

    #[test]
    fn test_hide_node_normalizes_to_flag() {
        let text = FpText::from_node(&node(
            r#"(fp_text value "x" (at 0 0) (layer "F.Fab") (hide yes) (effects (font (size 1 1))))"#,
        ))
        .unwrap();
        assert!(text.hide);
        assert!(text.to_node().atoms().any(|atom| atom.text() == "hide"));
    }

    #[test]
    fn test_text_missing_layer() {
        let err = FpText::from_node(&node(r#"(fp_text user "x" (at 0 0))"#)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::E201);
        assert_eq!(err.message(), "fp_text: missing required `layer`");
    }

    #[test]
    fn test_text_invalid_kind() {
        let err = FpText::from_node(&node(r#"(fp_text label "x" (at 0 0) (layer "F.Fab"))"#))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::E301);
    }

    #[test]
    fn test_shapes_reencode() {
        assert_reencodes::<FpLine>(
            r#"(fp_line (start -1 -0.5) (end 1 -0.5) (layer "F.SilkS") (width 0.12) locked (tstamp 5d1c9b5a-0000-0000-0000-000000000001))"#,
        );
        assert_reencodes::<FpRect>(
            r#"(fp_rect (start -1.5 -1) (end 1.5 1) (layer "F.CrtYd") (width 0.05) (fill none))"#,
        );
        assert_reencodes::<FpCircle>(
            r#"(fp_circle (center 0 0) (end 0.5 0) (layer "F.Fab") (width 0.1) (fill solid))"#,
        );
        assert_reencodes::<FpArc>(
            r#"(fp_arc (start -1 0) (mid 0 -1) (end 1 0) (layer "F.SilkS") (width 0.12))"#,
        );
        assert_reencodes::<FpArc>(
            r#"(fp_arc (start 0 0) (end 1 0) (angle 90) (layer "F.SilkS") (width 0.12))"#,
        );
        assert_reencodes::<FpPoly>(
            r#"(fp_poly (pts (xy 0 0) (xy 1 0) (xy 1 1)) (layer "F.Cu") (width 0) (fill solid))"#,
        );
        assert_reencodes::<FpCurve>(
            r#"(fp_curve (pts (xy 0 0) (xy 1 1) (xy 2 1) (xy 3 0)) (layer "F.SilkS") (width 0.12))"#,
        );
    }

    #[test]
    fn test_shape_rejects_foreign_tag() {
        let err = FpLine::from_node(&node(
            r#"(fp_line (start 0 0) (end 1 0) (layer "F.SilkS") (fill solid))"#,
        ))
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::E202);
        assert_eq!(err.message(), "fp_line: unknown tag `fill`");
    }

    #[test]
    fn test_shape_duplicate_field() {
        let err = FpLine::from_node(&node(
            r#"(fp_line (start 0 0) (start 1 0) (end 1 0) (layer "F.SilkS"))"#,
        ))
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::E204);
    }

    #[test]
    fn test_graphic_item_dispatch() {
        let item = GraphicItem::from_node(&node(
            r#"(fp_circle (center 0 0) (end 1 0) (layer "F.SilkS") (width 0.12))"#,
        ))
        .unwrap();
        assert!(matches!(item, GraphicItem::Circle(_)));
        assert_eq!(item.layer(), "F.SilkS");
    }

    #[test]
    fn test_graphic_item_unknown_tag() {
        let err = GraphicItem::from_node(&node(r#"(fp_spline (layer "F.SilkS"))"#)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::E202);
        assert_eq!(err.message(), "footprint: unknown tag `fp_spline`");
        assert_eq!(err.line(), Some(1));
    }
}
