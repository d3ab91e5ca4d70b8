//! Graphic items drawn on a footprint's layers.
//!
//! [`GraphicItem`] is a closed set: text, line, rectangle, circle, arc,
//! polygon and Bézier curve. Each variant owns its geometry, the layer it is
//! drawn on, and the optional stroke width and timestamp.

use kiform_parser::keywords;

use crate::geometry::{Point, Position, Size};

keywords! {
    /// What an `fp_text` shows.
    pub enum TextKind {
        Reference => "reference",
        Value => "value",
        User => "user",
    }
}

keywords! {
    /// Fill mode of a closed shape.
    pub enum Fill {
        Solid => "solid",
        None => "none",
    }
}

keywords! {
    /// One keyword of a `(justify ...)` list.
    pub enum Justify {
        Left => "left",
        Right => "right",
        Top => "top",
        Bottom => "bottom",
        Mirror => "mirror",
    }
}

/// Text font.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub face: Option<String>,
    pub size: Size,
    pub thickness: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub line_spacing: Option<f64>,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            face: None,
            size: Size::square(1.0),
            thickness: None,
            bold: false,
            italic: false,
            line_spacing: None,
        }
    }
}

/// Text effects: `(effects (font ...) (justify ...) hide)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    pub font: Font,
    pub justify: Vec<Justify>,
    pub hide: bool,
}

/// `fp_text`: the reference designator, the value, or free user text.
#[derive(Debug, Clone, PartialEq)]
pub struct FpText {
    pub kind: TextKind,
    pub text: String,
    pub position: Position,
    pub layer: String,
    pub hide: bool,
    pub effects: Effects,
    pub tstamp: Option<String>,
}

impl FpText {
    /// Text with default effects.
    pub fn new(
        kind: TextKind,
        text: impl Into<String>,
        position: Position,
        layer: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
            layer: layer.into(),
            hide: false,
            effects: Effects::default(),
            tstamp: None,
        }
    }
}

/// `fp_line`.
#[derive(Debug, Clone, PartialEq)]
pub struct FpLine {
    pub start: Point,
    pub end: Point,
    pub layer: String,
    pub width: Option<f64>,
    pub locked: bool,
    pub tstamp: Option<String>,
}

/// `fp_rect`, given by two opposite corners.
#[derive(Debug, Clone, PartialEq)]
pub struct FpRect {
    pub start: Point,
    pub end: Point,
    pub layer: String,
    pub width: Option<f64>,
    pub fill: Option<Fill>,
    pub locked: bool,
    pub tstamp: Option<String>,
}

/// `fp_circle`, given by its center and a point on the circumference.
#[derive(Debug, Clone, PartialEq)]
pub struct FpCircle {
    pub center: Point,
    pub end: Point,
    pub layer: String,
    pub width: Option<f64>,
    pub fill: Option<Fill>,
    pub locked: bool,
    pub tstamp: Option<String>,
}

/// `fp_arc`.
///
/// Current files give start, mid and end points. Older files give the
/// center as `start`, the arc start as `end`, and a sweep `angle`; both forms
/// are kept as written.
#[derive(Debug, Clone, PartialEq)]
pub struct FpArc {
    pub start: Point,
    pub mid: Option<Point>,
    pub end: Point,
    pub angle: Option<f64>,
    pub layer: String,
    pub width: Option<f64>,
    pub locked: bool,
    pub tstamp: Option<String>,
}

/// `fp_poly`.
#[derive(Debug, Clone, PartialEq)]
pub struct FpPoly {
    pub points: Vec<Point>,
    pub layer: String,
    pub width: Option<f64>,
    pub fill: Option<Fill>,
    pub locked: bool,
    pub tstamp: Option<String>,
}

/// `fp_curve`, a cubic Bézier given by four points.
#[derive(Debug, Clone, PartialEq)]
pub struct FpCurve {
    pub points: Vec<Point>,
    pub layer: String,
    pub width: Option<f64>,
    pub locked: bool,
    pub tstamp: Option<String>,
}

/// Any graphic item of a footprint.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicItem {
    Text(FpText),
    Line(FpLine),
    Rect(FpRect),
    Circle(FpCircle),
    Arc(FpArc),
    Poly(FpPoly),
    Curve(FpCurve),
}

impl GraphicItem {
    /// The layer the item is drawn on.
    pub fn layer(&self) -> &str {
        match self {
            GraphicItem::Text(text) => &text.layer,
            GraphicItem::Line(line) => &line.layer,
            GraphicItem::Rect(rect) => &rect.layer,
            GraphicItem::Circle(circle) => &circle.layer,
            GraphicItem::Arc(arc) => &arc.layer,
            GraphicItem::Poly(poly) => &poly.layer,
            GraphicItem::Curve(curve) => &curve.layer,
        }
    }

    pub fn as_text(&self) -> Option<&FpText> {
        match self {
            GraphicItem::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut FpText> {
        match self {
            GraphicItem::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<FpText> for GraphicItem {
    fn from(text: FpText) -> Self {
        GraphicItem::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use kiform_parser::schema::Keyword;

    use super::*;

    #[test]
    fn test_text_defaults() {
        let text = FpText::new(TextKind::Value, "R_0603", Position::new(0.0, 1.0), "F.Fab");
        assert_eq!(text.effects.font.size, Size::square(1.0));
        assert!(!text.hide);
        assert!(text.effects.justify.is_empty());
    }

    #[test]
    fn test_layer_of_any_item() {
        let item = GraphicItem::Line(FpLine {
            start: Point::new(0.0, 0.0),
            end: Point::new(1.0, 0.0),
            layer: "F.SilkS".to_string(),
            width: Some(0.12),
            locked: false,
            tstamp: None,
        });
        assert_eq!(item.layer(), "F.SilkS");
        assert!(item.as_text().is_none());
    }

    #[test]
    fn test_keywords() {
        assert_eq!(TextKind::from_keyword("reference"), Some(TextKind::Reference));
        assert_eq!(Fill::Solid.as_str(), "solid");
        assert_eq!(Justify::from_keyword("mirror"), Some(Justify::Mirror));
    }
}
