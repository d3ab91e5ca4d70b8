//! Pads: the copper and drill features where component leads attach.
//!
//! A pad has a header (number, type, shape, placement, size, drill, layers,
//! net and so on) followed by optional trailing overrides of footprint or
//! board defaults. Trailing nodes this model does not know are kept in
//! [`Pad::extra`] so newer files survive a round trip.

use kiform_parser::{Node, keywords};

use crate::geometry::{Point, Position, Size};

keywords! {
    /// Pad technology.
    pub enum PadType {
        ThruHole => "thru_hole",
        Smd => "smd",
        Connect => "connect",
        NpThruHole => "np_thru_hole",
    }
}

keywords! {
    pub enum PadShape {
        Circle => "circle",
        Rect => "rect",
        Oval => "oval",
        Trapezoid => "trapezoid",
        RoundRect => "roundrect",
        Custom => "custom",
    }
}

keywords! {
    /// Fabrication property of a pad.
    pub enum PadProperty {
        Bga => "pad_prop_bga",
        FiducialGlobal => "pad_prop_fiducial_glob",
        FiducialLocal => "pad_prop_fiducial_loc",
        TestPoint => "pad_prop_testpoint",
        Heatsink => "pad_prop_heatsink",
        Castellated => "pad_prop_castellated",
    }
}

keywords! {
    pub enum ChamferCorner {
        TopLeft => "top_left",
        TopRight => "top_right",
        BottomLeft => "bottom_left",
        BottomRight => "bottom_right",
    }
}

keywords! {
    /// Clearance outline of a custom pad.
    pub enum CustomClearance {
        Outline => "outline",
        ConvexHull => "convexhull",
    }
}

/// `(drill [oval] [diameter [width]] [(offset x y)])`.
///
/// An oval drill gives both the diameter and the slot width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drill {
    pub oval: bool,
    pub diameter: Option<f64>,
    pub width: Option<f64>,
    pub offset: Option<Point>,
}

impl Drill {
    /// A round hole.
    pub fn round(diameter: f64) -> Self {
        Self {
            diameter: Some(diameter),
            ..Self::default()
        }
    }
}

/// `(net number "name")`.
#[derive(Debug, Clone, PartialEq)]
pub struct Net {
    pub number: i64,
    pub name: String,
}

/// `(options (clearance ...) (anchor ...))` of a custom pad.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomPadOptions {
    pub clearance: Option<CustomClearance>,
    pub anchor: Option<PadShape>,
}

/// A footprint pad.
#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    pub number: String,
    pub kind: PadType,
    pub shape: PadShape,
    pub locked: bool,
    pub position: Position,
    pub size: Size,
    pub rect_delta: Option<Point>,
    pub drill: Option<Drill>,
    pub property: Option<PadProperty>,
    pub layers: Vec<String>,
    pub remove_unused_layers: bool,
    pub keep_end_layers: bool,
    pub roundrect_rratio: Option<f64>,
    pub chamfer_ratio: Option<f64>,
    pub chamfer: Vec<ChamferCorner>,
    pub net: Option<Net>,
    pub pin_function: Option<String>,
    pub pin_type: Option<String>,
    pub tstamp: Option<String>,

    // Trailing overrides
    pub die_length: Option<f64>,
    pub solder_mask_margin: Option<f64>,
    pub solder_paste_margin: Option<f64>,
    pub solder_paste_margin_ratio: Option<f64>,
    pub clearance: Option<f64>,
    pub zone_connect: Option<i64>,
    pub thermal_width: Option<f64>,
    pub thermal_gap: Option<f64>,
    pub options: Option<CustomPadOptions>,
    /// Drawing primitives of a custom pad, kept as written.
    pub primitives: Option<Vec<Node>>,
    /// Trailing nodes not otherwise modelled, in document order.
    pub extra: Vec<Node>,
}

impl Pad {
    /// A pad with no drill, net or overrides.
    pub fn new(
        number: impl Into<String>,
        kind: PadType,
        shape: PadShape,
        position: Position,
        size: Size,
        layers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            number: number.into(),
            kind,
            shape,
            locked: false,
            position,
            size,
            rect_delta: None,
            drill: None,
            property: None,
            layers: layers.into_iter().map(Into::into).collect(),
            remove_unused_layers: false,
            keep_end_layers: false,
            roundrect_rratio: None,
            chamfer_ratio: None,
            chamfer: Vec::new(),
            net: None,
            pin_function: None,
            pin_type: None,
            tstamp: None,
            die_length: None,
            solder_mask_margin: None,
            solder_paste_margin: None,
            solder_paste_margin_ratio: None,
            clearance: None,
            zone_connect: None,
            thermal_width: None,
            thermal_gap: None,
            options: None,
            primitives: None,
            extra: Vec::new(),
        }
    }

    pub fn with_drill(mut self, drill: Drill) -> Self {
        self.drill = Some(drill);
        self
    }
}
