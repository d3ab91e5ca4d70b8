//! Small field nodes shared by several entities.

use kiform_core::geometry::{Point, Position, Size, Xyz};
use kiform_parser::{
    Node,
    error::Result,
    schema::{FieldSpec, Fields, NodeBuilder},
};

pub(super) const LAYER: FieldSpec<String> = FieldSpec::always("layer");
pub(super) const WIDTH: FieldSpec<f64> = FieldSpec::always("width");

/// Fail on the first child node of a field that only holds atoms.
pub(super) fn leaf(fields: &Fields<'_>) -> Result<()> {
    match fields.nodes().next() {
        Some(child) => Err(fields.unknown(child)),
        None => Ok(()),
    }
}

/// `(at x y [angle] [unlocked])`.
pub(super) fn decode_position(node: &Node, entity: &'static str) -> Result<Position> {
    let mut fields = Fields::new(node, entity);
    leaf(&fields)?;
    let unlocked = fields.flag("unlocked");
    let x = fields.next_number("x")?;
    let y = fields.next_number("y")?;
    let angle = fields.next_opt_number("angle")?;
    fields.finish()?;

    let position = Position::new(x, y).with_unlocked(unlocked);
    Ok(match angle {
        Some(angle) => position.with_angle(angle),
        None => position,
    })
}

pub(super) fn position_node(position: Position) -> Node {
    NodeBuilder::new("at")
        .number(position.x())
        .number(position.y())
        .opt_number(position.angle())
        .flag("unlocked", position.unlocked())
        .build()
}

/// `(tag x y)`.
pub(super) fn decode_point(node: &Node, entity: &'static str) -> Result<Point> {
    let mut fields = Fields::new(node, entity);
    leaf(&fields)?;
    let x = fields.next_number("x")?;
    let y = fields.next_number("y")?;
    fields.finish()?;
    Ok(Point::new(x, y))
}

pub(super) fn point_node(tag: &str, point: Point) -> Node {
    NodeBuilder::new(tag).number(point.x()).number(point.y()).build()
}

/// `(size width height)`.
pub(super) fn decode_size(node: &Node, entity: &'static str) -> Result<Size> {
    let mut fields = Fields::new(node, entity);
    leaf(&fields)?;
    let width = fields.next_number("width")?;
    let height = fields.next_number("height")?;
    fields.finish()?;
    Ok(Size::new(width, height))
}

pub(super) fn size_node(size: Size) -> Node {
    NodeBuilder::new("size")
        .number(size.width())
        .number(size.height())
        .build()
}

/// `(tag (xyz x y z))`.
pub(super) fn decode_xyz(node: &Node, entity: &'static str) -> Result<Xyz> {
    let fields = Fields::new(node, entity);
    let mut triple = None;
    for child in fields.nodes() {
        match child.tag() {
            "xyz" => fields.set_once(&mut triple, child, decode_triple(child, entity)?)?,
            _ => return Err(fields.unknown(child)),
        }
    }
    let triple = fields.require(triple, "xyz")?;
    fields.finish()?;
    Ok(triple)
}

fn decode_triple(node: &Node, entity: &'static str) -> Result<Xyz> {
    let mut fields = Fields::new(node, entity);
    leaf(&fields)?;
    let x = fields.next_number("x")?;
    let y = fields.next_number("y")?;
    let z = fields.next_number("z")?;
    fields.finish()?;
    Ok(Xyz::new(x, y, z))
}

pub(super) fn xyz_node(tag: &str, xyz: Xyz) -> Node {
    NodeBuilder::new(tag)
        .child(
            NodeBuilder::new("xyz")
                .number(xyz.x)
                .number(xyz.y)
                .number(xyz.z)
                .build(),
        )
        .build()
}

/// A field holding one atom, quoted or bare.
pub(super) fn decode_text(node: &Node, entity: &'static str) -> Result<String> {
    let mut fields = Fields::new(node, entity);
    leaf(&fields)?;
    let text = fields.next_text("value")?;
    fields.finish()?;
    Ok(text)
}

/// A field holding one number.
pub(super) fn decode_number(node: &Node, entity: &'static str) -> Result<f64> {
    let mut fields = Fields::new(node, entity);
    leaf(&fields)?;
    let value = fields.next_number("value")?;
    fields.finish()?;
    Ok(value)
}

/// A field holding one whole number.
pub(super) fn decode_integer(node: &Node, entity: &'static str) -> Result<i64> {
    let mut fields = Fields::new(node, entity);
    leaf(&fields)?;
    let value = fields.next_integer("value")?;
    fields.finish()?;
    Ok(value)
}

/// A boolean written as a node: `(hide)`, `(hide yes)` or `(hide no)`.
pub(super) fn decode_switch(node: &Node, entity: &'static str) -> Result<bool> {
    let mut fields = Fields::new(node, entity);
    leaf(&fields)?;
    let value = if fields.has_next() {
        fields.next_boolean("value")?
    } else {
        true
    };
    fields.finish()?;
    Ok(value)
}

/// Every atom of the field as text, e.g. a layer list.
pub(super) fn decode_list(node: &Node, entity: &'static str) -> Result<Vec<String>> {
    let mut fields = Fields::new(node, entity);
    leaf(&fields)?;
    Ok(fields.rest_text())
}

/// `(tag text)` with the text written bare, e.g. a timestamp.
pub(super) fn symbol_node(tag: &str, text: &str) -> Node {
    NodeBuilder::new(tag).symbol(text).build()
}
