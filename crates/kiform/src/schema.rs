//! The footprint document schema.
//!
//! Maps the generic [`Node`] tree onto the typed entities of
//! [`kiform_core`] and back. Each entity implements [`FromNode`] and
//! [`ToNode`]; child tags are closed [`keywords!`](kiform_parser::keywords)
//! enums matched exhaustively, so an unknown tag is an `E202` error naming the
//! entity. Pads are the exception: unknown trailing nodes are kept verbatim.
//!
//! Encoding writes children in the order KiCad writes them and leaves out
//! fields according to their [`FieldSpec`](kiform_parser::schema::FieldSpec).

mod footprint;
mod graphics;
mod model;
mod pad;
mod primitives;

pub(crate) use pad::is_pad_header;

use kiform_parser::{
    Node,
    error::Result,
    schema::{Fields, Keyword},
};

/// Decoding of an entity from its node.
pub trait FromNode: Sized {
    /// Decode `node`.
    ///
    /// # Errors
    ///
    /// Returns a schema (`E2xx`) or value (`E3xx`) diagnostic carrying the
    /// entity name and the line of the offending node.
    fn from_node(node: &Node) -> Result<Self>;
}

/// Encoding of an entity to its node.
pub trait ToNode {
    fn to_node(&self) -> Node;
}

/// The tag of `child` as one of the entity's known tags.
fn child_tag<K: Keyword>(fields: &Fields<'_>, child: &Node) -> Result<K> {
    K::from_keyword(child.tag()).ok_or_else(|| fields.unknown(child))
}
