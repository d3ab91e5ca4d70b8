//! Where footprint text breaks lines.
//!
//! [`FootprintStyle`] reproduces the layout KiCad writes:
//!
//! - the root keeps its library id, flags, version and generator on the
//!   first line, then puts every other child on its own line;
//! - `fp_text` and `model` break after their header;
//! - polygon point lists put each point on its own line, two levels below
//!   the polygon, and close one level below it so the polygon's remaining
//!   fields follow on that line; Bezier point lists stay inline;
//! - custom pad primitives put each primitive on its own line;
//! - a pad stays on one line unless it carries trailing overrides. A single
//!   override hangs on a continuation line; two or more each get their own
//!   line and the pad closes on a line of its own.

use kiform_parser::{Child, FormatContext, Layout, Node, Style};

use crate::schema::is_pad_header;

/// The [`Style`] of `.kicad_mod` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FootprintStyle;

impl Style for FootprintStyle {
    fn layout(&self, node: &Node, context: &FormatContext<'_>) -> Layout {
        match node.tag() {
            "footprint" | "module" if context.parent.is_none() => Layout::Block {
                from: root_header_len(node),
            },
            "fp_text" => Layout::Block {
                from: first_node_tagged(node, &["effects", "tstamp"]),
            },
            "model" => Layout::Block {
                from: leading_atoms(node),
            },
            "pad" => pad_layout(node),
            "pts" => match context.parent {
                Some("fp_curve" | "gr_curve") => Layout::Inline,
                _ => Layout::Continued { from: 0 },
            },
            "primitives" => Layout::Block { from: 0 },
            _ => Layout::Inline,
        }
    }
}

fn pad_layout(pad: &Node) -> Layout {
    let from = pad
        .children()
        .iter()
        .position(|child| match child {
            Child::Atom(_) => false,
            Child::Node(node) => !is_pad_header(node.tag()),
        })
        .unwrap_or(pad.len());

    match pad.len() - from {
        0 => Layout::Inline,
        1 => Layout::Hanging { from },
        _ => Layout::Block { from },
    }
}

/// Atoms, then `version` and `generator`.
fn root_header_len(root: &Node) -> usize {
    root.children()
        .iter()
        .position(|child| match child {
            Child::Atom(_) => false,
            Child::Node(node) => !matches!(node.tag(), "version" | "generator"),
        })
        .unwrap_or(root.len())
}

fn first_node_tagged(node: &Node, tags: &[&str]) -> usize {
    node.children()
        .iter()
        .position(|child| child.as_node().is_some_and(|child| tags.contains(&child.tag())))
        .unwrap_or(node.len())
}

fn leading_atoms(node: &Node) -> usize {
    node.children()
        .iter()
        .position(Child::is_node)
        .unwrap_or(node.len())
}
