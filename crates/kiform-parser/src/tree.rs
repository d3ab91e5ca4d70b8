//! The generic S-expression tree.
//!
//! A [`Node`] is a tag plus an ordered list of [`Child`]ren, each either an
//! [`Atom`] or a nested node. The tree knows nothing about any document kind;
//! schemas give it meaning.
//!
//! Source locations are recorded on nodes and atoms built by the parser but
//! never take part in equality, so a decoded tree compares equal to one built
//! by hand.

use std::fmt;

use crate::{lexer::is_atom_char, span::Location};

/// How an atom is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// Bare text: keywords, numbers, `yes`/`no`.
    Symbol,
    /// Quoted text.
    String,
}

/// A leaf value.
#[derive(Debug, Clone)]
pub struct Atom {
    kind: AtomKind,
    text: String,
    location: Option<Location>,
}

impl Atom {
    /// A bare atom.
    pub fn symbol(text: impl Into<String>) -> Self {
        Self {
            kind: AtomKind::Symbol,
            text: text.into(),
            location: None,
        }
    }

    /// A quoted atom. `text` is the unescaped value.
    pub fn string(text: impl Into<String>) -> Self {
        Self {
            kind: AtomKind::String,
            text: text.into(),
            location: None,
        }
    }

    /// A bare numeric atom in canonical form.
    ///
    /// See [`format_number`].
    pub fn number(value: f64) -> Self {
        Self::symbol(format_number(value))
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn kind(&self) -> AtomKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_symbol(&self) -> bool {
        self.kind == AtomKind::Symbol
    }

    pub fn is_string(&self) -> bool {
        self.kind == AtomKind::String
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Atom {}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AtomKind::Symbol => write!(f, "{}", self.text),
            AtomKind::String => write!(f, "{:?}", self.text),
        }
    }
}

/// One element of a node's child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Atom(Atom),
    Node(Node),
}

impl Child {
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Child::Atom(atom) => Some(atom),
            Child::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            Child::Atom(_) => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Child::Node(_))
    }

    pub fn location(&self) -> Option<Location> {
        match self {
            Child::Atom(atom) => atom.location(),
            Child::Node(node) => node.location(),
        }
    }
}

impl From<Atom> for Child {
    fn from(atom: Atom) -> Self {
        Child::Atom(atom)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

/// A tagged list.
#[derive(Debug, Clone)]
pub struct Node {
    tag: String,
    children: Vec<Child>,
    location: Option<Location>,
}

impl Node {
    /// Create an empty node.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            children: Vec::new(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Append a child, builder style.
    pub fn with(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a bare atom, builder style.
    pub fn with_symbol(self, text: impl Into<String>) -> Self {
        self.with(Atom::symbol(text))
    }

    /// Append a quoted atom, builder style.
    pub fn with_string(self, text: impl Into<String>) -> Self {
        self.with(Atom::string(text))
    }

    /// Append a number, builder style.
    pub fn with_number(self, value: f64) -> Self {
        self.with(Atom::number(value))
    }

    pub fn push(&mut self, child: impl Into<Child>) {
        self.children.push(child.into());
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn into_children(self) -> Vec<Child> {
        self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// The 1-based source line, if the node came from text.
    pub fn line(&self) -> Option<usize> {
        self.location.map(|location| location.line())
    }

    /// Iterate over the child nodes, skipping atoms.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Child::as_node)
    }

    /// Iterate over the child atoms, skipping nodes.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.children.iter().filter_map(Child::as_atom)
    }

    /// The first child node with `tag`.
    pub fn find(&self, tag: &str) -> Option<&Node> {
        self.nodes().find(|node| node.tag == tag)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.children == other.children
    }
}

impl Eq for Node {}

/// Whether `text` reads back as a single bare atom.
///
/// Empty text and text holding whitespace, parentheses, quotes or control
/// characters must be quoted.
pub fn is_bare(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_atom_char)
}

/// Format a number the way the format writes it.
///
/// Uses the shortest text that reads back to the same value, without
/// exponent notation or a trailing `.0`. Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
