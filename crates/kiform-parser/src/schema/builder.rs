//! Encoding side of a schema: field specifications and the node builder.

use crate::{
    schema::Keyword,
    tree::{Atom, Node},
};

/// A value that can be written as the children of a field node.
pub trait FieldValue {
    /// Append the value to `node`.
    fn write(&self, node: &mut Node);

    /// Whether the value carries nothing worth writing.
    fn is_empty(&self) -> bool {
        false
    }
}

impl FieldValue for f64 {
    fn write(&self, node: &mut Node) {
        node.push(Atom::number(*self));
    }
}

impl FieldValue for i64 {
    fn write(&self, node: &mut Node) {
        node.push(Atom::symbol(self.to_string()));
    }
}

impl FieldValue for u32 {
    fn write(&self, node: &mut Node) {
        node.push(Atom::symbol(self.to_string()));
    }
}

/// Written as `yes` or `no`.
impl FieldValue for bool {
    fn write(&self, node: &mut Node) {
        node.push(Atom::symbol(if *self { "yes" } else { "no" }));
    }
}

/// Written quoted.
impl FieldValue for String {
    fn write(&self, node: &mut Node) {
        node.push(Atom::string(self.as_str()));
    }

    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }
}

impl<const N: usize> FieldValue for [f64; N] {
    fn write(&self, node: &mut Node) {
        for value in self {
            value.write(node);
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn write(&self, node: &mut Node) {
        for value in self {
            value.write(node);
        }
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// When an encoded field is left out.
#[derive(Debug, Clone, PartialEq)]
pub enum Elision<T> {
    /// Always written.
    Never,
    /// Left out when equal to the given default.
    IfDefault(T),
    /// Left out when [`FieldValue::is_empty`] holds.
    IfEmpty,
}

/// How one field of an entity is encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec<T> {
    pub tag: &'static str,
    pub elision: Elision<T>,
}

impl<T> FieldSpec<T> {
    pub const fn new(tag: &'static str, elision: Elision<T>) -> Self {
        Self { tag, elision }
    }

    /// A field written whenever it is present.
    pub const fn always(tag: &'static str) -> Self {
        Self::new(tag, Elision::Never)
    }
}

impl<T: FieldValue + PartialEq> FieldSpec<T> {
    /// Whether `value` is left out of the encoded node.
    pub fn elides(&self, value: &T) -> bool {
        match &self.elision {
            Elision::Never => false,
            Elision::IfDefault(default) => value == default,
            Elision::IfEmpty => value.is_empty(),
        }
    }
}

/// Builds a node child by child, applying elision rules for fields.
#[derive(Debug)]
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            node: Node::new(tag),
        }
    }

    /// Append a bare atom.
    pub fn symbol(mut self, text: impl Into<String>) -> Self {
        self.node.push(Atom::symbol(text));
        self
    }

    /// Append a quoted atom.
    pub fn string(mut self, text: impl Into<String>) -> Self {
        self.node.push(Atom::string(text));
        self
    }

    /// Append a number.
    pub fn number(mut self, value: f64) -> Self {
        self.node.push(Atom::number(value));
        self
    }

    /// Append a number unless it is absent.
    pub fn opt_number(self, value: Option<f64>) -> Self {
        match value {
            Some(value) => self.number(value),
            None => self,
        }
    }

    /// Append a bare keyword.
    pub fn keyword<K: Keyword>(self, keyword: K) -> Self {
        self.symbol(keyword.as_str())
    }

    /// Append a bare flag when `on` holds.
    pub fn flag(self, name: &str, on: bool) -> Self {
        if on { self.symbol(name) } else { self }
    }

    /// Append a child node.
    pub fn child(mut self, node: Node) -> Self {
        self.node.push(node);
        self
    }

    /// Append a child node unless it is absent.
    pub fn opt_child(self, node: Option<Node>) -> Self {
        match node {
            Some(node) => self.child(node),
            None => self,
        }
    }

    /// Append child nodes in order.
    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        for node in nodes {
            self.node.push(node);
        }
        self
    }

    /// Append `(tag value...)` unless the spec elides `value`.
    pub fn field<T: FieldValue + PartialEq>(mut self, spec: &FieldSpec<T>, value: &T) -> Self {
        if !spec.elides(value) {
            let mut field = Node::new(spec.tag);
            value.write(&mut field);
            self.node.push(field);
        }
        self
    }

    /// Like [`field`](Self::field), writing nothing for an absent value.
    pub fn opt_field<T: FieldValue + PartialEq>(
        self,
        spec: &FieldSpec<T>,
        value: Option<&T>,
    ) -> Self {
        match value {
            Some(value) => self.field(spec, value),
            None => self,
        }
    }

    pub fn build(self) -> Node {
        self.node
    }
}
