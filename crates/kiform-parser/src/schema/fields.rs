//! Decoding side of a schema: a cursor over one node's children.

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    schema::{Keyword, coerce},
    tree::{Atom, Node},
};

/// Reads the children of one node on behalf of an entity.
///
/// Atoms are consumed front to back with the `next_*` methods, while bare
/// flags may be taken from anywhere among the remaining atoms with
/// [`flag`](Self::flag). Child nodes are visited with [`nodes`](Self::nodes)
/// and dispatched by the caller. [`finish`](Self::finish) rejects any atom
/// left over.
///
/// Every diagnostic names the entity and carries the source line when the
/// node came from text.
#[derive(Debug)]
pub struct Fields<'n> {
    node: &'n Node,
    entity: &'static str,
    atoms: Vec<&'n Atom>,
    cursor: usize,
}

impl<'n> Fields<'n> {
    pub fn new(node: &'n Node, entity: &'static str) -> Self {
        Self {
            node,
            entity,
            atoms: node.atoms().collect(),
            cursor: 0,
        }
    }

    /// Like [`new`](Self::new), but first checks the node's tag.
    ///
    /// `tags` lists every accepted spelling; the first is the canonical one.
    pub fn expect(node: &'n Node, tags: &[&str], entity: &'static str) -> Result<Self> {
        if tags.contains(&node.tag()) {
            return Ok(Self::new(node, entity));
        }
        let expected = tags.first().copied().unwrap_or_default();
        let message = format!("{entity}: expected `({expected}`, found `({}`", node.tag());
        Err(Diagnostic::new(ErrorCode::E200, message).at_opt(node.location()))
    }

    pub fn node(&self) -> &'n Node {
        self.node
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Child nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &'n Node> + use<'n> {
        self.node.nodes()
    }

    /// The atoms not yet consumed.
    pub fn remaining(&self) -> &[&'n Atom] {
        &self.atoms[self.cursor..]
    }

    /// Whether any atom is left.
    pub fn has_next(&self) -> bool {
        self.cursor < self.atoms.len()
    }

    /// Take the bare flag `name` from the remaining atoms, if present.
    pub fn flag(&mut self, name: &str) -> bool {
        let found = self.atoms[self.cursor..]
            .iter()
            .position(|atom| atom.is_symbol() && atom.text() == name);
        match found {
            Some(offset) => {
                self.atoms.remove(self.cursor + offset);
                true
            }
            None => false,
        }
    }

    /// Take the next atom.
    pub fn next_atom(&mut self, field: &str) -> Result<&'n Atom> {
        match self.atoms.get(self.cursor) {
            Some(atom) => {
                self.cursor += 1;
                Ok(*atom)
            }
            None => Err(self.arity(format!("{}: missing {field}", self.description()))),
        }
    }

    /// Take the next atom if there is one.
    pub fn next_opt_atom(&mut self) -> Option<&'n Atom> {
        let atom = self.atoms.get(self.cursor).copied();
        if atom.is_some() {
            self.cursor += 1;
        }
        atom
    }

    /// Take the next atom as text, quoted or bare.
    pub fn next_text(&mut self, field: &str) -> Result<String> {
        self.next_atom(field).map(|atom| atom.text().to_string())
    }

    pub fn next_number(&mut self, field: &str) -> Result<f64> {
        let atom = self.next_atom(field)?;
        self.coerce_number(atom, field)
    }

    /// Take the next atom as a number if one is left.
    pub fn next_opt_number(&mut self, field: &str) -> Result<Option<f64>> {
        match self.next_opt_atom() {
            Some(atom) => self.coerce_number(atom, field).map(Some),
            None => Ok(None),
        }
    }

    pub fn next_integer(&mut self, field: &str) -> Result<i64> {
        let atom = self.next_atom(field)?;
        coerce::integer(atom).ok_or_else(|| {
            self.value_error(
                ErrorCode::E300,
                atom,
                format!("{field} must be a whole number, found `{}`", atom.text()),
            )
        })
    }

    pub fn next_boolean(&mut self, field: &str) -> Result<bool> {
        let atom = self.next_atom(field)?;
        coerce::boolean(atom).ok_or_else(|| {
            self.value_error(
                ErrorCode::E302,
                atom,
                format!("{field} must be `yes` or `no`, found `{}`", atom.text()),
            )
        })
    }

    pub fn next_keyword<K: Keyword>(&mut self, field: &str) -> Result<K> {
        let atom = self.next_atom(field)?;
        K::from_keyword(atom.text()).ok_or_else(|| {
            self.value_error(
                ErrorCode::E301,
                atom,
                format!("invalid {field} `{}`", atom.text()),
            )
            .with_help(format!("expected one of {}", K::expected()))
        })
    }

    /// Take every remaining atom as text.
    pub fn rest_text(&mut self) -> Vec<String> {
        let rest = self.remaining().iter().map(|atom| atom.text().to_string()).collect();
        self.cursor = self.atoms.len();
        rest
    }

    /// Take every remaining atom as a number.
    pub fn rest_numbers(&mut self, field: &str) -> Result<Vec<f64>> {
        let mut values = Vec::new();
        while let Some(value) = self.next_opt_number(field)? {
            values.push(value);
        }
        Ok(values)
    }

    /// Fail if any atom is left.
    pub fn finish(self) -> Result<()> {
        match self.atoms.get(self.cursor) {
            None => Ok(()),
            Some(atom) => {
                let message = format!("{}: unexpected value `{}`", self.description(), atom.text());
                Err(Diagnostic::new(ErrorCode::E203, message)
                    .at_opt(atom.location().or(self.node.location())))
            }
        }
    }

    /// E202 for a child this entity does not know.
    pub fn unknown(&self, child: &Node) -> Diagnostic {
        let message = format!("{}: unknown tag `{}`", self.entity, child.tag());
        Diagnostic::new(ErrorCode::E202, message).at_opt(child.location())
    }

    /// E201 for a required field that never appeared.
    pub fn missing(&self, field: &str) -> Diagnostic {
        let message = format!("{}: missing required `{field}`", self.description());
        Diagnostic::new(ErrorCode::E201, message).at_opt(self.node.location())
    }

    /// Store a field that may appear at most once.
    pub fn set_once<T>(&self, slot: &mut Option<T>, child: &Node, value: T) -> Result<()> {
        if slot.is_some() {
            let message = format!("{}: duplicate field `{}`", self.entity, child.tag());
            return Err(Diagnostic::new(ErrorCode::E204, message).at_opt(child.location()));
        }
        *slot = Some(value);
        Ok(())
    }

    /// Unwrap a required field.
    pub fn require<T>(&self, slot: Option<T>, field: &str) -> Result<T> {
        slot.ok_or_else(|| self.missing(field))
    }

    fn coerce_number(&self, atom: &Atom, field: &str) -> Result<f64> {
        coerce::number(atom).ok_or_else(|| {
            self.value_error(
                ErrorCode::E300,
                atom,
                format!("{field} must be a number, found `{}`", atom.text()),
            )
        })
    }

    fn value_error(&self, code: ErrorCode, atom: &Atom, message: String) -> Diagnostic {
        Diagnostic::new(code, format!("{}: {message}", self.description()))
            .at_opt(atom.location().or(self.node.location()))
    }

    fn arity(&self, message: String) -> Diagnostic {
        Diagnostic::new(ErrorCode::E203, message).at_opt(self.node.location())
    }

    /// "entity" or "entity `tag`" when the node is a field of the entity.
    fn description(&self) -> String {
        if self.node.tag() == self.entity {
            self.entity.to_string()
        } else {
            format!("{} `{}`", self.entity, self.node.tag())
        }
    }
}
