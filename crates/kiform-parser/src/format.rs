//! Rendering a tree to text.
//!
//! The [`Formatter`] owns the mechanics: indentation, spacing, string
//! quoting. Where lines break is decided by a [`Style`], which a document
//! schema supplies. For every node the formatter asks the style for a
//! [`Layout`], passing a [`FormatContext`] that describes where the node sits.
//!
//! Indentation is one fixed unit per nesting level of the line a child
//! starts on. The output ends with a single newline.

use crate::tree::{Atom, AtomKind, Child, Node, is_bare};

/// Where a node sits in the tree being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatContext<'a> {
    /// Nesting level of the line the node starts on; the root is 0.
    pub depth: usize,
    /// Tag of the enclosing node, `None` for the root.
    pub parent: Option<&'a str>,
    /// Position among the parent's children.
    pub index: usize,
}

impl FormatContext<'_> {
    /// The context of the document root.
    pub fn root() -> Self {
        Self {
            depth: 0,
            parent: None,
            index: 0,
        }
    }
}

/// How a node's children are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Every child on the node's line.
    Inline,
    /// Children before `from` on the node's line, each later child on its
    /// own line one level deeper, and the closing parenthesis on its own
    /// line at the node's level.
    Block { from: usize },
    /// Children before `from` on the node's line, later children together on
    /// one continuation line one level deeper, closed on that line.
    Hanging { from: usize },
    /// Like [`Layout::Block`], for a list opened in the middle of its
    /// parent's line: later children two levels deeper, the closing
    /// parenthesis one level deeper, so the parent's remaining children
    /// follow it on that line.
    Continued { from: usize },
}

/// Decides where a document kind breaks lines.
pub trait Style {
    fn layout(&self, node: &Node, context: &FormatContext<'_>) -> Layout;
}

/// Everything on one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compact;

impl Style for Compact {
    fn layout(&self, _node: &Node, _context: &FormatContext<'_>) -> Layout {
        Layout::Inline
    }
}

/// Renders trees as text.
#[derive(Debug, Clone)]
pub struct Formatter {
    indent_width: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Formatter {
    /// A formatter indenting `indent_width` spaces per level.
    pub fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Render a document.
    pub fn render(&self, root: &Node, style: &dyn Style) -> String {
        let mut out = String::new();
        self.write_node(&mut out, root, style, FormatContext::root());
        out.push('\n');
        out
    }

    fn write_node(&self, out: &mut String, node: &Node, style: &dyn Style, context: FormatContext<'_>) {
        let children = node.children();
        let (split, layout) = match style.layout(node, &context) {
            Layout::Inline => (children.len(), Layout::Inline),
            Layout::Block { from } if from < children.len() => (from, Layout::Block { from }),
            Layout::Hanging { from } if from < children.len() => (from, Layout::Hanging { from }),
            Layout::Continued { from } if from < children.len() => (from, Layout::Continued { from }),
            // Nothing to break out
            Layout::Block { .. } | Layout::Hanging { .. } | Layout::Continued { .. } => {
                (children.len(), Layout::Inline)
            }
        };

        out.push('(');
        out.push_str(node.tag());

        let child_context = |index: usize, depth: usize| FormatContext {
            depth,
            parent: Some(node.tag()),
            index,
        };

        for (index, child) in children[..split].iter().enumerate() {
            out.push(' ');
            self.write_child(out, child, style, child_context(index, context.depth));
        }

        let deeper = context.depth + 1;
        match layout {
            Layout::Inline => {}
            Layout::Block { .. } | Layout::Continued { .. } => {
                let (child_depth, close_depth) = match layout {
                    Layout::Continued { .. } => (deeper + 1, deeper),
                    _ => (deeper, context.depth),
                };
                for (index, child) in children.iter().enumerate().skip(split) {
                    out.push('\n');
                    self.indent(out, child_depth);
                    self.write_child(out, child, style, child_context(index, child_depth));
                }
                out.push('\n');
                self.indent(out, close_depth);
            }
            Layout::Hanging { .. } => {
                out.push('\n');
                self.indent(out, deeper);
                for (index, child) in children.iter().enumerate().skip(split) {
                    if index > split {
                        out.push(' ');
                    }
                    self.write_child(out, child, style, child_context(index, deeper));
                }
            }
        }

        out.push(')');
    }

    fn write_child(&self, out: &mut String, child: &Child, style: &dyn Style, context: FormatContext<'_>) {
        match child {
            Child::Atom(atom) => write_atom(out, atom),
            Child::Node(node) => self.write_node(out, node, style, context),
        }
    }

    fn indent(&self, out: &mut String, depth: usize) {
        for _ in 0..depth * self.indent_width {
            out.push(' ');
        }
    }
}

fn write_atom(out: &mut String, atom: &Atom) {
    match atom.kind() {
        AtomKind::Symbol if is_bare(atom.text()) => out.push_str(atom.text()),
        // Symbols that would not lex back as one atom are quoted
        AtomKind::Symbol | AtomKind::String => {
            out.push('"');
            out.push_str(&escape(atom.text()));
            out.push('"');
        }
    }
}

/// Escape text for a quoted string.
///
/// The inverse of the lexer's escape handling. Quotes, backslashes, line
/// breaks and tabs are escaped; everything else is written as is.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Breaks `block` nodes and hangs `hang` nodes after their first child,
    /// and continues `list` nodes from the start.
    struct Test;

    impl Style for Test {
        fn layout(&self, node: &Node, _context: &FormatContext<'_>) -> Layout {
            match node.tag() {
                "block" => Layout::Block { from: 1 },
                "hang" => Layout::Hanging { from: 1 },
                "list" => Layout::Continued { from: 0 },
                _ => Layout::Inline,
            }
        }
    }

    fn sample() -> Node {
        Node::new("block")
            .with_string("head")
            .with(Node::new("a").with_number(1.0))
            .with(
                Node::new("block")
                    .with_symbol("inner")
                    .with(Node::new("b").with_number(2.5)),
            )
            .with(
                Node::new("hang")
                    .with_string("1")
                    .with(Node::new("c").with_symbol("x")),
            )
    }

    #[test]
    fn test_compact() {
        let text = Formatter::default().render(&sample(), &Compact);
        assert_eq!(
            text,
            "(block \"head\" (a 1) (block inner (b 2.5)) (hang \"1\" (c x)))\n"
        );
    }

    #[test]
    fn test_block_and_hanging() {
        let text = Formatter::default().render(&sample(), &Test);
        let expected = "\
(block \"head\"
  (a 1)
  (block inner
    (b 2.5)
  )
  (hang \"1\"
    (c x))
)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_continued_list() {
        let node = Node::new("block")
            .with_symbol("x")
            .with(
                Node::new("shape")
                    .with(
                        Node::new("list")
                            .with(Node::new("p").with_number(1.0))
                            .with(Node::new("p").with_number(2.0)),
                    )
                    .with(Node::new("width").with_number(0.1)),
            );
        let expected = "\
(block x
  (shape (list
      (p 1)
      (p 2)
    ) (width 0.1))
)
";
        assert_eq!(Formatter::default().render(&node, &Test), expected);
    }

    #[test]
    fn test_indent_width() {
        let node = Node::new("block").with_symbol("x").with(Node::new("y"));
        let text = Formatter::new(4).render(&node, &Test);
        assert_eq!(text, "(block x\n    (y)\n)\n");
    }

    #[test]
    fn test_block_without_tail_stays_inline() {
        let node = Node::new("block").with_symbol("only");
        assert_eq!(Formatter::default().render(&node, &Test), "(block only)\n");
    }

    #[test]
    fn test_context_reports_parent_and_index() {
        struct Recording(std::cell::RefCell<Vec<(String, Option<String>, usize, usize)>>);

        impl Style for Recording {
            fn layout(&self, node: &Node, context: &FormatContext<'_>) -> Layout {
                self.0.borrow_mut().push((
                    node.tag().to_string(),
                    context.parent.map(str::to_string),
                    context.index,
                    context.depth,
                ));
                Layout::Block { from: 0 }
            }
        }

        let node = Node::new("root")
            .with_symbol("x")
            .with(Node::new("child"));
        let style = Recording(Default::default());
        Formatter::default().render(&node, &style);

        let seen = style.0.into_inner();
        assert_eq!(seen[0], ("root".to_string(), None, 0, 0));
        assert_eq!(seen[1], ("child".to_string(), Some("root".to_string()), 1, 1));
    }

    #[test]
    fn test_symbols_that_need_quotes() {
        let node = Node::new("generator")
            .with_symbol("my tool")
            .with_symbol("")
            .with_symbol("a(b")
            .with_symbol("kiform");
        assert_eq!(
            Formatter::default().render(&node, &Compact),
            "(generator \"my tool\" \"\" \"a(b\" kiform)\n"
        );
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("two\nlines"), "two\\nlines");
    }
}
