//! # kiform parser
//!
//! The generic S-expression engine behind kiform: a tokenizer, a parser that
//! builds an untyped [`Node`] tree, the [`schema`] building blocks that map
//! trees onto typed entities, and a [`Formatter`] that renders trees back to
//! text under a document-specific [`Style`].
//!
//! ## Usage
//!
//! ```
//! # use kiform_parser::{parse, Compact, Formatter, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let tree = parse("(layer \"F.Cu\")")?;
//!     assert_eq!(tree.tag(), "layer");
//!
//!     let text = Formatter::default().render(&tree, &Compact);
//!     assert_eq!(text, "(layer \"F.Cu\")\n");
//!     Ok(())
//! }
//! ```

pub mod error;
mod format;
mod lexer;
mod parser;
pub mod schema;
mod span;
mod tokens;
mod tree;

pub use error::{Diagnostic, ErrorCode, ErrorKind, ParseError};
pub use format::{Compact, FormatContext, Formatter, Layout, Style, escape};
pub use span::{Location, Span};
pub use tree::{Atom, AtomKind, Child, Node, format_number, is_bare};

use log::debug;

/// Parse source text into a tree.
///
/// 1. **Tokenize** - Convert source text to tokens, collecting every lexer error
/// 2. **Parse** - Build the single root node
///
/// # Errors
///
/// Returns a [`ParseError`] whose diagnostics are all
/// [`ErrorKind::Syntax`] errors.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    let tokens = lexer::tokenize(source)?;
    debug!(tokens = tokens.len(); "Tokenized source");

    let root = parser::build_tree(&tokens)?;
    debug!(tag = root.tag(), children = root.len(); "Parsed tree");

    Ok(root)
}
