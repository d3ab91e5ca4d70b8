//! Token definitions for the S-expression lexer.

use std::fmt;

use crate::span::Location;

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `(`
    Open,
    /// `)`
    Close,
    /// A bare atom: keyword, number, hexadecimal stamp, `yes`/`no`, ...
    Atom(&'a str),
    /// A quoted string with escapes resolved.
    String(String),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open => write!(f, "`(`"),
            Token::Close => write!(f, "`)`"),
            Token::Atom(text) => write!(f, "`{text}`"),
            Token::String(text) => write!(f, "string \"{text}\""),
        }
    }
}

/// A token together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'a> {
    pub token: Token<'a>,
    pub location: Location,
}

impl<'a> PositionedToken<'a> {
    pub fn new(token: Token<'a>, location: Location) -> Self {
        Self { token, location }
    }
}
