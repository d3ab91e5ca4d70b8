//! Error codes for the kiform diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexer errors
//! - `E1xx` - Parser errors
//! - `E2xx` - Schema errors (tree has the wrong shape for the entity)
//! - `E3xx` - Value errors (a well-placed token fails coercion)

use std::fmt;

/// Broad category of a failure, derived from its [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed token stream: unbalanced parentheses, unterminated string.
    Syntax,
    /// Well-formed tree with the wrong or missing shape for the entity.
    Schema,
    /// Coercion failure on an otherwise well-placed token.
    Value,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "syntax"),
            ErrorKind::Schema => write!(f, "schema"),
            ErrorKind::Value => write!(f, "value"),
        }
    }
}

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    ///
    /// A string was opened with a quote but the line ended before it closed.
    E001,

    /// Unexpected character.
    ///
    /// A control character was found outside a string.
    E002,

    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// Includes a closing parenthesis with no matching opening one.
    E100,

    /// Incomplete input.
    ///
    /// The input ended before every opened list was closed.
    E101,

    /// Trailing tokens.
    ///
    /// Tokens remain after the root list closed.
    E102,

    /// Missing tag.
    ///
    /// An opening parenthesis is not followed by a bare keyword.
    E103,

    // =========================================================================
    // Schema Errors (E2xx)
    // =========================================================================
    /// Unexpected root tag.
    ///
    /// The document's root keyword is not the one the entity expects.
    E200,

    /// Missing required field.
    E201,

    /// Unknown tag.
    ///
    /// A child node's tag is not part of the entity's schema.
    E202,

    /// Missing or surplus positional value.
    E203,

    /// Duplicate field.
    ///
    /// A field that may appear at most once appears several times.
    E204,

    // =========================================================================
    // Value Errors (E3xx)
    // =========================================================================
    /// Invalid number.
    E300,

    /// Invalid keyword.
    ///
    /// An atom is not one of the values the field accepts.
    E301,

    /// Invalid boolean.
    ///
    /// Booleans are written `yes` or `no`.
    E302,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E102 => "trailing tokens",
            ErrorCode::E103 => "missing tag",
            ErrorCode::E200 => "unexpected root tag",
            ErrorCode::E201 => "missing required field",
            ErrorCode::E202 => "unknown tag",
            ErrorCode::E203 => "wrong number of values",
            ErrorCode::E204 => "duplicate field",
            ErrorCode::E300 => "invalid number",
            ErrorCode::E301 => "invalid keyword",
            ErrorCode::E302 => "invalid boolean",
        }
    }

    /// What usually fixes a footprint file failing with this code.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ErrorCode::E001 => Some("strings end on the line they start; add the closing `\"`"),
            ErrorCode::E002 => Some("remove the control character or move it inside a quoted string"),
            ErrorCode::E101 => Some("every `(` needs a matching `)`"),
            ErrorCode::E102 => Some("a footprint file holds exactly one `(footprint ...)` list"),
            ErrorCode::E103 => Some("every list starts with a bare keyword such as `pad` or `fp_line`"),
            ErrorCode::E200 => Some("footprint files start with `(footprint` or, before KiCad 6, `(module`"),
            ErrorCode::E202 => Some("kiform reads KiCad 6 footprints; zones, groups and `stroke` are not supported"),
            ErrorCode::E204 => Some("keep one of the repeated nodes"),
            ErrorCode::E300 => Some("coordinates and sizes are millimetres written like `1.27` or `-0.5`"),
            ErrorCode::E302 => Some("write `yes` or `no`"),
            ErrorCode::E100 | ErrorCode::E201 | ErrorCode::E203 | ErrorCode::E301 => None,
        }
    }

    /// The [`ErrorKind`] this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E001
            | ErrorCode::E002
            | ErrorCode::E100
            | ErrorCode::E101
            | ErrorCode::E102
            | ErrorCode::E103 => ErrorKind::Syntax,
            ErrorCode::E200
            | ErrorCode::E201
            | ErrorCode::E202
            | ErrorCode::E203
            | ErrorCode::E204 => ErrorKind::Schema,
            ErrorCode::E300 | ErrorCode::E301 | ErrorCode::E302 => ErrorKind::Value,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E102.to_string(), "E102");
        assert_eq!(ErrorCode::E204.to_string(), "E204");
        assert_eq!(ErrorCode::E302.to_string(), "E302");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "unterminated string literal");
        assert_eq!(ErrorCode::E101.description(), "incomplete input");
        assert_eq!(ErrorCode::E202.description(), "unknown tag");
    }

    #[test]
    fn test_error_code_kind() {
        assert_eq!(ErrorCode::E001.kind(), ErrorKind::Syntax);
        assert_eq!(ErrorCode::E103.kind(), ErrorKind::Syntax);
        assert_eq!(ErrorCode::E201.kind(), ErrorKind::Schema);
        assert_eq!(ErrorCode::E300.kind(), ErrorKind::Value);
    }
}
