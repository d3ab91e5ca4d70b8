//! Error types for kiform operations.
//!
//! This module provides the main error type [`KiformError`] which wraps the
//! error conditions that can occur while reading, writing, or configuring the
//! codec.

use std::{fmt, io};

use thiserror::Error;

use kiform_parser::{ErrorKind, ParseError};

/// The main error type for kiform operations.
///
/// # Diagnostic Variants
///
/// The `Decode` variant contains structured error information with source
/// code spans, together with the source text it refers to, so callers can
/// render rich reports.
#[derive(Debug, Error)]
pub enum KiformError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Decode { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl KiformError {
    /// Create a new `Decode` error with the associated source code.
    pub fn new_decode_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Decode {
            err,
            src: src.into(),
        }
    }

    /// The category of the failure.
    pub fn kind(&self) -> ErrorCategory {
        match self {
            KiformError::Io(_) => ErrorCategory::Io,
            KiformError::Decode { err, .. } => match err.kind() {
                ErrorKind::Syntax => ErrorCategory::Syntax,
                ErrorKind::Schema => ErrorCategory::Schema,
                ErrorKind::Value => ErrorCategory::Value,
            },
            KiformError::Config(_) => ErrorCategory::Config,
        }
    }
}

/// The category of a [`KiformError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed text: unbalanced parentheses, an unterminated string.
    Syntax,
    /// A well-formed tree of the wrong shape.
    Schema,
    /// A value that does not coerce to its field's type.
    Value,
    Io,
    Config,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Syntax => "syntax",
            ErrorCategory::Schema => "schema",
            ErrorCategory::Value => "value",
            ErrorCategory::Io => "io",
            ErrorCategory::Config => "config",
        };
        f.write_str(name)
    }
}
