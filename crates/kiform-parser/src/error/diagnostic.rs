//! A single decode failure.
//!
//! Every [`Diagnostic`] has an [`ErrorCode`]. Its message names the entity
//! and field involved, e.g. ``pad `drill`: drill diameter must be a number``.
//! A failure tied to a token or node records that element's [`Location`];
//! one about the document as a whole may carry only a line.

use std::fmt;

use crate::{
    error::{ErrorCode, ErrorKind},
    span::{Location, Span},
};

/// A located decode failure.
///
/// `Display` puts the code and line after the message:
///
/// ```text
/// pad: duplicate field `size` (E204, line 12)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    span: Option<Span>,
    line: Option<usize>,
    help: Option<String>,
}

impl Diagnostic {
    /// A diagnostic with no location yet.
    ///
    /// # Example
    ///
    /// ```
    /// # use kiform_parser::error::{Diagnostic, ErrorCode};
    /// # use kiform_parser::{Location, Span};
    ///
    /// let diag = Diagnostic::new(ErrorCode::E001, "unterminated string literal")
    ///     .at(Location::new(Span::new(14..30), 3));
    /// assert_eq!(diag.line(), Some(3));
    /// assert_eq!(diag.label(), "unterminated string literal");
    /// ```
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            span: None,
            line: None,
            help: None,
        }
    }

    /// Point at the element found at `location`.
    pub fn at(mut self, location: Location) -> Self {
        self.span = Some(location.span());
        self.line = Some(location.line());
        self
    }

    /// Like [`at`](Self::at) for elements that may have been built by hand.
    pub fn at_opt(self, location: Option<Location>) -> Self {
        match location {
            Some(location) => self.at(location),
            None => self,
        }
    }

    /// Record a line without a span.
    pub fn on_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The source bytes the failure points at.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// The 1-based source line.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Text to underline the span with.
    pub fn label(&self) -> &'static str {
        self.code.description()
    }

    /// Help specific to this failure, else the code's general hint.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref().or_else(|| self.code.hint())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.message, self.code)?;
        if let Some(line) = self.line {
            write!(f, ", line {line}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for Diagnostic {}
