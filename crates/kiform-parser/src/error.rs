//! Error and diagnostic system for the kiform engine.
//!
//! Every failure while turning text into an entity is reported as a
//! [`Diagnostic`]: a message with an [`ErrorCode`], plus the span and line of
//! the offending element when it has one. One or more diagnostics are wrapped in
//! a [`ParseError`] at the phase boundary.
//!
//! Error codes are grouped by phase, and each group maps to an [`ErrorKind`]:
//!
//! | Codes  | Phase     | Kind                  |
//! |--------|-----------|-----------------------|
//! | `E0xx` | lexer     | [`ErrorKind::Syntax`] |
//! | `E1xx` | parser    | [`ErrorKind::Syntax`] |
//! | `E2xx` | schema    | [`ErrorKind::Schema`] |
//! | `E3xx` | coercion  | [`ErrorKind::Value`]  |
//!
//! # Example
//!
//! ```
//! # use kiform_parser::error::{Diagnostic, ErrorCode, ErrorKind};
//! # use kiform_parser::{Location, Span};
//!
//! let diag = Diagnostic::new(ErrorCode::E201, "pad: missing required `layers`")
//!     .at(Location::new(Span::new(120..180), 7));
//!
//! assert_eq!(diag.kind(), ErrorKind::Schema);
//! assert_eq!(diag.to_string(), "pad: missing required `layers` (E201, line 7)");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::{ErrorCode, ErrorKind};
pub use parse_error::{ParseError, Result};
