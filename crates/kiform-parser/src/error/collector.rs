//! Collector for accumulating diagnostics during a processing phase.
//!
//! The lexer uses a [`DiagnosticCollector`] so a document with several broken
//! strings reports all of them in one pass instead of stopping at the first.

use crate::error::{Diagnostic, ParseError};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// `Err` with every diagnostic in emission order if any was emitted.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(ParseError::new(self.diagnostics))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_empty_is_ok() {
        assert!(DiagnosticCollector::new().finish().is_ok());
    }

    #[test]
    fn test_collector_keeps_every_diagnostic() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::new(ErrorCode::E001, "first").on_line(2));
        collector.emit(Diagnostic::new(ErrorCode::E002, "second").on_line(5));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "first");
        assert_eq!(err.line(), Some(2));
    }
}
