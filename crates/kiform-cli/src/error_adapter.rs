//! Rendering [`KiformError`]s with miette.
//!
//! A decode error yields one [`Report`] per diagnostic, each underlining the
//! offending part of the footprint text. I/O and configuration errors yield a
//! single report with no source attached.

use std::{fmt, iter};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use kiform::KiformError;
use kiform_parser::Diagnostic;

/// One failure, ready for a miette report handler.
#[derive(Debug)]
pub struct Report<'a> {
    message: String,
    code: String,
    help: Option<&'a str>,
    label: Option<LabeledSpan>,
    src: Option<&'a str>,
}

impl<'a> Report<'a> {
    fn from_diagnostic(diag: &'a Diagnostic, src: &'a str) -> Self {
        // Nothing to underline, so the line goes into the message
        let message = match (diag.span(), diag.line()) {
            (None, Some(line)) => format!("{} on line {line}", diag.message()),
            _ => diag.message().to_string(),
        };
        let label = diag.span().map(|span| {
            LabeledSpan::new_primary_with_span(
                Some(diag.label().to_string()),
                SourceSpan::new(span.start().into(), span.len()),
            )
        });

        Self {
            message,
            code: diag.code().to_string(),
            help: diag.help(),
            label,
            src: Some(src),
        }
    }

    fn from_error(err: &KiformError) -> Self {
        let code = match err {
            KiformError::Io(_) => "kiform::io",
            KiformError::Decode { .. } => "kiform::decode",
            KiformError::Config(_) => "kiform::config",
        };
        Self {
            message: err.to_string(),
            code: code.to_string(),
            help: None,
            label: None,
            src: None,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Report<'_> {}

impl MietteDiagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        Some(Box::new(&self.code))
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.help.map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.src.as_ref().map(|src| src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.label
            .clone()
            .map(|label| Box::new(iter::once(label)) as Box<dyn Iterator<Item = LabeledSpan>>)
    }
}

/// The reports to print for `err`, in diagnostic order.
pub fn to_reports(err: &KiformError) -> Vec<Report<'_>> {
    match err {
        KiformError::Decode { err: parse_err, src } if !parse_err.diagnostics().is_empty() => {
            parse_err
                .diagnostics()
                .iter()
                .map(|diag| Report::from_diagnostic(diag, src))
                .collect()
        }
        _ => vec![Report::from_error(err)],
    }
}

#[cfg(test)]
mod tests {
    use miette::{GraphicalReportHandler, GraphicalTheme};

    use kiform::FootprintCodec;

    use super::*;

    fn decode_error(source: &str) -> KiformError {
        FootprintCodec::default()
            .decode(source)
            .expect_err("source should not decode")
    }

    fn render(report: &Report<'_>) -> String {
        let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
        let mut out = String::new();
        handler.render_report(&mut out, report).unwrap();
        out
    }

    #[test]
    fn test_unterminated_string_is_underlined() {
        let err = decode_error("(footprint \"R_0603\n  (layer \"F.Cu\")\n)\n");
        let reports = to_reports(&err);
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        assert_eq!(report.code().map(|code| code.to_string()).as_deref(), Some("E001"));
        assert!(report.help().is_some());
        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 11);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_every_lexer_error_is_reported() {
        let err = decode_error("(footprint \"A\n  (descr \"B\n)\n");
        let reports = to_reports(&err);
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|report| report.to_string() == "unterminated string literal"));
    }

    #[test]
    fn test_unknown_tag_report_names_code_and_tag() {
        let source = "(footprint \"X\"\n  (layer \"F.Cu\")\n  (fp_blob 1)\n)\n";
        let err = decode_error(source);
        let reports = to_reports(&err);

        let text = render(&reports[0]);
        assert!(text.contains("E202"), "{text}");
        assert!(text.contains("footprint: unknown tag `fp_blob`"), "{text}");
        assert!(text.contains("zones, groups"), "{text}");
    }

    #[test]
    fn test_line_only_diagnostic_mentions_line() {
        let err = decode_error("");
        let reports = to_reports(&err);

        assert_eq!(reports[0].to_string(), "empty document on line 1");
        assert!(reports[0].labels().is_none());
    }

    #[test]
    fn test_config_error() {
        let err = KiformError::Config("format.indent_width must be at least 1".to_string());
        let reports = to_reports(&err);

        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].to_string(),
            "Configuration error: format.indent_width must be at least 1"
        );
        assert_eq!(
            reports[0].code().map(|code| code.to_string()).as_deref(),
            Some("kiform::config")
        );
        assert!(reports[0].source_code().is_none());
    }
}
