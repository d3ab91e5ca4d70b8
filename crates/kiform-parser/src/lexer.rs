//! Lexical analyzer for S-expression source text.
//!
//! The lexer converts source text into a stream of [`Token`]s for the
//! [`parser`](super::parser). It recognises four token kinds: `(`, `)`,
//! quoted strings, and bare atoms. Whitespace separates tokens and is not
//! emitted.
//!
//! Bare atoms are kept as the exact source slice, so numeric literals reach
//! the tree without any loss of precision.
//!
//! The public entry point is [`tokenize`], which performs error-recovering
//! lexical analysis and collects all diagnostics in a single pass.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location as _, Stream},
    token::{none_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::{LineIndex, Span},
    tokens::{PositionedToken, Token},
};

/// Rich diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    pub start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// One piece of string content.
enum Fragment {
    Char(char),
    /// An escape the format does not define; kept with its backslash.
    UnknownEscape(char),
}

/// Parse an escape sequence after the backslash.
///
/// Handles `\"`, `\\`, `\n`, `\r` and `\t`. Any other escaped character is
/// preserved verbatim.
fn string_escape(input: &mut Input<'_>) -> IResult<Fragment> {
    preceded('\\', none_of(['\n', '\r']))
        .map(|c| match c {
            'n' => Fragment::Char('\n'),
            'r' => Fragment::Char('\r'),
            't' => Fragment::Char('\t'),
            '"' => Fragment::Char('"'),
            '\\' => Fragment::Char('\\'),
            other => Fragment::UnknownEscape(other),
        })
        .parse_next(input)
}

/// Parse a complete string literal with double quotes.
///
/// Strings may not span lines: a raw newline before the closing quote is an
/// unterminated string.
fn string_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let string_char = none_of(['"', '\\', '\n', '\r']).map(Fragment::Char);

    let string_content =
        repeat(0.., alt((string_escape, string_char))).fold(String::new, |mut acc, fragment| {
            match fragment {
                Fragment::Char(c) => acc.push(c),
                Fragment::UnknownEscape(c) => {
                    acc.push('\\');
                    acc.push(c);
                }
            }
            acc
        });

    let start_pos = input.current_token_start();

    '"'.parse_next(input)?;

    // Commit after the opening quote so the diagnostic context survives
    cut_err(terminated(string_content, '"'))
        .context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            help: Some("add a closing `\"` before the end of the line"),
            start: start_pos,
        })
        .parse_next(input)
        .map(Token::String)
}

/// Whether `c` can appear in a bare atom.
pub(crate) fn is_atom_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && !matches!(c, '(' | ')' | '"')
}

/// Parse a bare atom: keywords, numbers, hexadecimal stamps, `yes`/`no`.
fn atom<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., is_atom_char)
        .map(Token::Atom)
        .parse_next(input)
}

fn paren<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt(('('.value(Token::Open), ')'.value(Token::Close))).parse_next(input)
}

fn whitespace(input: &mut Input<'_>) -> IResult<()> {
    take_while(1.., char::is_whitespace).void().parse_next(input)
}

/// Parse a single token, returning it with its byte span.
fn spanned_token<'a>(input: &mut Input<'a>) -> IResult<(Token<'a>, Span)> {
    let start_pos = input.current_token_start();

    let token = alt((
        paren,
        string_literal, // Must come before atom
        atom,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok((token, Span::new(start_pos..end_pos)))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
    lines: LineIndex,
}

impl<'a> Lexer<'a> {
    fn new(source: &str) -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
            lines: LineIndex::new(source),
        }
    }

    /// Tokenize the input, collecting tokens and errors.
    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            if whitespace(&mut input).is_ok() {
                continue;
            }

            match spanned_token(&mut input) {
                Ok((token, span)) => {
                    let location = self.lines.locate(span);
                    self.tokens.push(PositionedToken::new(token, location));
                }
                Err(e) => {
                    let error_pos = input.current_token_start();
                    let diagnostic = self.convert_err_mode(e, error_pos);
                    self.diagnostics.emit(diagnostic);

                    // Resume after the offending character
                    if !input.is_empty() {
                        input.next_token();
                    }
                }
            }
        }
    }

    /// Finish lexing and return tokens or collected errors.
    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Falls back to E002 (unexpected character) if no diagnostic context is
    /// attached.
    fn convert_err_mode(
        &self,
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let location = self.lines.locate(Span::new(*start..error_pos));

            let diag = Diagnostic::new(*code, *message).at(location);
            return match help {
                Some(help) => diag.with_help(*help),
                None => diag,
            };
        }

        let location = self.lines.locate(Span::new(error_pos..error_pos.saturating_add(1)));
        Diagnostic::new(ErrorCode::E002, "unexpected character").at(location)
    }
}

/// Tokenize source text, collecting every lexer error.
///
/// # Returns
///
/// - `Ok(tokens)` - All tokens successfully lexed
/// - `Err(ParseError)` - One or more errors occurred; contains all diagnostics
pub fn tokenize(source: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let mut lexer = Lexer::new(source);
    lexer.tokenize(LocatingSlice::new(source));
    lexer.finish()
}
