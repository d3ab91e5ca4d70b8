//! Parser for S-expression tokens.
//!
//! This module turns the token stream from the [`lexer`](super::lexer) into a
//! single root [`Node`]. The public entry point is [`build_tree`].
//!
//! Lists are tracked on an explicit stack instead of the call stack, so
//! nesting depth is bounded only by memory.

use winnow::{
    Parser as _,
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Location,
    tokens::{PositionedToken, Token},
    tree::{Atom, Node},
};

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// A list whose closing parenthesis has not been seen yet.
struct OpenList {
    node: Node,
    open: Location,
}

impl OpenList {
    fn close(self, close: Location) -> Node {
        self.node.with_location(self.open.to(close))
    }
}

fn open<'src>(input: &mut Input<'src>) -> IResult<Location> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::Open).then_some(token.location)
    })
    .parse_next(input)
}

fn close<'src>(input: &mut Input<'src>) -> IResult<Location> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::Close).then_some(token.location)
    })
    .parse_next(input)
}

/// Parse a bare or quoted atom.
fn atom<'src>(input: &mut Input<'src>) -> IResult<Atom> {
    any.verify_map(|token: &PositionedToken<'_>| match &token.token {
        Token::Atom(text) => Some(Atom::symbol(*text).with_location(token.location)),
        Token::String(text) => Some(Atom::string(text.clone()).with_location(token.location)),
        Token::Open | Token::Close => None,
    })
    .parse_next(input)
}

/// Parse the tag that must follow an opening parenthesis.
fn tag<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    any.verify_map(|token: &PositionedToken<'src>| match token.token {
        Token::Atom(text) => Some(text),
        _ => None,
    })
    .parse_next(input)
}

fn peek<'src>(input: &mut Input<'src>) -> Option<&'src PositionedToken<'src>> {
    let checkpoint = input.checkpoint();
    let token = input.next_token();
    input.reset(&checkpoint);
    token
}

fn error_at(code: ErrorCode, message: impl Into<String>, location: Location) -> Diagnostic {
    Diagnostic::new(code, message).at(location)
}

/// Parse the tag after an already consumed `(`.
fn list_header<'src>(input: &mut Input<'src>, open: Location) -> Result<OpenList, Diagnostic> {
    match tag.parse_next(input) {
        Ok(name) => Ok(OpenList {
            node: Node::new(name),
            open,
        }),
        Err(_) => match peek(input) {
            Some(next) => Err(error_at(
                ErrorCode::E103,
                format!("expected a tag after `(`, found {}", next.token),
                next.location,
            )),
            None => Err(error_at(
                ErrorCode::E101,
                "input ended right after `(`",
                open,
            )),
        },
    }
}

fn unclosed(list: &OpenList) -> Diagnostic {
    error_at(
        ErrorCode::E101,
        format!("unclosed `({}`", list.node.tag()),
        list.open,
    )
    .with_help("add the missing `)`")
}

/// Parse the document's opening `(` and root tag.
fn root_header<'src>(input: &mut Input<'src>) -> Result<OpenList, Diagnostic> {
    if let Ok(location) = open.parse_next(input) {
        return list_header(input, location);
    }

    match peek(input) {
        None => Err(Diagnostic::new(ErrorCode::E101, "empty document").on_line(1)),
        Some(token) if matches!(token.token, Token::Close) => Err(error_at(
            ErrorCode::E100,
            "unmatched `)`",
            token.location,
        )),
        Some(token) => Err(error_at(
            ErrorCode::E100,
            format!("expected `(`, found {}", token.token),
            token.location,
        )),
    }
}

/// Build the tree from a token stream.
///
/// Exactly one root list is accepted. Anything after the root's closing
/// parenthesis is an error.
pub fn build_tree(tokens: &[PositionedToken<'_>]) -> Result<Node, Diagnostic> {
    let mut input = TokenSlice::new(tokens);

    let mut current = root_header(&mut input)?;
    let mut parents: Vec<OpenList> = Vec::new();

    let root = loop {
        if let Ok(value) = atom.parse_next(&mut input) {
            current.node.push(value);
        } else if let Ok(location) = open.parse_next(&mut input) {
            let child = list_header(&mut input, location)?;
            parents.push(std::mem::replace(&mut current, child));
        } else if let Ok(location) = close.parse_next(&mut input) {
            let finished = current.close(location);
            match parents.pop() {
                Some(mut parent) => {
                    parent.node.push(finished);
                    current = parent;
                }
                None => break finished,
            }
        } else {
            return Err(unclosed(&current));
        }
    };

    if let Some(token) = input.next_token() {
        let diagnostic = match token.token {
            Token::Close => error_at(ErrorCode::E100, "unmatched `)`", token.location),
            _ => error_at(
                ErrorCode::E102,
                format!(
                    "unexpected {} after the closing `)` of `({}`",
                    token.token,
                    root.tag()
                ),
                token.location,
            ),
        };
        return Err(diagnostic);
    }

    Ok(root)
}
