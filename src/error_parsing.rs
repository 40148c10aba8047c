//! Lexing and parsing error types.

use crate::token::{Position, TokenKind};
use std::fmt;

/// An error raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character that cannot begin any valid token.
    InvalidChar(char, Position),
    /// A string literal with no closing quote before end-of-line/input.
    UnterminatedString(Position),
    /// A numeric literal that could not be parsed (overflow or malformed).
    BadNumber(String, Position),
    /// A `DEDENT` whose width doesn't match any enclosing indentation level.
    BadIndent(Position),
}

impl LexError {
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::InvalidChar(_, pos)
            | Self::UnterminatedString(pos)
            | Self::BadNumber(_, pos)
            | Self::BadIndent(pos) => *pos,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar(c, pos) => write!(f, "unexpected character '{c}' ({pos})"),
            Self::UnterminatedString(pos) => write!(f, "unterminated string literal ({pos})"),
            Self::BadNumber(text, pos) => write!(f, "invalid numeric literal '{text}' ({pos})"),
            Self::BadIndent(pos) => {
                write!(f, "unindent does not match any outer indentation level ({pos})")
            }
        }
    }
}

impl std::error::Error for LexError {}

/// The kind of a [`ParseError`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    /// Lexing failed outright.
    Lex(LexError),
    /// Found a token where a different, specific token was expected.
    Expected(String, TokenKind),
    /// A primary expression was expected but the token doesn't start one.
    ExpectedExpression(TokenKind),
    /// An assignment target is not a valid lvalue (e.g. `1 + 1 = 2`).
    InvalidAssignmentTarget,
    /// `break`/`continue` outside of any enclosing loop.
    LoopControlOutsideLoop(&'static str),
    /// `super` used outside of a class method body, or in a class with no base.
    InvalidSuper(&'static str),
    /// A required parameter follows an optional/variadic one, or `*args`
    /// comes after `**kwargs`, etc.
    BadParameterOrder,
    /// The same parameter name bound twice in one `def`/`lambda`.
    DuplicateParameter(String),
    /// Reached end of input mid-construct.
    UnexpectedEof,
}

/// A parse-time error, carrying the position at which it was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError(pub ParseErrorType, pub Position);

impl ParseError {
    #[must_use]
    pub fn position(&self) -> Position {
        self.1
    }
    #[must_use]
    pub fn error_type(&self) -> &ParseErrorType {
        &self.0
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let pos = err.position();
        Self(ParseErrorType::Lex(err), pos)
    }
}

impl fmt::Display for ParseErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(err) => write!(f, "{err}"),
            Self::Expected(what, got) => write!(f, "expected {what}, found {got}"),
            Self::ExpectedExpression(got) => write!(f, "expected an expression, found {got}"),
            Self::InvalidAssignmentTarget => write!(f, "invalid assignment target"),
            Self::LoopControlOutsideLoop(kw) => write!(f, "'{kw}' outside loop"),
            Self::InvalidSuper(why) => write!(f, "invalid use of 'super': {why}"),
            Self::BadParameterOrder => write!(
                f,
                "parameters must be ordered: required, then optional, then *args, then **kwargs"
            ),
            Self::DuplicateParameter(name) => write!(f, "duplicate parameter '{name}'"),
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.1)
    }
}

impl std::error::Error for ParseError {}
