//! Parse errors for clone routines
//!
//! Every variant carries the position it was raised at so compilation
//! failures can point into the synthesized source text.

use crate::lexer::error::LexerError;
use crate::lexer::{Position, TokenType};
use std::fmt;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Where in a routine the parser was when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseContext {
    Signature,
    Record,
    FieldInit,
    Path,
    TopLevel,
}

impl fmt::Display for ParseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseContext::Signature => write!(f, "in routine signature"),
            ParseContext::Record => write!(f, "in record literal"),
            ParseContext::FieldInit => write!(f, "in field initializer"),
            ParseContext::Path => write!(f, "in source path"),
            ParseContext::TopLevel => write!(f, "at top level"),
        }
    }
}

/// Errors raised while parsing a routine
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Unexpected token
    UnexpectedToken {
        expected: String,
        found: TokenType,
        position: Position,
        context: ParseContext,
    },
    /// Input ended early
    UnexpectedEof {
        expected: String,
        position: Position,
        context: ParseContext,
    },
    /// Tokenizing failed
    Lexer(LexerError),
}

impl ParseError {
    /// Position the error points at
    pub fn position(&self) -> Position {
        match self {
            ParseError::UnexpectedToken { position, .. } => *position,
            ParseError::UnexpectedEof { position, .. } => *position,
            ParseError::Lexer(LexerError::InvalidCharacter(_, position))
            | ParseError::Lexer(LexerError::IncompleteArrow(position))
            | ParseError::Lexer(LexerError::UnsupportedComment(position)) => *position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { expected, found, position, context } => write!(
                f,
                "Expected {} but found '{}' at {} {}",
                expected, found, position, context
            ),
            ParseError::UnexpectedEof { expected, position, context } => write!(
                f,
                "Unexpected end of input at {} {}, expected {}",
                position, context, expected
            ),
            ParseError::Lexer(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexerError> for ParseError {
    fn from(err: LexerError) -> Self {
        ParseError::Lexer(err)
    }
}
