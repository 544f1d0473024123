use crate::lexer::position::Position;
use std::fmt;

/// Errors that can occur while tokenizing a clone routine
#[derive(Debug, Clone, PartialEq)]
pub enum LexerError {
    /// Invalid character encountered
    InvalidCharacter(char, Position),
    /// A `-` not followed by `>`
    IncompleteArrow(Position),
    /// Block comments are not part of the routine language
    UnsupportedComment(Position),
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerError::InvalidCharacter(c, pos) => {
                write!(f, "Invalid character '{}' at {}", c, pos)
            }
            LexerError::IncompleteArrow(pos) => {
                write!(f, "Expected '->' at {}", pos)
            }
            LexerError::UnsupportedComment(pos) => {
                write!(f, "Block comments are not supported (at {})", pos)
            }
        }
    }
}

impl std::error::Error for LexerError {}
