use crate::lexer::position::Position;
use std::fmt;

/// Token type for the clone routine language
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // End of file
    Eof,

    // Literals
    Identifier(String),

    // Keywords
    Fn,
    Null,

    // Punctuation
    Arrow,          // ->
    Colon,          // :
    Comma,          // ,
    Dot,            // .
    LeftParen,      // (
    RightParen,     // )
    LeftBrace,      // {
    RightBrace,     // }
}

impl TokenType {
    /// Map an identifier to its keyword, if it is one
    pub fn keyword(ident: &str) -> Option<TokenType> {
        match ident {
            "fn" => Some(TokenType::Fn),
            "null" => Some(TokenType::Null),
            _ => None,
        }
    }
}

/// A token in a clone routine
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of token
    pub token_type: TokenType,
    /// The position in the source text
    pub position: Position,
}

impl Token {
    pub fn new(token_type: TokenType, position: Position) -> Self {
        Self { token_type, position }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Eof => write!(f, "EOF"),
            TokenType::Identifier(s) => write!(f, "Identifier({})", s),
            TokenType::Fn => write!(f, "fn"),
            TokenType::Null => write!(f, "null"),
            TokenType::Arrow => write!(f, "->"),
            TokenType::Colon => write!(f, ":"),
            TokenType::Comma => write!(f, ","),
            TokenType::Dot => write!(f, "."),
            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
            TokenType::LeftBrace => write!(f, "{{"),
            TokenType::RightBrace => write!(f, "}}"),
        }
    }
}
