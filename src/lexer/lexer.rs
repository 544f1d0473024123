use crate::lexer::error::LexerError;
use crate::lexer::position::Position;
use crate::lexer::token::{Token, TokenType};

/// The Lexer converts clone routine source text into tokens
pub struct Lexer<'a> {
    /// The characters of the input
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    /// The current character
    current_char: Option<char>,
    /// Position tracking for error reporting
    position: Position,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer from routine source text
    pub fn new(input: &'a str) -> Self {
        let mut chars = input.chars().peekable();
        let current_char = chars.next();

        Self {
            chars,
            current_char,
            position: Position::start(),
        }
    }

    /// Advance to the next character
    pub fn advance(&mut self) {
        if let Some(ch) = self.current_char {
            self.position.advance(ch);
            self.current_char = self.chars.next();
        }
    }

    /// Look at the next character without advancing
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Skip whitespace and `//` line comments
    pub fn skip_trivia(&mut self) -> Result<(), LexerError> {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '/' && self.peek() == Some('/') {
                while let Some(ch) = self.current_char {
                    if ch == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else if ch == '/' && self.peek() == Some('*') {
                return Err(LexerError::UnsupportedComment(self.position));
            } else {
                break;
            }
        }
        Ok(())
    }

    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        ident
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_trivia()?;

        let position = self.position;
        let ch = match self.current_char {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenType::Eof, position)),
        };

        if ch.is_alphabetic() || ch == '_' {
            let ident = self.read_identifier();
            let token_type = TokenType::keyword(&ident).unwrap_or(TokenType::Identifier(ident));
            return Ok(Token::new(token_type, position));
        }

        let token_type = match ch {
            ':' => TokenType::Colon,
            ',' => TokenType::Comma,
            '.' => TokenType::Dot,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '{' => TokenType::LeftBrace,
            '}' => TokenType::RightBrace,
            '-' => {
                self.advance();
                if self.current_char != Some('>') {
                    return Err(LexerError::IncompleteArrow(position));
                }
                TokenType::Arrow
            }
            _ => {
                self.advance();
                return Err(LexerError::InvalidCharacter(ch, position));
            }
        };

        self.advance();
        Ok(Token::new(token_type, position))
    }

    /// Tokenize the remaining input, ending with `Eof`
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::Eof);
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}
