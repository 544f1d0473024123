//! Recursive-descent parser for clone routines
//!
//! Grammar:
//!
//! ```text
//! routine := "fn" IDENT "(" IDENT ":" IDENT ")" "->" IDENT "{" record "}"
//! record  := IDENT "{" (init ("," init)* ","?)? "}"
//! init    := IDENT ":" expr
//! expr    := "null" | record | path
//! path    := IDENT ("." IDENT)*
//! ```

use super::error::{ParseContext, ParseError, ParseResult};
use crate::ast::*;
use crate::lexer::{Lexer, Position, Token, TokenType};

/// The main parser struct that converts tokens to a routine AST
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser from routine source text
    pub fn new(input: &'a str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token()?;
        Ok(Parser { lexer, current_token })
    }

    /// Advance to the next token
    fn advance(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current_token, next))
    }

    /// Check if current token matches the expected type
    fn check(&self, token_type: &TokenType) -> bool {
        std::mem::discriminant(&self.current_token.token_type) == std::mem::discriminant(token_type)
    }

    fn error(&self, expected: &str, context: ParseContext) -> ParseError {
        match &self.current_token.token_type {
            TokenType::Eof => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                position: self.current_token.position,
                context,
            },
            found => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: found.clone(),
                position: self.current_token.position,
                context,
            },
        }
    }

    /// Expect a specific token type and consume it, or return an error
    fn expect(&mut self, expected: TokenType, context: ParseContext) -> ParseResult<Token> {
        if self.check(&expected) {
            self.advance()
        } else {
            Err(self.error(&format!("'{}'", expected), context))
        }
    }

    fn expect_identifier(&mut self, context: ParseContext) -> ParseResult<(String, Position)> {
        if let TokenType::Identifier(name) = &self.current_token.token_type {
            let name = name.clone();
            let position = self.current_token.position;
            self.advance()?;
            Ok((name, position))
        } else {
            Err(self.error("identifier", context))
        }
    }

    /// Parse a complete routine; nothing may follow it
    pub fn parse_routine(&mut self) -> ParseResult<Routine> {
        let position = self.current_token.position;
        self.expect(TokenType::Fn, ParseContext::Signature)?;
        let (name, _) = self.expect_identifier(ParseContext::Signature)?;

        self.expect(TokenType::LeftParen, ParseContext::Signature)?;
        let (param, _) = self.expect_identifier(ParseContext::Signature)?;
        self.expect(TokenType::Colon, ParseContext::Signature)?;
        let (param_kind, _) = self.expect_identifier(ParseContext::Signature)?;
        self.expect(TokenType::RightParen, ParseContext::Signature)?;

        self.expect(TokenType::Arrow, ParseContext::Signature)?;
        let (return_kind, _) = self.expect_identifier(ParseContext::Signature)?;

        self.expect(TokenType::LeftBrace, ParseContext::Signature)?;
        let body = self.parse_record()?;
        self.expect(TokenType::RightBrace, ParseContext::Signature)?;

        if !self.check(&TokenType::Eof) {
            return Err(self.error("end of input", ParseContext::TopLevel));
        }

        Ok(Routine {
            name,
            param,
            param_kind,
            return_kind,
            body,
            position,
        })
    }

    /// Parse `Kind { field: expr, ... }`
    pub fn parse_record(&mut self) -> ParseResult<Record> {
        let (kind, position) = self.expect_identifier(ParseContext::Record)?;
        self.parse_record_body(kind, position)
    }

    fn parse_record_body(&mut self, kind: String, position: Position) -> ParseResult<Record> {
        self.expect(TokenType::LeftBrace, ParseContext::Record)?;

        let mut fields = Vec::new();
        while !self.check(&TokenType::RightBrace) {
            fields.push(self.parse_field_init()?);
            if !self.check(&TokenType::Comma) {
                break;
            }
            self.advance()?;
        }

        self.expect(TokenType::RightBrace, ParseContext::Record)?;
        Ok(Record { kind, fields, position })
    }

    fn parse_field_init(&mut self) -> ParseResult<FieldInit> {
        let (name, position) = self.expect_identifier(ParseContext::FieldInit)?;
        self.expect(TokenType::Colon, ParseContext::FieldInit)?;
        let value = self.parse_field_expr()?;
        Ok(FieldInit { name, value, position })
    }

    fn parse_field_expr(&mut self) -> ParseResult<FieldExpr> {
        if self.check(&TokenType::Null) {
            self.advance()?;
            return Ok(FieldExpr::Null);
        }

        let (head, position) = self.expect_identifier(ParseContext::FieldInit)?;
        if self.check(&TokenType::LeftBrace) {
            return Ok(FieldExpr::Record(self.parse_record_body(head, position)?));
        }

        let mut segments = Vec::new();
        while self.check(&TokenType::Dot) {
            self.advance()?;
            let (segment, _) = self.expect_identifier(ParseContext::Path)?;
            segments.push(segment);
        }

        Ok(FieldExpr::Path(Path {
            root: head,
            segments,
            position,
        }))
    }
}
