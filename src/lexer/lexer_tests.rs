#[cfg(test)]
mod tests {
    use crate::lexer::error::LexerError;
    use crate::lexer::lexer::Lexer;
    use crate::lexer::token::TokenType;

    // Helper function to get all token types from an input
    fn collect_tokens(input: &str) -> Vec<TokenType> {
        match Lexer::new(input).tokenize() {
            Ok(tokens) => tokens.into_iter().map(|t| t.token_type).collect(),
            Err(e) => panic!("Lexer error: {}", e),
        }
    }

    fn ident(name: &str) -> TokenType {
        TokenType::Identifier(name.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(collect_tokens(""), vec![TokenType::Eof]);
        assert_eq!(collect_tokens(" \t\n\r"), vec![TokenType::Eof]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            collect_tokens("(){}:,.->"),
            vec![
                TokenType::LeftParen,
                TokenType::RightParen,
                TokenType::LeftBrace,
                TokenType::RightBrace,
                TokenType::Colon,
                TokenType::Comma,
                TokenType::Dot,
                TokenType::Arrow,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            collect_tokens("fn clone_customer null nullable"),
            vec![
                TokenType::Fn,
                ident("clone_customer"),
                TokenType::Null,
                ident("nullable"),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_signature_line() {
        assert_eq!(
            collect_tokens("fn clone(src: Customer) -> Customer {"),
            vec![
                TokenType::Fn,
                ident("clone"),
                TokenType::LeftParen,
                ident("src"),
                TokenType::Colon,
                ident("Customer"),
                TokenType::RightParen,
                TokenType::Arrow,
                ident("Customer"),
                TokenType::LeftBrace,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_line_comments_are_skipped() {
        let source = "// header\nsrc.city // trailing\n// last";
        assert_eq!(
            collect_tokens(source),
            vec![ident("src"), TokenType::Dot, ident("city"), TokenType::Eof]
        );
    }

    #[test]
    fn test_positions_track_lines() {
        let tokens = Lexer::new("fn\n  clone").tokenize().unwrap();
        assert_eq!(tokens[1].position.line, 2);
        assert_eq!(tokens[1].position.column, 3);
    }

    #[test]
    fn test_invalid_character() {
        match Lexer::new("src + 1").tokenize() {
            Err(LexerError::InvalidCharacter('+', pos)) => assert_eq!(pos.column, 5),
            other => panic!("expected invalid character, got {:?}", other),
        }
    }

    #[test]
    fn test_incomplete_arrow() {
        assert!(matches!(
            Lexer::new("fn f(a: A) - A").tokenize(),
            Err(LexerError::IncompleteArrow(_))
        ));
    }

    #[test]
    fn test_block_comment_rejected() {
        assert!(matches!(
            Lexer::new("/* no */").tokenize(),
            Err(LexerError::UnsupportedComment(_))
        ));
    }
}
