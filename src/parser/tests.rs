//! Parser tests for the clone routine language

#[cfg(test)]
mod tests {
    use super::super::error::ParseContext;
    use super::super::{ParseError, ParseResult, Parser};
    use crate::ast::*;
    use crate::lexer::TokenType;

    fn parse(input: &str) -> ParseResult<Routine> {
        Parser::new(input)?.parse_routine()
    }

    #[test]
    fn test_minimal_routine() {
        let routine = parse("fn clone_state(src: State) -> State { State { } }").unwrap();
        assert_eq!(routine.name, "clone_state");
        assert_eq!(routine.param, "src");
        assert_eq!(routine.param_kind, "State");
        assert_eq!(routine.return_kind, "State");
        assert_eq!(routine.body.kind, "State");
        assert!(routine.body.fields.is_empty());
    }

    #[test]
    fn test_nested_records_paths_and_null() {
        let source = r#"
            fn clone_address(src: Address) -> Address {
                Address {
                    street: src.street,
                    city: src.city,
                    state: State {
                        name: src.state.name,
                        code: src.state.code,
                    },
                }
            }
        "#;
        let routine = parse(source).unwrap();
        let fields = &routine.body.fields;
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].name, "street");
        match &fields[0].value {
            FieldExpr::Path(path) => assert_eq!(path.to_string(), "src.street"),
            other => panic!("expected path, got {:?}", other),
        }
        match &fields[2].value {
            FieldExpr::Record(state) => {
                assert_eq!(state.kind, "State");
                assert_eq!(state.fields.len(), 2);
            }
            other => panic!("expected record, got {:?}", other),
        }
        assert_eq!(routine.body.node_count(), 2);

        let routine = parse("fn f(src: Address) -> Address { Address { state: null } }").unwrap();
        assert_eq!(routine.body.fields[0].value, FieldExpr::Null);
    }

    #[test]
    fn test_trailing_comma_is_optional() {
        let with = parse("fn f(s: State) -> State { State { name: s.name, } }").unwrap();
        let without = parse("fn f(s: State) -> State { State { name: s.name } }").unwrap();
        assert_eq!(with.body.fields, without.body.fields);
    }

    #[test]
    fn test_missing_colon_reports_context() {
        match parse("fn f(s: State) -> State { State { name s.name } }") {
            Err(ParseError::UnexpectedToken { found, context, .. }) => {
                assert_eq!(found, TokenType::Identifier("s".to_string()));
                assert_eq!(context, ParseContext::FieldInit);
            }
            other => panic!("expected unexpected token, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_routine() {
        assert!(matches!(
            parse("fn f(s: State) -> State { State { name: s.name }"),
            Err(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_trailing_input_rejected() {
        match parse("fn f(s: State) -> State { State { } } fn") {
            Err(ParseError::UnexpectedToken { context, .. }) => {
                assert_eq!(context, ParseContext::TopLevel)
            }
            other => panic!("expected trailing input error, got {:?}", other),
        }
    }

    #[test]
    fn test_lexer_errors_surface() {
        let err = parse("fn f(s: State) -> State { State { name: s.name + 1 } }").unwrap_err();
        assert!(matches!(err, ParseError::Lexer(_)));
        assert_eq!(err.position().line, 1);
    }
}
