#[cfg(test)]
mod scanner_tests {
    use simpl::scanner::*;
    use simpl::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let tokens: Vec<Token<'_>> = tokenize(source);

        assert_eq!(tokens.len(), expected.len(), "tokens: {:?}", tokens);

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    fn lexemes(source: &str) -> Vec<&str> {
        tokenize(source).iter().map(|t| t.lexeme).collect()
    }

    #[test]
    fn test_scanner_01_function_definition() {
        assert_token_sequence(
            "half(x) = x / 2",
            &[
                (TokenType::IDENTIFIER, "half"),
                (TokenType::LEFT_PAREN, "("),
                (TokenType::IDENTIFIER, "x"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::OPERATOR, "="),
                (TokenType::IDENTIFIER, "x"),
                (TokenType::OPERATOR, "/"),
                (TokenType::NUMBER, "2"),
            ],
        );
    }

    #[test]
    fn test_scanner_02_operators_take_a_trailing_equals() {
        assert_eq!(
            lexemes("a += 1 -= *= /= %= == != ! -"),
            ["a", "+=", "1", "-=", "*=", "/=", "%=", "==", "!=", "!", "-"]
        );
    }

    #[test]
    fn test_scanner_03_punctuation() {
        assert_token_sequence(
            "a..b.c[1,2]",
            &[
                (TokenType::IDENTIFIER, "a"),
                (TokenType::DOT_DOT, ".."),
                (TokenType::IDENTIFIER, "b"),
                (TokenType::DOT, "."),
                (TokenType::IDENTIFIER, "c"),
                (TokenType::LEFT_BRACKET, "["),
                (TokenType::NUMBER, "1"),
                (TokenType::COMMA, ","),
                (TokenType::NUMBER, "2"),
                (TokenType::RIGHT_BRACKET, "]"),
            ],
        );
    }

    #[test]
    fn test_scanner_04_keywords() {
        assert_token_sequence(
            "do end function true false done",
            &[
                (TokenType::DO, "do"),
                (TokenType::END, "end"),
                (TokenType::FUNCTION, "function"),
                (TokenType::TRUE, "true"),
                (TokenType::FALSE, "false"),
                (TokenType::IDENTIFIER, "done"),
            ],
        );
    }

    #[test]
    fn test_comments_are_discarded() {
        assert!(tokenize("# just a comment").is_empty());
        assert_eq!(lexemes("x + 1 # add one"), ["x", "+", "1"]);
        assert_eq!(lexemes("do # open\nx\nend"), ["do", "x", "end"]);
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        assert_eq!(lexemes("1 @ $ ; 2 ~ é"), ["1", "2"]);
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn test_digits_then_word() {
        assert_token_sequence(
            "12abc",
            &[(TokenType::NUMBER, "12"), (TokenType::IDENTIFIER, "abc")],
        );
    }

    #[test]
    fn test_doubled_quote_does_not_terminate_string() {
        let tokens = tokenize(r#""Hello, ""world""!" + x"#);

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].token_type, TokenType::STRING);
        assert_eq!(tokens[0].lexeme, r#""Hello, ""world""!""#);
        assert_eq!(tokens[0].string_value(), r#"Hello, "world"!"#);
    }

    #[test]
    fn test_empty_and_quote_only_strings() {
        let tokens = tokenize(r#""" """""#);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].string_value(), "");
        assert_eq!(tokens[1].string_value(), "\"");
    }

    #[test]
    fn test_unterminated_string_drops_the_quote() {
        assert_token_sequence("\"abc", &[(TokenType::IDENTIFIER, "abc")]);
    }

    #[test]
    fn test_string_falls_back_to_last_possible_closer() {
        assert_token_sequence(r#""ab"""#, &[(TokenType::STRING, r#""ab""#)]);
    }

    #[test]
    fn test_token_display() {
        let tokens = tokenize(r#"x "a""b" 7"#);

        assert_eq!(tokens[0].to_string(), "IDENTIFIER x null");
        assert_eq!(tokens[1].to_string(), r#"STRING "a""b" a"b"#);
        assert_eq!(tokens[2].to_string(), "NUMBER 7 7");
    }
}
