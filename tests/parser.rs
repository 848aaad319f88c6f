#[cfg(test)]
mod parser_tests {
    use simpl::ast::*;
    use simpl::ast_printer::AstPrinter;
    use simpl::error::SimplError;
    use simpl::parser::parse;

    fn statement(source: &str) -> Node {
        parse(source)
            .unwrap_or_else(|e| panic!("{:?} failed to parse: {}", source, e))
            .unwrap_or_else(|| panic!("{:?} parsed to nothing", source))
    }

    /// The expression wrapped by an `ExpressionStatement`.
    fn expression(source: &str) -> Node {
        match statement(source).kind {
            NodeKind::ExpressionStatement { expression } => *expression,
            other => panic!("expected an expression statement, got {:?}", other),
        }
    }

    fn number(n: i64) -> Node {
        Node::literal(LiteralValue::Number(n))
    }

    fn binary(operator: BinaryOperator, left: Node, right: Node) -> Node {
        Node::new(NodeKind::BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    #[test]
    fn test_blank_and_comment_lines_parse_to_nothing() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("    "), Ok(None));
        assert_eq!(parse("# This is a comment"), Ok(None));
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        assert_eq!(
            expression("2 + 3 * 4"),
            binary(
                BinaryOperator::Add,
                number(2),
                binary(BinaryOperator::Multiply, number(3), number(4))
            )
        );
    }

    #[test]
    fn test_binary_operators_are_left_associative() {
        assert_eq!(
            expression("10 - 4 - 3"),
            binary(
                BinaryOperator::Subtract,
                binary(BinaryOperator::Subtract, number(10), number(4)),
                number(3)
            )
        );
    }

    #[test]
    fn test_parentheses_mark_the_node() {
        let node = expression("(2 + 3) * 4");

        let NodeKind::BinaryExpression { operator, left, .. } = node.kind else {
            panic!("expected a binary expression");
        };

        assert_eq!(operator, BinaryOperator::Multiply);
        assert!(left.parenthesised);
        assert!(matches!(left.kind, NodeKind::BinaryExpression { .. }));
    }

    #[test]
    fn test_unary_prefixes_nest() {
        let node = expression("- -x");

        let NodeKind::UnaryExpression { operator, argument } = node.kind else {
            panic!("expected a unary expression");
        };

        assert_eq!(operator, UnaryOperator::Minus);
        assert!(matches!(
            argument.kind,
            NodeKind::UnaryExpression {
                operator: UnaryOperator::Minus,
                ..
            }
        ));
    }

    #[test]
    fn test_literals() {
        assert_eq!(expression("42"), number(42));
        assert_eq!(expression("true"), Node::literal(LiteralValue::Bool(true)));
        assert_eq!(expression("false"), Node::literal(LiteralValue::Bool(false)));
        assert_eq!(
            expression(r#""Hello, ""world""!""#),
            Node::literal(LiteralValue::Str(r#"Hello, "world"!"#.to_string()))
        );
    }

    #[test]
    fn test_call_expression() {
        assert_eq!(
            expression("max(1, x)"),
            Node::new(NodeKind::CallExpression {
                callee: "max".to_string(),
                arguments: vec![number(1), Node::identifier("x")],
            })
        );

        assert_eq!(
            expression("cls()"),
            Node::new(NodeKind::CallExpression {
                callee: "cls".to_string(),
                arguments: vec![],
            })
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let node = expression("a = b += 2");

        let NodeKind::AssignmentExpression {
            operator,
            left,
            right,
        } = node.kind
        else {
            panic!("expected an assignment");
        };

        assert_eq!(operator, AssignOperator::Assign);
        assert_eq!(*left, Node::identifier("a"));
        assert!(matches!(
            right.kind,
            NodeKind::AssignmentExpression {
                operator: AssignOperator::Compound(BinaryOperator::Add),
                ..
            }
        ));
    }

    #[test]
    fn test_assignment_to_call_pattern() {
        let node = expression("half(x) = x / 2");

        let NodeKind::AssignmentExpression { left, right, .. } = node.kind else {
            panic!("expected an assignment");
        };

        assert!(matches!(left.kind, NodeKind::CallExpression { .. }));
        assert_eq!(
            *right,
            binary(BinaryOperator::Divide, Node::identifier("x"), number(2))
        );
    }

    #[test]
    fn test_do_block_collects_statements_until_end() {
        let node = statement("do x = 1 y = x + 1 end");

        let NodeKind::BlockStatement { body } = node.kind else {
            panic!("expected a block");
        };

        assert_eq!(body.len(), 2);
        assert!(body
            .iter()
            .all(|s| matches!(s.kind, NodeKind::ExpressionStatement { .. })));
    }

    #[test]
    fn test_do_block_as_function_body() {
        let node = expression("triplePlusOne(x) = do\n x *= 3\n x + 1\nend");

        let NodeKind::AssignmentExpression { right, .. } = node.kind else {
            panic!("expected an assignment");
        };

        assert!(matches!(right.kind, NodeKind::BlockStatement { ref body } if body.len() == 2));
    }

    #[test]
    fn test_unterminated_block_is_incomplete() {
        assert!(parse("do x = 1").unwrap_err().is_incomplete());
        assert!(parse("f(x) = do").unwrap_err().is_incomplete());
        assert!(parse("do f(1,").unwrap_err().is_incomplete());
        assert!(!parse("f(1,").unwrap_err().is_incomplete());
    }

    #[test]
    fn test_function_expression() {
        let node = expression("function add(a, b) a + b end");

        let NodeKind::FunctionExpression { id, params, body } = node.kind else {
            panic!("expected a function expression");
        };

        assert_eq!(id.as_deref(), Some("add"));
        assert_eq!(params, ["a", "b"]);
        assert!(matches!(body.kind, NodeKind::BlockStatement { ref body } if body.len() == 1));
    }

    #[test]
    fn test_array_expression_with_empty_slot() {
        let node = expression("[1, , 2]");

        assert_eq!(
            node.kind,
            NodeKind::ArrayExpression {
                elements: vec![Some(number(1)), None, Some(number(2))],
            }
        );
    }

    #[test]
    fn test_unclosed_array_is_an_error() {
        assert_eq!(
            parse("[1, 2"),
            Err(SimplError::parse("Unclosed array expression"))
        );
    }

    #[test]
    fn test_call_errors() {
        assert!(matches!(parse("f(1 2)"), Err(SimplError::Parse { .. })));
        assert!(matches!(parse("f(1, 2"), Err(SimplError::Parse { .. })));
        assert!(matches!(parse("f("), Err(SimplError::Parse { .. })));
    }

    #[test]
    fn test_invalid_identifiers() {
        assert_eq!(
            parse(")"),
            Err(SimplError::InvalidIdentifier {
                text: ")".to_string()
            })
        );
        assert_eq!(
            parse("end"),
            Err(SimplError::InvalidIdentifier {
                text: "end".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_assignment_target() {
        assert_eq!(
            parse("3 = 4"),
            Err(SimplError::InvalidAssignment { target: "Literal" })
        );
        assert_eq!(
            parse("a + b = 4"),
            Err(SimplError::InvalidAssignment {
                target: "BinaryExpression"
            })
        );
    }

    #[test]
    fn test_comparison_shaped_operators_are_unimplemented() {
        assert_eq!(
            parse("x == 3"),
            Err(SimplError::UnimplementedOperator {
                operator: "==".to_string()
            })
        );
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        assert_eq!(parse("1 2"), Err(SimplError::parse("Unexpected \"2\"")));
        assert_eq!(parse("x end"), Err(SimplError::parse("Unexpected \"end\"")));
    }

    #[test]
    fn test_oversized_number_literal() {
        assert!(matches!(
            parse("99999999999999999999"),
            Err(SimplError::Parse { .. })
        ));
    }

    #[test]
    fn test_printer_reproduces_source() {
        for source in [
            "x = 3",
            "half(x) = x / 2",
            "(2 + 3) * 4",
            "-x",
            "x %= (y - 1)",
            r#""Hello, ""world""!""#,
            "do x *= 3 x + 1 end",
            "function add(a, b) a + b end",
            "[1, , 2]",
        ] {
            assert_eq!(AstPrinter::print(&statement(source)), source);
        }
    }

    fn block(statements: Vec<Node>) -> Node {
        let body: Vec<Node> = statements
            .into_iter()
            .map(|expression| {
                Node::new(NodeKind::ExpressionStatement {
                    expression: Box::new(expression),
                })
            })
            .collect();

        Node::new(NodeKind::BlockStatement { body })
    }

    fn negative(n: i64) -> Node {
        Node::new(NodeKind::UnaryExpression {
            operator: UnaryOperator::Minus,
            argument: Box::new(number(n)),
        })
    }

    fn block_length(source: &str) -> usize {
        match statement(source).kind {
            NodeKind::BlockStatement { body } => body.len(),
            other => panic!("expected a block, got {:?}", other),
        }
    }

    #[test]
    fn test_printed_block_keeps_signed_statements_apart() {
        let printed = AstPrinter::print(&block(vec![negative(1), negative(2)]));

        assert_eq!(printed, "do -1 (-2) end");
        assert_eq!(block_length(&printed), 2);
    }

    #[test]
    fn test_printed_block_keeps_name_and_group_apart() {
        let mut group = number(1);
        group.parenthesised = true;

        let printed = AstPrinter::print(&block(vec![Node::identifier("x"), group]));

        assert_eq!(printed, "do (x) (1) end");
        assert_eq!(block_length(&printed), 2);
    }

    #[test]
    fn test_printed_function_body_keeps_statements_apart() {
        let printed = AstPrinter::print(&Node::new(NodeKind::FunctionExpression {
            id: None,
            params: vec!["x".to_string()],
            body: Box::new(block(vec![Node::identifier("x"), negative(1)])),
        }));

        assert_eq!(printed, "function (x) (x) (-1) end");
        assert_eq!(AstPrinter::print(&expression(&printed)), printed);
    }

    #[test]
    fn test_printed_literals_reparse_to_equal_literals() {
        for value in [
            LiteralValue::Number(42),
            LiteralValue::Number(0),
            LiteralValue::Str("say \"hi\"".to_string()),
            LiteralValue::Str(String::new()),
            LiteralValue::Bool(true),
            LiteralValue::Bool(false),
        ] {
            let printed = AstPrinter::print_literal(&value);

            assert_eq!(expression(&printed), Node::literal(value));
        }
    }
}
