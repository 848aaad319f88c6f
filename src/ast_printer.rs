use crate::ast::{LiteralValue, Node, NodeKind};
use crate::scanner::tokenize;
use crate::token::TokenType;

/// Converts a syntax tree back into SIMPL source text.
///
/// Nodes marked as parenthesised are wrapped in `( … )` again; nothing else
/// adds parentheses, so printing a parsed line reproduces its grouping.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(node: &Node) -> String {
        let text: String = Self::print_kind(&node.kind);

        if node.parenthesised {
            format!("({})", text)
        } else {
            text
        }
    }

    /// Source form of a literal: strings are re‑quoted with `""` escapes.
    pub fn print_literal(value: &LiteralValue) -> String {
        match value {
            LiteralValue::Number(n) => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                buf.format(*n).to_string()
            }

            LiteralValue::Str(s) => format!("\"{}\"", s.replace('"', "\"\"")),

            LiteralValue::Bool(b) => b.to_string(),

            LiteralValue::Null => "null".into(),
        }
    }

    fn print_kind(kind: &NodeKind) -> String {
        match kind {
            NodeKind::Identifier { name } => name.clone(),

            NodeKind::Literal { value } => Self::print_literal(value),

            NodeKind::ArrayExpression { elements } => {
                let items: Vec<String> = elements
                    .iter()
                    .map(|e| e.as_ref().map(Self::print).unwrap_or_default())
                    .collect();

                format!("[{}]", items.join(", "))
            }

            NodeKind::FunctionExpression { id, params, body } => {
                let mut s = String::from("function ");
                if let Some(id) = id {
                    s.push_str(id);
                }
                s.push('(');
                s.push_str(&params.join(", "));
                s.push_str(") ");
                s.push_str(&Self::print_block_body(body));
                s
            }

            NodeKind::BlockStatement { body } => format!("do {}end", Self::print_statements(body)),

            NodeKind::ExpressionStatement { expression } => Self::print(expression),

            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            } => format!(
                "{} {} {}",
                Self::print(left),
                operator.as_str(),
                Self::print(right)
            ),

            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            } => format!(
                "{} {} {}",
                Self::print(left),
                operator.as_str(),
                Self::print(right)
            ),

            NodeKind::UnaryExpression { operator, argument } => {
                format!("{}{}", operator.as_str(), Self::print(argument))
            }

            NodeKind::CallExpression { callee, arguments } => {
                let args: Vec<String> = arguments.iter().map(Self::print).collect();

                format!("{}({})", callee, args.join(", "))
            }
        }
    }

    // A function body is a block without the leading `do`.
    fn print_block_body(body: &Node) -> String {
        match &body.kind {
            NodeKind::BlockStatement { body } => format!("{}end", Self::print_statements(body)),
            _ => format!("{} end", Self::print(body)),
        }
    }

    /// Block statements, each followed by a space.
    ///
    /// Statements are only separated by whitespace, so two neighbours that
    /// would read back as one expression get parentheses: a statement
    /// starting with a sign would continue the previous one as a binary
    /// operator, and one starting with `(` would turn a trailing identifier
    /// into a call.
    fn print_statements(body: &[Node]) -> String {
        let mut printed: Vec<String> = body.iter().map(Self::print).collect();

        for i in 1..printed.len() {
            if printed[i].starts_with(['+', '-']) {
                printed[i] = format!("({})", printed[i]);
            }

            let ends_in_name: bool = tokenize(&printed[i - 1])
                .last()
                .is_some_and(|t| t.token_type == TokenType::IDENTIFIER);

            if printed[i].starts_with('(') && ends_in_name {
                printed[i - 1] = format!("({})", printed[i - 1]);
            }
        }

        let mut s = String::new();
        for statement in printed {
            s.push_str(&statement);
            s.push(' ');
        }
        s
    }
}
