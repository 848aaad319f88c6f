/*!
Recursive‑descent parser for one SIMPL statement.

Grammar (EBNF, loosest binding first)
-------------------------------------

```text
statement      → "do" block | expression ;
block          → statement* "end" ;
expression     → array | function | assignment ;
array          → "[" ( expression | <empty> ) ( "," ( expression | <empty> ) )* "]" ;
function       → "function" IDENT? "(" ( IDENT ( "," IDENT )* )? ")" block ;
assignment     → binary ( ASSIGN_OP expression )? ;
binary         → term ;
term           → factor ( ( "+" | "-" ) factor )* ;
factor         → unary ( ( "*" | "/" | "%" ) unary )* ;
unary          → ( "+" | "-" | "!" ) unary | literal ;
literal        → NUMBER | STRING | "true" | "false"
               | "(" expression ")" | "do" block | call | IDENT ;
call           → IDENT "(" ( expression ( "," expression )* )? ")" ;
ASSIGN_OP      → one optional character followed by "=" ;
```

The binary levels are driven by the [`PRECEDENCES`] table (precedence
climbing, left associative).  Tokens are consumed strictly front to back and
there is no error recovery: the first violated expectation aborts the line.

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `parse`                      | `info` | Lifecycle milestones.                     |
| `statement`, `block`         | `debug`| High‑level descent into grammar branches. |
*/

use crate::ast::{AssignOperator, BinaryOperator, LiteralValue, Node, NodeKind, UnaryOperator};
use crate::error::{Result, SimplError};
use crate::scanner::tokenize;
use crate::token::{Token, TokenType};

use log::{debug, info};

/// Binary operator levels, loosest first.
const PRECEDENCES: [&[&str]; 2] = [&["+", "-"], &["*", "/", "%"]];

/// Parse one submitted line.  `Ok(None)` means the line held no tokens
/// (blank or comment only).
pub fn parse(text: &str) -> Result<Option<Node>> {
    let tokens: Vec<Token<'_>> = tokenize(text);

    if tokens.is_empty() {
        debug!("Nothing to parse");

        return Ok(None);
    }

    let mut parser = Parser::new(tokens);
    let statement: Node = parser.statement()?;

    if let Some(extra) = parser.peek() {
        return Err(SimplError::parse(format!("Unexpected \"{}\"", extra.lexeme)));
    }

    info!("Parsed {} statement", statement.type_name());

    Ok(Some(statement))
}

/// Parser over the token sequence of one submission.
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    current: usize,
    open_blocks: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        debug!("Parser created with {} tokens", tokens.len());

        Self {
            tokens,
            current: 0,
            open_blocks: 0,
        }
    }

    // ───────────────────────── statement rules ────────────────────

    pub fn statement(&mut self) -> Result<Node> {
        if self.matches(TokenType::DO) {
            debug!("Entering do block");

            return self.block_statement();
        }

        self.expression_statement()
    }

    fn expression_statement(&mut self) -> Result<Node> {
        let expression: Node = self.expression()?;

        Ok(Node::new(NodeKind::ExpressionStatement {
            expression: Box::new(expression),
        }))
    }

    /// Statements up to and including the closing `end`.
    fn block_statement(&mut self) -> Result<Node> {
        self.open_blocks += 1;

        let mut body: Vec<Node> = Vec::new();

        loop {
            match self.peek().map(|t| t.token_type) {
                None => return Err(SimplError::incomplete("Expected \"end\"")),

                Some(TokenType::END) => {
                    self.advance();
                    break;
                }

                Some(_) => body.push(self.statement()?),
            }
        }

        self.open_blocks -= 1;

        debug!("Closed block with {} statements", body.len());

        Ok(Node::new(NodeKind::BlockStatement { body }))
    }

    // ───────────────────────── expression rules ───────────────────

    pub fn expression(&mut self) -> Result<Node> {
        match self.peek().map(|t| t.token_type) {
            Some(TokenType::LEFT_BRACKET) => self.array_expression(),
            Some(TokenType::FUNCTION) => self.function_expression(),
            _ => self.assignment_expression(),
        }
    }

    fn array_expression(&mut self) -> Result<Node> {
        self.consume(TokenType::LEFT_BRACKET, "Expected \"[\"")?;

        let mut elements: Vec<Option<Node>> = Vec::new();

        loop {
            match self.peek().map(|t| t.token_type) {
                None => return Err(self.missing("Unclosed array expression")),

                Some(TokenType::RIGHT_BRACKET) => {
                    self.advance();
                    break;
                }

                Some(TokenType::COMMA) => {
                    self.advance();
                    elements.push(None);
                }

                Some(_) => {
                    elements.push(Some(self.expression()?));

                    match self.peek().map(|t| t.token_type) {
                        Some(TokenType::COMMA) => {
                            self.advance();
                        }
                        Some(TokenType::RIGHT_BRACKET) => {}
                        None => return Err(self.missing("Unclosed array expression")),
                        Some(_) => {
                            return Err(SimplError::parse(
                                "Expected \",\" or \"]\" in array expression.",
                            ))
                        }
                    }
                }
            }
        }

        Ok(Node::new(NodeKind::ArrayExpression { elements }))
    }

    fn function_expression(&mut self) -> Result<Node> {
        self.consume(TokenType::FUNCTION, "Expected \"function\" keyword")?;

        let id: Option<String> = if self.check(TokenType::LEFT_PAREN) {
            None
        } else {
            Some(self.identifier()?)
        };

        self.consume(TokenType::LEFT_PAREN, "Expected \"(\"")?;

        let mut params: Vec<String> = Vec::new();

        while !self.check(TokenType::RIGHT_PAREN) {
            params.push(self.identifier()?);

            if !self.check(TokenType::RIGHT_PAREN) {
                self.consume(TokenType::COMMA, "Expected \",\"")?;
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "Expected \")\"")?;

        let body: Node = self.block_statement()?;

        Ok(Node::new(NodeKind::FunctionExpression {
            id,
            params,
            body: Box::new(body),
        }))
    }

    fn assignment_expression(&mut self) -> Result<Node> {
        let left: Node = self.binary_expression(0)?;

        let lexeme: &str = match self.peek() {
            Some(token)
                if token.token_type == TokenType::OPERATOR
                    && AssignOperator::matches(token.lexeme) =>
            {
                token.lexeme
            }
            _ => return Ok(left),
        };

        let operator: AssignOperator = AssignOperator::from_lexeme(lexeme)?;
        self.advance();

        match left.kind {
            NodeKind::Identifier { .. } | NodeKind::CallExpression { .. } => {}
            _ => {
                return Err(SimplError::InvalidAssignment {
                    target: left.type_name(),
                })
            }
        }

        let right: Node = self.expression()?;

        Ok(Node::new(NodeKind::AssignmentExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    /// Precedence climbing over [`PRECEDENCES`], starting at `level`.
    fn binary_expression(&mut self, level: usize) -> Result<Node> {
        let Some(operators) = PRECEDENCES.get(level) else {
            return self.unary_expression();
        };

        let mut left: Node = self.binary_expression(level + 1)?;

        while let Some(operator) = self.peek_operator(operators) {
            self.advance();

            let right: Node = self.binary_expression(level + 1)?;

            left = Node::new(NodeKind::BinaryExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn unary_expression(&mut self) -> Result<Node> {
        let operator: Option<UnaryOperator> = self
            .peek()
            .filter(|t| t.token_type == TokenType::OPERATOR)
            .and_then(|t| UnaryOperator::from_lexeme(t.lexeme));

        if let Some(operator) = operator {
            self.advance();

            let argument: Node = self.unary_expression()?;

            return Ok(Node::new(NodeKind::UnaryExpression {
                operator,
                argument: Box::new(argument),
            }));
        }

        self.literal()
    }

    fn literal(&mut self) -> Result<Node> {
        let token: Token<'a> = self
            .peek()
            .copied()
            .ok_or_else(|| self.missing("Unexpected end of input"))?;

        match token.token_type {
            TokenType::NUMBER => {
                self.advance();

                let n: i64 = token.lexeme.parse().map_err(|_| {
                    SimplError::parse(format!("\"{}\" is not a valid number", token.lexeme))
                })?;

                Ok(Node::literal(LiteralValue::Number(n)))
            }

            TokenType::STRING => {
                self.advance();

                Ok(Node::literal(LiteralValue::Str(
                    token.string_value().into_owned(),
                )))
            }

            TokenType::TRUE | TokenType::FALSE => {
                self.advance();

                Ok(Node::literal(LiteralValue::Bool(
                    token.token_type == TokenType::TRUE,
                )))
            }

            TokenType::LEFT_PAREN => {
                self.advance();

                let mut expr: Node = self.expression()?;

                self.consume(TokenType::RIGHT_PAREN, "Expected \")\"")?;
                expr.parenthesised = true;

                Ok(expr)
            }

            TokenType::DO => {
                self.advance();

                self.block_statement()
            }

            _ if self.peek_at(1).map(|t| t.token_type) == Some(TokenType::LEFT_PAREN) => {
                self.call_expression()
            }

            _ => {
                let name: String = self.identifier()?;

                Ok(Node::identifier(name))
            }
        }
    }

    fn call_expression(&mut self) -> Result<Node> {
        let callee: String = self.identifier()?;

        self.consume(TokenType::LEFT_PAREN, "Expected \"(\"")?;

        let mut arguments: Vec<Node> = Vec::new();

        while !self.check(TokenType::RIGHT_PAREN) {
            if self.is_at_end() {
                return Err(self.missing("Unexpected end of input"));
            }

            arguments.push(self.expression()?);

            if !self.check(TokenType::RIGHT_PAREN) {
                self.consume(TokenType::COMMA, "Expected \",\"")?;
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "Unexpected end of input")?;

        Ok(Node::new(NodeKind::CallExpression { callee, arguments }))
    }

    fn identifier(&mut self) -> Result<String> {
        match self.peek() {
            Some(token) if token.token_type == TokenType::IDENTIFIER => {
                let name: String = token.lexeme.to_string();
                self.advance();

                Ok(name)
            }

            Some(token) => Err(SimplError::InvalidIdentifier {
                text: token.lexeme.to_string(),
            }),

            None => Err(self.missing("Unexpected end of input")),
        }
    }

    // ────────────────────── utility helpers ───────────────────────

    /// Error for input that ran out where `message` was expected.  Inside an
    /// open block more lines may still arrive, so that case is `Incomplete`.
    fn missing(&self, message: &str) -> SimplError {
        if self.open_blocks > 0 {
            SimplError::incomplete(message)
        } else {
            SimplError::parse(message)
        }
    }

    fn peek_operator(&self, operators: &[&str]) -> Option<BinaryOperator> {
        self.peek()
            .filter(|t| t.token_type == TokenType::OPERATOR && operators.contains(&t.lexeme))
            .and_then(|t| BinaryOperator::from_lexeme(t.lexeme))
    }

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn consume(&mut self, ttype: TokenType, message: &str) -> Result<Token<'a>> {
        match self.peek().copied() {
            Some(token) if token.token_type == ttype => {
                self.advance();

                Ok(token)
            }

            Some(_) => Err(SimplError::parse(message)),

            None => Err(self.missing(message)),
        }
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        self.peek().is_some_and(|t| t.token_type == ttype)
    }

    #[inline(always)]
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    #[inline(always)]
    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.current)
    }

    #[inline(always)]
    fn peek_at(&self, offset: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.current + offset)
    }
}
