//! Syntax tree produced by the [`parser`](crate::parser) for one submitted
//! line.  Trees are built fresh per line and dropped after evaluation, except
//! for closure bodies, which the evaluator moves behind an `Rc`.

use serde::Serialize;

use crate::error::{Result, SimplError};

/// A literal constant that appears directly in the source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LiteralValue {
    Number(i64),
    Str(String),
    Bool(bool),
    Null,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
}

impl UnaryOperator {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "+" => Some(UnaryOperator::Plus),
            "-" => Some(UnaryOperator::Minus),
            "!" => Some(UnaryOperator::Not),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
        }
    }
}

/// Infix arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl BinaryOperator {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Subtract),
            "*" => Some(BinaryOperator::Multiply),
            "/" => Some(BinaryOperator::Divide),
            "%" => Some(BinaryOperator::Remainder),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
        }
    }
}

/// `=` or one of the compound forms `+=`, `-=`, `*=`, `/=`, `%=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignOperator {
    Assign,
    Compound(BinaryOperator),
}

impl AssignOperator {
    /// Does `lexeme` have the shape of an assignment operator (an optional
    /// single character followed by `=`)?
    pub fn matches(lexeme: &str) -> bool {
        lexeme.ends_with('=') && lexeme.len() <= 2
    }

    /// Resolve an operator that [`matches`](Self::matches).  `==` and `!=`
    /// have the right shape but no meaning.
    pub fn from_lexeme(lexeme: &str) -> Result<Self> {
        if lexeme == "=" {
            return Ok(AssignOperator::Assign);
        }

        lexeme
            .strip_suffix('=')
            .and_then(BinaryOperator::from_lexeme)
            .map(AssignOperator::Compound)
            .ok_or_else(|| SimplError::UnimplementedOperator {
                operator: lexeme.to_string(),
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssignOperator::Assign => "=",
            AssignOperator::Compound(BinaryOperator::Add) => "+=",
            AssignOperator::Compound(BinaryOperator::Subtract) => "-=",
            AssignOperator::Compound(BinaryOperator::Multiply) => "*=",
            AssignOperator::Compound(BinaryOperator::Divide) => "/=",
            AssignOperator::Compound(BinaryOperator::Remainder) => "%=",
        }
    }
}

/// One syntax tree node.  `parenthesised` records that the source wrapped the
/// node in `( … )`; it only matters when printing the tree back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub parenthesised: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Identifier {
        name: String,
    },

    Literal {
        value: LiteralValue,
    },

    /// `[a, , b]`: `None` marks an empty slot.
    ArrayExpression {
        elements: Vec<Option<Node>>,
    },

    /// `function name(a, b) … end`.  `body` is always a `BlockStatement`.
    FunctionExpression {
        id: Option<String>,
        params: Vec<String>,
        body: Box<Node>,
    },

    BlockStatement {
        body: Vec<Node>,
    },

    ExpressionStatement {
        expression: Box<Node>,
    },

    /// `left` is an `Identifier` (variable write) or a `CallExpression`
    /// (function definition).
    AssignmentExpression {
        operator: AssignOperator,
        left: Box<Node>,
        right: Box<Node>,
    },

    BinaryExpression {
        operator: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },

    UnaryExpression {
        operator: UnaryOperator,
        argument: Box<Node>,
    },

    CallExpression {
        callee: String,
        arguments: Vec<Node>,
    },
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parenthesised: false,
        }
    }

    pub fn identifier<S: Into<String>>(name: S) -> Self {
        Node::new(NodeKind::Identifier { name: name.into() })
    }

    pub fn literal(value: LiteralValue) -> Self {
        Node::new(NodeKind::Literal { value })
    }

    /// Tag name of the node, as used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::ArrayExpression { .. } => "ArrayExpression",
            NodeKind::FunctionExpression { .. } => "FunctionExpression",
            NodeKind::BlockStatement { .. } => "BlockStatement",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::AssignmentExpression { .. } => "AssignmentExpression",
            NodeKind::BinaryExpression { .. } => "BinaryExpression",
            NodeKind::UnaryExpression { .. } => "UnaryExpression",
            NodeKind::CallExpression { .. } => "CallExpression",
        }
    }
}
