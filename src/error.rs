//! Centralised error hierarchy for the **SIMPL interpreter**.
//!
//! The scanner, parser, evaluator and built-ins all report failures through
//! [`SimplError`].  Every error is fatal to the *current submitted line only*:
//! the terminal catches it at the line boundary and prints the message into
//! scrollback, so the session carries on.
//!
//! The module **does not** print diagnostics itself.

use log::info;
use thiserror::Error;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SimplError {
    /// Malformed syntax: a wrong or missing token.
    #[error("{message}")]
    Parse { message: String },

    /// The input ended inside an open `do` / `function` block.  The terminal
    /// treats this as "keep reading lines", everything else treats it as a
    /// parse error.
    #[error("{message}")]
    Incomplete { message: String },

    /// A token (or parameter) that cannot be used as a name.
    #[error("\"{text}\" is not a valid identifier")]
    InvalidIdentifier { text: String },

    /// A call whose callee does not currently hold a callable.
    #[error("{name} is not a function.")]
    NotAFunction { name: String },

    /// Assignment whose left side is neither a name nor a call pattern.
    #[error("Can't assign to a {target}")]
    InvalidAssignment { target: &'static str },

    /// `f(x) += …` has no meaning.
    #[error("Can't use \"{operator}\" to define a function")]
    CompoundDefinition { operator: String },

    #[error("Unimplemented operator: {operator}")]
    UnimplementedOperator { operator: String },

    #[error("Unimplemented evaluator: {node}")]
    UnimplementedEvaluator { node: &'static str },

    /// Arithmetic on a value with no numeric reading.
    #[error("{value} is not a number")]
    NotANumber { value: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow")]
    Overflow,

    #[error("Maximum call depth of {limit} exceeded")]
    CallDepth { limit: usize },

    /// A closure called after the call frame it was defined in returned.
    #[error("{name} outlived the call that defined it")]
    ExpiredClosure { name: String },

    /// A built-in called without a required argument.
    #[error("{function} expects an argument")]
    MissingArgument { function: &'static str },
}

impl SimplError {
    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: msg={}", message);

        SimplError::Parse { message }
    }

    /// Helper constructor for an unterminated block.
    pub fn incomplete<S: Into<String>>(msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Incomplete error: msg={}", message);

        SimplError::Incomplete { message }
    }

    /// `true` when more input could still complete the statement.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, SimplError::Incomplete { .. })
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, SimplError>;
