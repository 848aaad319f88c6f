use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::ast::{LiteralValue, Node};
use crate::environment::Scope;
use crate::error::{Result, SimplError};
use crate::interpreter::Interpreter;

/// Signature shared by every built‑in.  Built‑ins get the interpreter so they
/// can raise host signals (see [`crate::builtins::Signal`]).
pub type NativeFn = fn(&mut Interpreter, &[Value]) -> Result<Value>;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Number(i64),
    String(String),
    Bool(bool),
    Null,
    NativeFunction { name: &'static str, func: NativeFn },
    Closure(Rc<Closure>),
}

/// A user‑defined function: the scope it was defined in, its parameter
/// names and its body.
///
/// The defining scope is held weakly, so scopes never form reference
/// cycles.  A call frame ends when its call returns; a closure defined in it
/// can no longer be called after that.
pub struct Closure {
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<Node>,
    pub scope: Weak<RefCell<Scope>>,
}

impl Closure {
    /// Presentation name, e.g. `half(x)`.
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.params.join(", "))
    }
}

impl fmt::Debug for Closure {
    // The captured scope may hold this very closure, so it is not printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Closure({})", self.signature())
    }
}

impl Value {
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::NativeFunction { .. } | Value::Closure(_))
    }

    /// `false`, `null`, `0` and `""` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Null => false,
            Value::Number(n) => *n != 0,
            Value::String(s) => !s.is_empty(),
            Value::NativeFunction { .. } | Value::Closure(_) => true,
        }
    }

    /// Numeric reading of the value, used by every arithmetic operator.
    pub fn to_number(&self) -> Result<i64> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Null => Ok(0),
            Value::String(s) if s.trim().is_empty() => Ok(0),
            Value::String(s) => s.trim().parse().map_err(|_| SimplError::NotANumber {
                value: format!("\"{}\"", s),
            }),
            Value::NativeFunction { .. } | Value::Closure(_) => Err(SimplError::NotANumber {
                value: self.to_string(),
            }),
        }
    }
}

impl From<LiteralValue> for Value {
    fn from(literal: LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => Value::Number(n),
            LiteralValue::Str(s) => Value::String(s),
            LiteralValue::Bool(b) => Value::Bool(b),
            LiteralValue::Null => Value::Null,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::NativeFunction { name: a, .. }, Value::NativeFunction { name: b, .. }) => {
                a == b
            }
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Null => write!(f, "Null"),
            Value::NativeFunction { name, .. } => write!(f, "NativeFunction({})", name),
            Value::Closure(closure) => write!(f, "{:?}", closure),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }

            Value::String(s) => f.write_str(s),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Null => f.write_str("null"),

            Value::NativeFunction { name, .. } => write!(f, "<native fn {}>", name),

            Value::Closure(closure) => f.write_str(&closure.signature()),
        }
    }
}
