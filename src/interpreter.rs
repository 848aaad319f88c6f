use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{AssignOperator, BinaryOperator, Node, NodeKind, UnaryOperator};
use crate::ast_printer::AstPrinter;
use crate::builtins::Signal;
use crate::environment::Scope;
use crate::error::{Result, SimplError};
use crate::parser::parse;
use crate::value::{Closure, Value};

/// Nested user calls allowed before a line is aborted.  The language has no
/// conditionals, so any recursion is unbounded.
pub const MAX_CALL_DEPTH: usize = 256;

/// Tree‑walking evaluator for one REPL session.
///
/// `bindings` is the session's outermost scope; its parent is the built‑ins
/// table.  It lives as long as the interpreter.
pub struct Interpreter {
    bindings: Rc<RefCell<Scope>>,
    signals: Vec<Signal>,
    depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        info!("Initializing Interpreter");

        Self {
            bindings: Rc::new(RefCell::new(Scope::new())),
            signals: Vec::new(),
            depth: 0,
        }
    }

    /// Parse and evaluate one submission.  `Ok(None)` means the text held no
    /// statement (blank or comment only).
    pub fn interpret(&mut self, code: &str) -> Result<Option<Value>> {
        info!("Interpreting {:?}", code);

        let Some(ast) = parse(code)? else {
            return Ok(None);
        };

        let bindings: Rc<RefCell<Scope>> = self.bindings.clone();
        self.depth = 0;

        let value: Value = self.evaluate(&ast, &bindings)?;

        info!("Submission evaluated to: {}", value);

        Ok(Some(value))
    }

    pub fn bindings(&self) -> &Rc<RefCell<Scope>> {
        &self.bindings
    }

    /// Queue a request for the host.
    pub fn raise(&mut self, signal: Signal) {
        debug!("Raising signal {:?}", signal);

        self.signals.push(signal);
    }

    /// Drain the queued host requests.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    /// Evaluate `node` against `scope`.
    pub fn evaluate(&mut self, node: &Node, scope: &Rc<RefCell<Scope>>) -> Result<Value> {
        debug!("Evaluating {}", node.type_name());

        match &node.kind {
            NodeKind::Literal { value } => Ok(Value::from(value.clone())),

            NodeKind::Identifier { name } => Ok(scope.borrow().get(name)),

            NodeKind::ExpressionStatement { expression } => self.evaluate(expression, scope),

            NodeKind::BlockStatement { body } => {
                let mut last: Value = Value::Null;

                for statement in body {
                    last = self.evaluate(statement, scope)?;
                }

                Ok(last)
            }

            NodeKind::UnaryExpression { operator, argument } => {
                let value: Value = self.evaluate(argument, scope)?;

                evaluate_unary(*operator, value)
            }

            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            } => {
                let left: Value = self.evaluate(left, scope)?;
                let right: Value = self.evaluate(right, scope)?;

                evaluate_binary(*operator, left, right)
            }

            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            } => self.evaluate_assignment(*operator, left, right, scope),

            NodeKind::CallExpression { callee, arguments } => {
                let function: Value = scope.borrow().get(callee);

                if !function.is_callable() {
                    return Err(SimplError::NotAFunction {
                        name: callee.clone(),
                    });
                }

                let mut values: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument, scope)?);
                }

                self.call(&function, &values)
            }

            NodeKind::FunctionExpression { id, params, body } => {
                let closure = Rc::new(Closure {
                    name: id.clone().unwrap_or_else(|| "function".to_string()),
                    params: params.clone(),
                    body: Rc::new(body.as_ref().clone()),
                    scope: Rc::downgrade(scope),
                });
                let value = Value::Closure(closure);

                if let Some(name) = id {
                    scope.borrow_mut().define(name, value.clone());
                }

                info!("Function expression evaluated to {}", value);

                Ok(value)
            }

            NodeKind::ArrayExpression { .. } => Err(SimplError::UnimplementedEvaluator {
                node: node.type_name(),
            }),
        }
    }

    /// Invoke a callable with already evaluated arguments.
    pub fn call(&mut self, function: &Value, args: &[Value]) -> Result<Value> {
        match function {
            Value::NativeFunction { name, func } => {
                debug!("Calling native function '{}'", name);

                func(self, args)
            }

            Value::Closure(closure) => {
                debug!("Calling user-defined function '{}'", closure.signature());

                if self.depth >= MAX_CALL_DEPTH {
                    return Err(SimplError::CallDepth {
                        limit: MAX_CALL_DEPTH,
                    });
                }

                let Some(defining) = closure.scope.upgrade() else {
                    return Err(SimplError::ExpiredClosure {
                        name: closure.signature(),
                    });
                };

                let frame = Rc::new(RefCell::new(Scope::with_enclosing(defining)));

                // Missing arguments read as null, extra ones are ignored.
                for (i, param) in closure.params.iter().enumerate() {
                    let arg: Value = args.get(i).cloned().unwrap_or(Value::Null);
                    frame.borrow_mut().define(param, arg);
                }

                self.depth += 1;
                let result = self.evaluate(&closure.body, &frame);
                self.depth -= 1;

                result
            }

            other => Err(SimplError::NotAFunction {
                name: other.to_string(),
            }),
        }
    }

    fn evaluate_assignment(
        &mut self,
        operator: AssignOperator,
        left: &Node,
        right: &Node,
        scope: &Rc<RefCell<Scope>>,
    ) -> Result<Value> {
        match &left.kind {
            NodeKind::Identifier { name } => {
                let value: Value = match operator {
                    AssignOperator::Assign => self.evaluate(right, scope)?,

                    AssignOperator::Compound(op) => {
                        let current: Value = scope.borrow().get(name);
                        let rhs: Value = self.evaluate(right, scope)?;

                        evaluate_binary(op, current, rhs)?
                    }
                };

                scope.borrow_mut().define(name, value.clone());

                Ok(value)
            }

            NodeKind::CallExpression { callee, arguments } => {
                if operator != AssignOperator::Assign {
                    return Err(SimplError::CompoundDefinition {
                        operator: operator.as_str().to_string(),
                    });
                }

                let params: Vec<String> = arguments
                    .iter()
                    .map(|arg| match &arg.kind {
                        NodeKind::Identifier { name } => Ok(name.clone()),
                        _ => Err(SimplError::InvalidIdentifier {
                            text: AstPrinter::print(arg),
                        }),
                    })
                    .collect::<Result<_>>()?;

                let closure = Rc::new(Closure {
                    name: callee.clone(),
                    params,
                    body: Rc::new(right.clone()),
                    scope: Rc::downgrade(scope),
                });

                info!("Defined function {}", closure.signature());

                let value = Value::Closure(closure);
                scope.borrow_mut().define(callee, value.clone());

                Ok(value)
            }

            _ => Err(SimplError::InvalidAssignment {
                target: left.type_name(),
            }),
        }
    }
}

fn evaluate_unary(operator: UnaryOperator, value: Value) -> Result<Value> {
    match operator {
        UnaryOperator::Plus => Ok(value),

        UnaryOperator::Minus => value
            .to_number()?
            .checked_neg()
            .map(Value::Number)
            .ok_or(SimplError::Overflow),

        UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
    }
}

/// Arithmetic with dynamic coercion: `+` concatenates when either side is a
/// string, everything else works on the numeric reading of both sides.
/// Division truncates toward zero.
pub fn evaluate_binary(operator: BinaryOperator, left: Value, right: Value) -> Result<Value> {
    debug!("Binary {} on {} and {}", operator.as_str(), left, right);

    if operator == BinaryOperator::Add
        && (matches!(left, Value::String(_)) || matches!(right, Value::String(_)))
    {
        return Ok(Value::String(format!("{}{}", left, right)));
    }

    let a: i64 = left.to_number()?;
    let b: i64 = right.to_number()?;

    let result: Option<i64> = match operator {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Subtract => a.checked_sub(b),
        BinaryOperator::Multiply => a.checked_mul(b),
        BinaryOperator::Divide | BinaryOperator::Remainder if b == 0 => {
            return Err(SimplError::DivisionByZero)
        }
        BinaryOperator::Divide => a.checked_div(b),
        BinaryOperator::Remainder => a.checked_rem(b),
    };

    result.map(Value::Number).ok_or(SimplError::Overflow)
}
