use crate::builtins::BUILTINS;
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One frame of the scope chain.
///
/// Reads fall back through `enclosing` and finally to the immutable
/// [`BUILTINS`] table; writes always land in this frame.  Parents are only
/// set at construction, so the chain cannot loop.
#[derive(Debug, Default)]
pub struct Scope {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Scope>>>,
}

impl Scope {
    /// A root frame whose parent is the built‑ins table.
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Scope>>) -> Self {
        Scope {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    pub fn define(&mut self, name: &str, value: Value) {
        debug!("Defining '{}' = {}", name, value);

        self.values.insert(name.to_string(), value);
    }

    /// Resolve `name`; an unknown name is `null`, never an error.
    pub fn get(&self, name: &str) -> Value {
        if let Some(value) = self.values.get(name) {
            return value.clone();
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get(name),
            None => BUILTINS.get(name).unwrap_or(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_shadow_without_touching_parent() {
        let parent = Rc::new(RefCell::new(Scope::new()));
        parent.borrow_mut().define("x", Value::Number(1));

        let mut child = Scope::with_enclosing(parent.clone());
        assert_eq!(child.get("x"), Value::Number(1));

        child.define("x", Value::Number(2));
        assert_eq!(child.get("x"), Value::Number(2));
        assert_eq!(parent.borrow().get("x"), Value::Number(1));
    }

    #[test]
    fn root_falls_back_to_builtins_then_null() {
        let scope = Scope::new();

        assert!(scope.get("abs").is_callable());
        assert_eq!(scope.get("nope"), Value::Null);
    }
}
