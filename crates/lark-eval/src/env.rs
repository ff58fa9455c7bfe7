//! Evaluation environments.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::Value;

/// A mutable mapping from names to values, chained to an optional
/// enclosing scope.
///
/// Cloning an `Environment` shares the underlying frame; this is how
/// a closure keeps its defining scope alive after the call that
/// created the scope has returned. The chain is strictly
/// outer-pointing, so no reference cycles can form.
#[derive(Clone)]
pub struct Environment {
    bindings: Rc<RefCell<HashMap<String, Value>>>,
    parent: Option<Box<Environment>>,
}

impl Environment {
    /// Create the global environment. Made once per program run by
    /// the driver; every other frame chains back to it.
    pub fn new() -> Self {
        Self {
            bindings: Rc::new(RefCell::new(HashMap::new())),
            parent: None,
        }
    }

    /// Create a child environment chained to this one.
    pub fn child(&self) -> Self {
        Self {
            bindings: Rc::new(RefCell::new(HashMap::new())),
            parent: Some(Box::new(self.clone())),
        }
    }

    /// Look up a name through the scope chain.
    ///
    /// An unbound name reads as [`Value::NoValue`], mirroring how
    /// JavaScript reads an undefined variable; it is never an error.
    pub fn resolve_var(&self, name: &str) -> Value {
        if let Some(value) = self.bindings.borrow().get(name) {
            return value.clone();
        }
        match &self.parent {
            Some(parent) => parent.resolve_var(name),
            None => Value::NoValue,
        }
    }

    /// Overwrite `name` in the innermost scope that already binds it.
    ///
    /// If no scope in the chain binds it, the binding is created in
    /// the global scope: assigning to an undeclared name makes a
    /// global, never a local.
    pub fn update_var(&self, name: &str, value: Value) {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_owned(), value);
            return;
        }
        match &self.parent {
            Some(parent) => parent.update_var(name, value),
            None => {
                self.bindings.borrow_mut().insert(name.to_owned(), value);
            }
        }
    }

    /// Bind `name` in the current scope, shadowing any outer binding
    /// of the same name. Redeclaring a name already bound in this
    /// scope silently overwrites it.
    pub fn create_var(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
