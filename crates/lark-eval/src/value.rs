//! Runtime values.

use std::fmt;
use std::rc::Rc;

use lark_syntax::Expr;

use crate::Environment;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// Integer value
    Int(i64),
    /// Boolean value
    Bool(bool),
    /// Function value
    Closure(Rc<Closure>),
    /// The result of a construct that produces nothing meaningful:
    /// a false `if` with no else, or a finished loop. Distinct from
    /// `Bool(false)` and from any integer.
    NoValue,
}

/// A function value: parameter names, body, and the environment in
/// effect at the declaration site.
///
/// The environment handle is shared with the defining scope, not a
/// private copy, so assignments made in that scope after the function
/// is declared are observed at call time.
pub struct Closure {
    pub params: Vec<String>,
    pub body: Expr,
    pub env: Environment,
}

impl Value {
    /// Try to get as integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Closure(_) => write!(f, "<closure>"),
            Value::NoValue => write!(f, "undefined"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::NoValue, Value::NoValue) => true,
            // Closures are never equal
            _ => false,
        }
    }
}
