//! Interpreter/evaluator for Lark.
//!
//! This crate implements a tree-walking interpreter over the
//! `lark-syntax` expression tree: runtime values, chained lexical
//! environments, and the evaluator itself.

mod env;
mod eval;
mod value;

pub use env::Environment;
pub use eval::{EvalError, Evaluator, ValueKind, evaluate};
pub use value::{Closure, Value};
