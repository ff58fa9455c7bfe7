//! AST and syntax definitions for Lark.
//!
//! This crate defines the expression tree consumed by the evaluator.
//! Lark is expression-oriented: `if` and `while` are expressions and
//! every construct produces a value.

mod expr;

pub use expr::*;
