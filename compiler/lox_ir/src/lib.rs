//! Syntax tree for the Lox evaluator.
//!
//! The tree is produced by an external parser (or by the builders in
//! [`build`]) and consumed read-only by `lox_check` and `lox_eval`.
//!
//! # Shape
//!
//! - [`Program`]: ordered statement list
//! - [`Stmt`]: statements, including function and class declarations
//! - [`Expr`]: expressions
//!
//! Function declarations are held behind `Rc` so runtime closures can share
//! a body without copying it.

pub mod ast;
pub mod build;
mod keywords;
mod name;

pub use ast::{
    BinaryOp, ClassDecl, Expr, FunctionDecl, Literal, LogicalOp, Program, Stmt, UnaryOp,
};
pub use keywords::{is_keyword, KEYWORDS};
pub use name::Name;
