//! Static validation for Lox programs.
//!
//! A single walk over the whole tree, run once before evaluation. Each node
//! is checked locally with access to its chain of ancestors (see
//! [`Cursor`]); no runtime scope information is involved.
//!
//! Rejected programs:
//! - reserved words used as variable, parameter, function or class names
//! - `this`/`super` outside a class method, `super` in a class with no base
//! - `return` outside a function, `return value` inside a class's `init`
//! - duplicate variables in one block, duplicate parameters, locals that
//!   shadow a parameter
//! - a local variable read in its own initializer
//! - a class that inherits from itself
//!
//! The first violation found aborts validation.

mod cursor;
mod error;
mod validator;

pub use cursor::{Cursor, FunctionScope, Node};
pub use error::{SemanticError, SemanticErrorKind};
pub use validator::validate;
