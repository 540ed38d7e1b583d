//! Lox Eval - tree-walking evaluator for Lox programs.
//!
//! # Architecture
//!
//! - `Environment`: a chain of `Scope`s rooted in the read-only builtins
//!   scope; closures capture the chain by reference
//! - `Value`: closed set of runtime values; functions, classes and instances
//!   live behind `Heap<T>` and compare by identity
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch
//! - `Interpreter`: executes statements, returning `Flow` so that `return`
//!   unwinds to its call frame without going through the error path
//!
//! Programs are expected to have passed `lox_check::validate` first; the
//! evaluator does not repeat the structural checks.

mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod print_handler;
mod unary_operators;
mod value;

pub use builtins::{read_number_from, Arity, NativeFn, NativeFunction, BUILTINS};
pub use diagnostics::{CallFrame, CallStack};
pub use environment::{Environment, LocalScope, Mutability, Scope, ScopeError, ScopeKind};
pub use errors::{
    BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalNote, EvalResult,
};
pub use interpreter::{ExecResult, Flow, Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use unary_operators::evaluate_unary;
pub use value::{Class, Function, Heap, Instance, Value};
