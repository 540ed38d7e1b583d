//! Tree-walking interpreter for Lox.
//!
//! Statements evaluate to [`Flow`]: `Normal` when control falls through,
//! `Return(value)` when a `return` is unwinding. Blocks, loops and
//! conditionals pass a `Return` straight up without acting on it; only the
//! call frame that owns the function body (`call_function`) consumes it.
//! Runtime errors travel separately on the `Err` side and are never caught
//! inside the interpreter.
//!
//! Every call runs in a child interpreter: its environment is based on the
//! callee's captured chain and its call stack is the caller's plus one frame.
//! The print handler is shared.
//!
//! - `exec.rs` - statements
//! - `expr.rs` - expressions
//! - `function_call.rs` - calling functions, builtins and classes
//! - `class.rs` - class declarations, instantiation, attributes and `super`
//! - `scope_guard.rs` - RAII block scopes

mod builder;
mod class;
mod exec;
mod expr;
mod function_call;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use lox_ir::{Expr, Program, Stmt};
use lox_stack::ensure_sufficient_stack;

use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::{EvalError, EvalResult};
use crate::print_handler::SharedPrintHandler;
use crate::value::Value;

/// How a statement completed.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    /// Fell through to the next statement.
    Normal,
    /// A `return` is unwinding to the enclosing call.
    Return(Value),
}

/// Result of executing a statement.
pub type ExecResult = Result<Flow, EvalError>;

/// Tree-walking interpreter.
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) call_stack: CallStack,
}

impl Interpreter {
    /// An interpreter printing to stdout with no call depth limit.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    #[inline]
    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// Run a whole program in this interpreter's environment.
    ///
    /// Top-level bindings stay in the environment afterwards, so a program
    /// may be fed in several pieces.
    #[tracing::instrument(level = "debug", skip_all, fields(stmts = program.stmts.len()))]
    pub fn execute(&mut self, program: &Program) -> Result<(), EvalError> {
        for stmt in &program.stmts {
            match self.exec_stmt(stmt) {
                Ok(Flow::Normal) => {}
                // Only reachable for unvalidated trees.
                Ok(Flow::Return(_)) => break,
                Err(err) => {
                    tracing::debug!(code = %err.code(), error = %err, "runtime error");
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Execute one statement.
    pub fn exec_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt))
    }

    /// Evaluate one expression.
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
    }

    /// Execute statements in order, stopping at the first `return`.
    pub fn exec_stmts(&mut self, stmts: &[Stmt]) -> ExecResult {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Interpreter for one call: shares the print handler, runs in `env`.
    fn child(&self, env: Environment, call_stack: CallStack) -> Interpreter {
        Interpreter {
            env,
            print_handler: SharedPrintHandler::clone(&self.print_handler),
            call_stack,
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
