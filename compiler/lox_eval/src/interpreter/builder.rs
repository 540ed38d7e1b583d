//! `InterpreterBuilder` for creating interpreters with various configurations.

use lox_ir::Name;

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::value::Value;

/// Builder for [`Interpreter`].
///
/// Defaults: stdout printing, unlimited call depth, a fresh global scope.
#[derive(Default)]
pub struct InterpreterBuilder {
    env: Option<Environment>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
    globals: Vec<(Name, Value)>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial environment.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Set where `print` statements write.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Limit nested calls; `None` removes the limit.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Pre-seed a global binding.
    #[must_use]
    pub fn global(mut self, name: impl Into<Name>, value: Value) -> Self {
        self.globals.push((name.into(), value));
        self
    }

    pub fn build(self) -> Interpreter {
        let mut env = self.env.unwrap_or_default();
        for (name, value) in self.globals {
            if let Err(err) = env.declare(name, value) {
                tracing::warn!(error = %err, "skipping pre-seeded global");
            }
        }
        Interpreter {
            env,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: CallStack::new(self.max_call_depth),
        }
    }
}
