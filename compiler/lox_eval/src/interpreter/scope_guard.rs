//! RAII scope guards for the interpreter environment.
//!
//! [`ScopedInterpreter`] pops the scope it pushed when dropped, so a block
//! releases its scope whether it completes, returns, or fails with `?`.
//!
//! ```text
//! self.with_env_scope(|scoped| scoped.exec_stmts(stmts))
//! ```

use std::ops::{Deref, DerefMut};

use lox_ir::Name;

use super::Interpreter;
use crate::value::Value;

/// Guard over an interpreter with one extra scope pushed.
///
/// Derefs to the interpreter; the scope is popped on drop, including during
/// unwinding.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push an empty scope, popped when the returned guard is dropped.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` inside a fresh block scope.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` inside a scope pre-populated with immutable `bindings`.
    pub fn with_bindings<T, F, I>(&mut self, bindings: I, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
        I: IntoIterator<Item = (Name, Value)>,
    {
        self.env.push_scope_with(bindings);
        let mut scoped = ScopedInterpreter { interpreter: self };
        f(&mut scoped)
    }
}
