//! Lexical scopes.
//!
//! A [`Scope`] maps names to values and links to its parent. Every chain ends
//! in the builtins scope, directly below the program's global scope:
//!
//! ```text
//!  builtins (read-only)  <-  global  <-  block  <-  block ...
//!                                  ^
//!                                  \-  function closure  <-  call scope
//! ```
//!
//! Closures hold a [`LocalScope`] handle to the chain they were created in,
//! so they observe later assignments made through any other handle.
//! [`Environment`] is the interpreter's view: a stack of scopes pushed and
//! popped by blocks, whose base is the global scope for the program and the
//! captured chain for a function call.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use lox_ir::Name;

use crate::builtins::BUILTINS;
use crate::errors::{duplicate_declaration, immutable_binding, undefined_name, EvalError};
use crate::value::{release, Pending, Value};

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// Declared by the program.
    Mutable,
    /// Builtins and the implicit `this`/`super` bindings.
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Role of a scope in the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// The root: native functions, never declared into by programs.
    Builtins,
    /// Top-level program scope. Redeclaration is allowed here.
    Global,
    /// Blocks, calls, bound-method and `super` scopes.
    Local,
}

/// Failure of a scope operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeError {
    /// Name not bound anywhere in the chain.
    Undefined,
    /// Name already declared in this non-global scope.
    Duplicate,
    /// Binding exists but is read-only.
    Immutable,
}

impl ScopeError {
    /// Convert to the runtime error for `name`.
    #[cold]
    pub fn into_eval_error(self, name: &str) -> EvalError {
        match self {
            ScopeError::Undefined => undefined_name(name),
            ScopeError::Duplicate => duplicate_declaration(name),
            ScopeError::Immutable => immutable_binding(name),
        }
    }
}

/// A single-threaded shared handle with interior mutability.
///
/// All scope allocations go through [`LocalScope::new`]; clones share the
/// same scope.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Returns `true` if both handles share one scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Mutable access if no other handle shares this scope.
    #[inline]
    pub(crate) fn get_mut(&mut self) -> Option<&mut T> {
        Rc::get_mut(&mut self.0).map(RefCell::get_mut)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

/// A single scope containing variable bindings.
#[derive(Clone, Debug)]
pub struct Scope {
    kind: ScopeKind,
    bindings: FxHashMap<Name, Binding>,
    parent: Option<LocalScope<Scope>>,
}

thread_local! {
    static BUILTINS_SCOPE: LocalScope<Scope> = LocalScope::new(Scope::builtins());
}

/// Handle to the builtins scope shared by every chain on this thread.
pub fn builtins_scope() -> LocalScope<Scope> {
    BUILTINS_SCOPE.with(LocalScope::clone)
}

impl Scope {
    fn builtins() -> Self {
        let bindings = BUILTINS
            .iter()
            .map(|native| {
                let binding = Binding {
                    value: Value::Native(native),
                    mutability: Mutability::Immutable,
                };
                (Name::new(native.name), binding)
            })
            .collect();
        Scope {
            kind: ScopeKind::Builtins,
            bindings,
            parent: None,
        }
    }

    /// A fresh global scope whose parent is the builtins scope.
    pub fn global() -> Self {
        Scope {
            kind: ScopeKind::Global,
            bindings: FxHashMap::default(),
            parent: Some(builtins_scope()),
        }
    }

    /// An empty local scope below `parent`.
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            kind: ScopeKind::Local,
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// A local scope below `parent` pre-populated with immutable bindings.
    pub fn with_bindings(
        parent: LocalScope<Scope>,
        bindings: impl IntoIterator<Item = (Name, Value)>,
    ) -> Self {
        let bindings = bindings
            .into_iter()
            .map(|(name, value)| {
                let binding = Binding {
                    value,
                    mutability: Mutability::Immutable,
                };
                (name, binding)
            })
            .collect();
        Scope {
            kind: ScopeKind::Local,
            bindings,
            parent: Some(parent),
        }
    }

    #[inline]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    #[inline]
    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    /// Returns `true` if `name` is bound in this scope itself.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bind `name` in this scope only.
    ///
    /// Redeclaring a name fails except in the global scope, where the new
    /// binding replaces the old one.
    pub fn define(
        &mut self,
        name: Name,
        value: Value,
        mutability: Mutability,
    ) -> Result<(), ScopeError> {
        if self.kind != ScopeKind::Global && self.bindings.contains_key(&name) {
            return Err(ScopeError::Duplicate);
        }
        self.bindings.insert(name, Binding { value, mutability });
        Ok(())
    }

    /// Innermost binding of `name` in this scope or its ancestors.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Overwrite the innermost existing binding of `name`. Never creates a
    /// binding.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), ScopeError> {
        if let Some(binding) = self.bindings.get_mut(name) {
            if !binding.mutability.is_mutable() {
                return Err(ScopeError::Immutable);
            }
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(ScopeError::Undefined),
        }
    }

    pub(crate) fn detach_into(&mut self, pending: &mut Vec<Pending>) {
        pending.extend(
            self.bindings
                .drain()
                .map(|(_, binding)| Pending::Value(binding.value)),
        );
        if let Some(parent) = self.parent.take() {
            pending.push(Pending::Scope(parent));
        }
    }

    /// `"name = value; ..."` with names sorted, or `"<empty>"`.
    fn pretty_bindings(&self) -> String {
        if self.bindings.is_empty() {
            return "<empty>".to_string();
        }
        let mut entries: Vec<(&Name, &Binding)> = self.bindings.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
            .into_iter()
            .map(|(name, binding)| format!("{name} = {}", binding.value.show_repr()))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if self.bindings.is_empty() && self.parent.is_none() {
            return;
        }
        let mut pending = Vec::new();
        self.detach_into(&mut pending);
        release(pending);
    }
}

/// Environment for the interpreter using a scope stack.
///
/// `scopes[0]` is the base and is never popped. Each pushed scope is a child
/// of the one below it.
pub struct Environment {
    scopes: Vec<LocalScope<Scope>>,
    base: LocalScope<Scope>,
}

impl Environment {
    /// A program environment: a fresh global scope over the builtins.
    pub fn new() -> Self {
        Self::with_base(LocalScope::new(Scope::global()))
    }

    /// An environment whose outermost scope is `base`, typically a closure's
    /// captured chain.
    pub fn with_base(base: LocalScope<Scope>) -> Self {
        Environment {
            scopes: vec![base.clone()],
            base,
        }
    }

    /// Number of scopes on the stack, including the base.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Push a scope pre-populated with immutable bindings.
    pub fn push_scope_with(&mut self, bindings: impl IntoIterator<Item = (Name, Value)>) {
        let parent = self.current_scope();
        self.scopes
            .push(LocalScope::new(Scope::with_bindings(parent, bindings)));
    }

    /// Pop the innermost scope. The base scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Handle to the innermost scope, for closure capture.
    #[inline]
    pub fn current_scope(&self) -> LocalScope<Scope> {
        self.current().clone()
    }

    #[inline]
    fn current(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.base)
    }

    /// Declare a mutable binding in the innermost scope.
    pub fn declare(&mut self, name: Name, value: Value) -> Result<(), EvalError> {
        self.define(name, value, Mutability::Mutable)
    }

    pub fn define(
        &mut self,
        name: Name,
        value: Value,
        mutability: Mutability,
    ) -> Result<(), EvalError> {
        let mut scope = self.current().borrow_mut();
        match scope.define(name.clone(), value, mutability) {
            Ok(()) => Ok(()),
            Err(err) => Err(err.into_eval_error(&name)),
        }
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current().borrow().lookup(name)
    }

    /// Look up `name`, failing with `UndefinedName`.
    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        self.lookup(name).ok_or_else(|| undefined_name(name))
    }

    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        self.current()
            .borrow_mut()
            .assign(name, value)
            .map_err(|err| err.into_eval_error(name))
    }

    /// Every scope of the current chain, innermost first.
    fn chain(&self) -> Vec<LocalScope<Scope>> {
        let mut chain = Vec::new();
        let mut next = Some(self.current_scope());
        while let Some(scope) = next {
            next = scope.borrow().parent().cloned();
            chain.push(scope);
        }
        chain
    }

    /// All bindings visible from the innermost scope; inner bindings win.
    pub fn to_map(&self) -> FxHashMap<Name, Value> {
        let mut map = FxHashMap::default();
        for scope in self.chain() {
            for (name, binding) in &scope.borrow().bindings {
                map.entry(name.clone())
                    .or_insert_with(|| binding.value.clone());
            }
        }
        map
    }

    /// One line per scope, innermost first, numbered from the builtins
    /// scope (`0`) outward.
    ///
    /// ```text
    ///  2: a = 2
    ///  1: a = 1; s = "text"
    ///  0: clock = <native fn>; ...
    /// ```
    pub fn pretty(&self) -> String {
        let chain = self.chain();
        let outermost = chain.len().saturating_sub(1);
        chain
            .iter()
            .enumerate()
            .map(|(i, scope)| {
                let index = outermost.saturating_sub(i);
                format!("{index:>2}: {}", scope.borrow().pretty_bindings())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
