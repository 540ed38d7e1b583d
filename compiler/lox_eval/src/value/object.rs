//! Functions, classes and instances.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use lox_ir::{FunctionDecl, Name, Stmt};

use super::teardown::{release, Pending};
use super::{Heap, Value};
use crate::environment::{LocalScope, Scope};
use crate::errors::{method_not_found, undefined_attribute, EvalError};

/// A closure: a declaration plus the scope chain it was evaluated in.
pub struct Function {
    decl: Rc<FunctionDecl>,
    closure: LocalScope<Scope>,
    is_initializer: bool,
}

impl Function {
    pub fn new(decl: Rc<FunctionDecl>, closure: LocalScope<Scope>, is_initializer: bool) -> Self {
        Function {
            decl,
            closure,
            is_initializer,
        }
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.decl.name
    }

    #[inline]
    pub fn params(&self) -> &[Name] {
        &self.decl.params
    }

    #[inline]
    pub fn body(&self) -> &[Stmt] {
        &self.decl.body
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.decl.arity()
    }

    /// The captured scope chain.
    #[inline]
    pub fn closure(&self) -> &LocalScope<Scope> {
        &self.closure
    }

    /// `true` for a class's `init` method. Calling an initializer always
    /// yields the instance it is bound to.
    #[inline]
    pub fn is_initializer(&self) -> bool {
        self.is_initializer
    }

    /// A copy of this function whose chain has one extra scope binding
    /// `this` to `instance`. The receiver is left untouched.
    pub fn bind(&self, instance: &Heap<Instance>) -> Heap<Function> {
        let scope = Scope::with_bindings(
            self.closure.clone(),
            [(Name::new("this"), Value::Instance(instance.clone()))],
        );
        Heap::new(Function {
            decl: Rc::clone(&self.decl),
            closure: LocalScope::new(scope),
            is_initializer: self.is_initializer,
        })
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.decl.name)
    }
}

/// A class: its methods (unbound) and an optional base class.
pub struct Class {
    name: Name,
    methods: FxHashMap<Name, Heap<Function>>,
    base: Option<Heap<Class>>,
}

impl Class {
    pub fn new(
        name: Name,
        methods: FxHashMap<Name, Heap<Function>>,
        base: Option<Heap<Class>>,
    ) -> Self {
        Class {
            name,
            methods,
            base,
        }
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn base(&self) -> Option<&Heap<Class>> {
        self.base.as_ref()
    }

    /// Nearest method called `name`, searching this class and then each
    /// ancestor in turn.
    pub fn find_method(&self, name: &str) -> Option<&Heap<Function>> {
        let mut class = self;
        loop {
            if let Some(method) = class.methods.get(name) {
                return Some(method);
            }
            class = class.base.as_deref()?;
        }
    }

    /// Like [`Class::find_method`], failing with `MethodNotFound`.
    pub fn resolve_method(&self, name: &str) -> Result<Heap<Function>, EvalError> {
        self.find_method(name)
            .cloned()
            .ok_or_else(|| method_not_found(&self.name, name))
    }

    pub(super) fn detach_into(&mut self, pending: &mut Vec<Pending>) {
        pending.extend(
            self.methods
                .drain()
                .map(|(_, method)| Pending::Value(Value::Function(method))),
        );
        if let Some(base) = self.base.take() {
            pending.push(Pending::Value(Value::Class(base)));
        }
    }
}

impl Drop for Class {
    fn drop(&mut self) {
        if self.methods.is_empty() && self.base.is_none() {
            return;
        }
        let mut pending = Vec::new();
        self.detach_into(&mut pending);
        release(pending);
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.methods.keys().map(Name::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("Class")
            .field("name", &self.name.as_str())
            .field("methods", &methods)
            .field("base", &self.base.as_ref().map(|b| b.name.as_str()))
            .finish()
    }
}

/// An instance: its class and an open set of fields.
pub struct Instance {
    class: Heap<Class>,
    fields: RefCell<FxHashMap<Name, Value>>,
}

impl Instance {
    /// Allocate a fresh instance with no fields.
    pub fn allocate(class: Heap<Class>) -> Heap<Instance> {
        Heap::new(Instance {
            class,
            fields: RefCell::new(FxHashMap::default()),
        })
    }

    #[inline]
    pub fn class(&self) -> &Heap<Class> {
        &self.class
    }

    /// A previously assigned field, ignoring methods.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    /// Store `value` under `name`, creating the field if needed.
    pub fn set(&self, name: Name, value: Value) {
        self.fields.borrow_mut().insert(name, value);
    }

    /// Queue the class handle too, so dropping an emptied instance never
    /// frees its class in place.
    pub(super) fn detach_into(&mut self, pending: &mut Vec<Pending>) {
        pending.extend(
            self.fields
                .get_mut()
                .drain()
                .map(|(_, value)| Pending::Value(value)),
        );
        pending.push(Pending::Value(Value::Class(self.class.clone())));
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        if self.fields.get_mut().is_empty() {
            return;
        }
        let mut pending = Vec::new();
        self.detach_into(&mut pending);
        release(pending);
    }
}

impl Heap<Instance> {
    /// Read an attribute: a field if one is set, otherwise a method of the
    /// class bound to this instance.
    pub fn get(&self, attr: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.field(attr) {
            return Ok(value);
        }
        match self.class.find_method(attr) {
            Some(method) => Ok(Value::Function(method.bind(self))),
            None => Err(undefined_attribute(&self.class.name, attr)),
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields.borrow();
        let mut names: Vec<&str> = fields.keys().map(Name::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Instance")
            .field("class", &self.class.name.as_str())
            .field("fields", &names)
            .finish()
    }
}
