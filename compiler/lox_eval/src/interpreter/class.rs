//! Classes: declaration, instantiation, attribute access and `super`.

use std::rc::Rc;

use lox_ir::{ClassDecl, Expr, Name};
use rustc_hash::FxHashMap;

use super::Interpreter;
use crate::environment::{LocalScope, Scope};
use crate::errors::{arity_mismatch, invalid_superclass, not_an_instance, EvalError, EvalResult};
use crate::value::{Class, Function, Heap, Instance, Value};

impl Interpreter {
    /// Declare a class in the current scope.
    ///
    /// With a base class, methods close over an extra scope binding `super`
    /// to it; otherwise they close over the current scope.
    pub(super) fn exec_class(&mut self, decl: &ClassDecl) -> Result<(), EvalError> {
        let base = match &decl.base {
            Some(name) => match self.env.get(name)? {
                Value::Class(base) => Some(base),
                _ => return Err(invalid_superclass(name)),
            },
            None => None,
        };

        let method_scope = match &base {
            Some(base) => LocalScope::new(Scope::with_bindings(
                self.env.current_scope(),
                [(Name::new("super"), Value::Class(base.clone()))],
            )),
            None => self.env.current_scope(),
        };

        let methods: FxHashMap<Name, Heap<Function>> = decl
            .methods
            .iter()
            .map(|method| {
                let is_initializer = method.name == "init";
                let function =
                    Function::new(Rc::clone(method), method_scope.clone(), is_initializer);
                (method.name.clone(), Heap::new(function))
            })
            .collect();

        tracing::trace!(class = %decl.name, methods = methods.len(), "declare class");
        let class = Class::new(decl.name.clone(), methods, base);
        self.env.declare(decl.name.clone(), Value::class(class))
    }

    /// Allocate an instance and run `init` on it, if any class in the
    /// chain defines one.
    #[tracing::instrument(level = "debug", skip_all, fields(class = %class.name()))]
    pub(super) fn instantiate(&mut self, class: &Heap<Class>, args: &[Value]) -> EvalResult {
        let instance = Instance::allocate(class.clone());
        match class.find_method("init") {
            Some(init) => {
                let init = init.bind(&instance);
                self.call_function(&init, args)?;
            }
            None if !args.is_empty() => {
                return Err(arity_mismatch(class.name(), 0, args.len()));
            }
            None => {}
        }
        Ok(Value::Instance(instance))
    }

    /// The target is checked before the assigned value is evaluated.
    pub(super) fn eval_setattr(&mut self, object: &Expr, attr: &Name, value: &Expr) -> EvalResult {
        let instance = match self.eval_expr(object)? {
            Value::Instance(instance) => instance,
            other => return Err(not_an_instance(other.type_name())),
        };
        let value = self.eval_expr(value)?;
        instance.set(attr.clone(), value.clone());
        Ok(value)
    }

    /// `super.method`: the base class's method bound to the current `this`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub(super) fn eval_super(&mut self, method: &Name) -> EvalResult {
        let base = match self.env.get("super")? {
            Value::Class(base) => base,
            other => return Err(invalid_superclass(&other.to_string())),
        };
        let this = match self.env.get("this")? {
            Value::Instance(this) => this,
            other => return Err(not_an_instance(other.type_name())),
        };
        let method = base.resolve_method(method)?;
        Ok(Value::Function(method.bind(&this)))
    }
}

/// Read `attr` from `object`; only instances carry attributes.
pub(super) fn get_attribute(object: &Value, attr: &str) -> EvalResult {
    match object {
        Value::Instance(instance) => instance.get(attr),
        _ => Err(not_an_instance(object.type_name())),
    }
}
