//! Function call evaluation methods for the Interpreter.

use super::{Flow, Interpreter};
use crate::diagnostics::CallFrame;
use crate::environment::Environment;
use crate::errors::{arity_mismatch, not_callable, EvalResult};
use crate::value::{Function, Heap, Value};

impl Interpreter {
    /// Evaluate a call of `callee` with already evaluated arguments.
    #[tracing::instrument(level = "debug", skip_all, fields(callee = %callee, argc = args.len()))]
    pub(super) fn eval_call(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(func, args),
            Value::Native(native) => native.call(args),
            Value::Class(class) => self.instantiate(class, args),
            Value::Nil
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Str(_)
            | Value::Instance(_) => Err(not_callable(callee.type_name())),
        }
    }

    /// Run a user function in a child interpreter.
    ///
    /// Parameters are bound in one fresh scope below the captured chain and
    /// the body runs in that same scope. A `return` ends the call with its
    /// value; falling off the end yields `nil`. Initializers always yield
    /// their `this`.
    pub(crate) fn call_function(&mut self, func: &Heap<Function>, args: &[Value]) -> EvalResult {
        if args.len() != func.arity() {
            return Err(arity_mismatch(func.name(), func.arity(), args.len()));
        }

        let mut call_stack = self.call_stack.clone();
        call_stack.push(CallFrame::new(func.name().clone()))?;

        let mut env = Environment::with_base(func.closure().clone());
        env.push_scope();
        for (param, arg) in func.params().iter().zip(args) {
            env.declare(param.clone(), arg.clone())?;
        }

        let mut callee = self.child(env, call_stack);
        let flow = callee
            .exec_stmts(func.body())
            .map_err(|err| callee.call_stack.attach_backtrace(err))?;

        if func.is_initializer() {
            return callee.env.get("this");
        }
        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}
