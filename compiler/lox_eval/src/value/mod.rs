//! Runtime values.
//!
//! `Value` is a closed set: every consumer matches exhaustively. Strings and
//! objects are shared through [`Heap`]; numbers, booleans and `nil` are
//! inline.
//!
//! ```text
//! let s = Value::string("hello");            // OK
//! let s = Value::Str(Heap::new(..));          // outside this crate: ERROR
//! ```

mod heap;
mod object;
mod teardown;

use std::fmt;

pub use heap::Heap;
pub use object::{Class, Function, Instance};
pub(crate) use teardown::{release, Pending};

use crate::builtins::NativeFunction;

/// Runtime value in the Lox interpreter.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Heap<String>),
    /// A user function, method or bound method.
    Function(Heap<Function>),
    /// A builtin from the builtins scope.
    Native(&'static NativeFunction),
    Class(Heap<Class>),
    Instance(Heap<Instance>),
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn function(function: Function) -> Self {
        Value::Function(Heap::new(function))
    }

    #[inline]
    pub fn class(class: Class) -> Self {
        Value::Class(Heap::new(class))
    }

    /// Kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) | Value::Native(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }

    /// Only `false` and `nil` are falsy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Like `to_string()`, but strings are wrapped in double quotes.
    pub fn show_repr(&self) -> String {
        match self {
            Value::Str(s) => format!("\"{}\"", s.as_str()),
            other => other.to_string(),
        }
    }
}

/// Numbers print in their shortest round-trip form without a trailing `.0`.
/// Decimal exponents below -4 or from 16 up switch to `1.5e+300` notation,
/// with at least two exponent digits.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        return write!(f, "nan");
    }
    if n.is_infinite() {
        return write!(f, "{}", if n > 0.0 { "inf" } else { "-inf" });
    }
    let scientific = format!("{n:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return write!(f, "{n}");
    };
    match exponent.parse::<i32>() {
        Ok(exp) if !(-4..16).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        _ => write!(f, "{n}"),
    }
}

/// Lox's observable textual form, as written by `print`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => fmt_number(*n, f),
            Value::Str(s) => write!(f, "{}", s.as_str()),
            Value::Function(func) => write!(f, "<fn {}>", func.name()),
            Value::Native(_) => write!(f, "<native fn>"),
            Value::Class(class) => write!(f, "{}", class.name()),
            Value::Instance(instance) => write!(f, "{} instance", instance.class().name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n:?})"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Function(func) => write!(f, "Function({func:?})"),
            Value::Native(native) => write!(f, "Native({})", native.name),
            Value::Class(class) => write!(f, "Class({})", class.name()),
            Value::Instance(instance) => write!(f, "Instance({})", instance.class().name()),
        }
    }
}

/// Lox equality: different kinds are never equal, objects compare by
/// identity, everything else by value.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a.as_str() == b.as_str(),
            (Value::Function(a), Value::Function(b)) => Heap::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => std::ptr::eq(*a, *b),
            (Value::Class(a), Value::Class(b)) => Heap::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
