//! Native functions bound in the builtins scope.
//!
//! The table is fixed at compile time. Each entry is an ordinary callable
//! value (`Value::Native`); the evaluator never special-cases these names.

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::errors::{arity_mismatch, native_error, too_few_arguments, wrong_arg_type, EvalError};
use crate::value::Value;

/// Signature shared by all builtins.
pub type NativeFn = fn(&[Value]) -> Result<Value, EvalError>;

/// How many arguments a builtin accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

/// A builtin function.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: Arity,
    func: NativeFn,
}

impl NativeFunction {
    /// Check the argument count, then run the builtin.
    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        match self.arity {
            Arity::Exact(n) if args.len() != n => {
                return Err(arity_mismatch(self.name, n, args.len()));
            }
            Arity::AtLeast(n) if args.len() < n => {
                return Err(too_few_arguments(self.name, n, args.len()));
            }
            Arity::Exact(_) | Arity::AtLeast(_) => {}
        }
        (self.func)(args)
    }
}

/// The builtins table, in the order they are bound.
pub static BUILTINS: [NativeFunction; 5] = [
    NativeFunction {
        name: "sqrt",
        arity: Arity::Exact(1),
        func: sqrt,
    },
    NativeFunction {
        name: "clock",
        arity: Arity::Exact(0),
        func: clock,
    },
    NativeFunction {
        name: "max",
        arity: Arity::AtLeast(1),
        func: max,
    },
    NativeFunction {
        name: "read_number",
        arity: Arity::Exact(1),
        func: read_number,
    },
    NativeFunction {
        name: "is_even",
        arity: Arity::Exact(1),
        func: is_even,
    },
];

fn number_arg(function: &str, value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(wrong_arg_type(function, "number", other.type_name())),
    }
}

/// The single argument of a one-argument builtin.
fn single_arg<'a>(function: &str, args: &'a [Value]) -> Result<&'a Value, EvalError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(arity_mismatch(function, 1, args.len())),
    }
}

fn sqrt(args: &[Value]) -> Result<Value, EvalError> {
    let n = number_arg("sqrt", single_arg("sqrt", args)?)?;
    Ok(Value::Number(n.sqrt()))
}

/// Seconds since the Unix epoch.
fn clock(_args: &[Value]) -> Result<Value, EvalError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| native_error("clock", err.to_string()))?;
    Ok(Value::Number(elapsed.as_secs_f64()))
}

fn max(args: &[Value]) -> Result<Value, EvalError> {
    let [first, rest @ ..] = args else {
        return Err(too_few_arguments("max", 1, 0));
    };
    let mut best = number_arg("max", first)?;
    for arg in rest {
        let n = number_arg("max", arg)?;
        if n > best {
            best = n;
        }
    }
    Ok(Value::Number(best))
}

fn is_even(args: &[Value]) -> Result<Value, EvalError> {
    let n = number_arg("is_even", single_arg("is_even", args)?)?;
    Ok(Value::Bool(n % 2.0 == 0.0))
}

fn read_number(args: &[Value]) -> Result<Value, EvalError> {
    let prompt = single_arg("read_number", args)?.to_string();
    let stdin = io::stdin();
    let stdout = io::stdout();
    read_number_from(&prompt, &mut stdin.lock(), &mut stdout.lock()).map(Value::Number)
}

/// Prompt on `output` and read lines from `input` until one parses as a
/// number. Fails at end of input.
pub fn read_number_from<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<f64, EvalError> {
    let io_error = |err: io::Error| native_error("read_number", err.to_string());
    let mut line = String::new();
    loop {
        write!(output, "{prompt}").map_err(io_error)?;
        output.flush().map_err(io_error)?;

        line.clear();
        if input.read_line(&mut line).map_err(io_error)? == 0 {
            return Err(native_error("read_number", "end of input"));
        }
        match line.trim().parse::<f64>() {
            Ok(n) => return Ok(n),
            Err(_) => {
                tracing::trace!(input = line.trim(), "rejected non-numeric input");
                writeln!(output, "Please enter a valid number!").map_err(io_error)?;
            }
        }
    }
}
