//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch: the operand kinds are a closed set, so
//! matching is preferred over trait objects. `and`/`or` short-circuit and are
//! handled by the interpreter, not here.

use lox_ir::BinaryOp;

use crate::errors::{operands_not_addable, operation_requires_numbers, EvalResult};
use crate::value::Value;

/// Evaluate a binary operation on two already-evaluated operands.
#[allow(
    clippy::needless_pass_by_value,
    reason = "callers hand over freshly evaluated operands"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match (op, &left, &right) {
        (_, Value::Number(a), Value::Number(b)) => Ok(eval_number_binary(*a, *b, op)),
        (BinaryOp::Eq, _, _) => Ok(Value::Bool(left == right)),
        (BinaryOp::NotEq, _, _) => Ok(Value::Bool(left != right)),
        (BinaryOp::Add, Value::Str(a), Value::Str(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        // `+` adds numbers and concatenates strings; nothing else mixes.
        (BinaryOp::Add, _, _) => Err(operands_not_addable(
            left.type_name(),
            right.type_name(),
        )),
        _ => Err(operation_requires_numbers(
            left.type_name(),
            right.type_name(),
        )),
    }
}

fn eval_number_binary(a: f64, b: f64, op: BinaryOp) -> Value {
    match op {
        BinaryOp::Add => Value::Number(a + b),
        BinaryOp::Sub => Value::Number(a - b),
        BinaryOp::Mul => Value::Number(a * b),
        BinaryOp::Div => Value::Number(divide(a, b)),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::NotEq => Value::Bool(a != b),
    }
}

/// Division never fails: `0/0` is NaN and `x/0` is infinity signed like `x`.
fn divide(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        if a == 0.0 {
            f64::NAN
        } else if a > 0.0 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }
    } else {
        a / b
    }
}
