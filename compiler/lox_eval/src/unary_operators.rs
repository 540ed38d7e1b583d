//! Unary operator implementations for the evaluator.

use lox_ir::UnaryOp;

use crate::errors::{operand_must_be_number, EvalResult};
use crate::value::Value;

/// Evaluate a unary operation.
///
/// `-` requires a number; `!` accepts anything and negates its truthiness.
#[allow(
    clippy::needless_pass_by_value,
    reason = "callers hand over a freshly evaluated operand"
)]
pub fn evaluate_unary(value: Value, op: UnaryOp) -> EvalResult {
    match (op, &value) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Neg, other) => Err(operand_must_be_number(other.type_name())),
        (UnaryOp::Not, _) => Ok(Value::Bool(!value.is_truthy())),
    }
}
