//! Expression evaluation.

use lox_ir::{Expr, Literal, LogicalOp};

use super::class::get_attribute;
use super::Interpreter;
use crate::errors::EvalResult;
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::value::Value;

impl Interpreter {
    pub(super) fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Literal(literal) => Ok(eval_literal(literal)),
            Expr::Var(name) => self.env.get(name),
            Expr::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.env.assign(name, value.clone())?;
                Ok(value)
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(left, right, *op)
            }
            Expr::Logical { op, left, right } => {
                let left = self.eval_expr(left)?;
                let short_circuit = match op {
                    LogicalOp::And => !left.is_truthy(),
                    LogicalOp::Or => left.is_truthy(),
                };
                if short_circuit {
                    Ok(left)
                } else {
                    self.eval_expr(right)
                }
            }
            Expr::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                evaluate_unary(value, *op)
            }
            Expr::Call { callee, args } => {
                let callee = self.eval_expr(callee)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval_expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                self.eval_call(&callee, &args)
            }
            Expr::Getattr { object, attr } => {
                let object = self.eval_expr(object)?;
                get_attribute(&object, attr)
            }
            Expr::Setattr {
                object,
                attr,
                value,
            } => self.eval_setattr(object, attr, value),
            Expr::This => self.env.get("this"),
            Expr::Super { method } => self.eval_super(method),
        }
    }
}

fn eval_literal(literal: &Literal) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::Str(s) => Value::string(s.as_str()),
    }
}
