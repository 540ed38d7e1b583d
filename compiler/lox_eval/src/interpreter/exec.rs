//! Statement execution.

use std::rc::Rc;

use lox_ir::{Expr, Stmt};

use super::{ExecResult, Flow, Interpreter};
use crate::value::{Function, Value};

impl Interpreter {
    pub(super) fn exec_stmt_inner(&mut self, stmt: &Stmt) -> ExecResult {
        match stmt {
            Stmt::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(Flow::Normal)
            }
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr)?;
                self.print_handler.println(&value.to_string());
                Ok(Flow::Normal)
            }
            Stmt::VarDef { name, value } => {
                let value = self.eval_expr(value)?;
                self.env.declare(name.clone(), value)?;
                Ok(Flow::Normal)
            }
            Stmt::Block(stmts) => self.with_env_scope(|scoped| scoped.exec_stmts(stmts)),
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(cond)?.is_truthy() {
                    self.exec_stmt(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While { cond, body } => self.exec_while(cond, body),
            Stmt::Function(decl) => {
                let closure = self.env.current_scope();
                let function = Function::new(Rc::clone(decl), closure, false);
                self.env.declare(decl.name.clone(), Value::function(function))?;
                Ok(Flow::Normal)
            }
            Stmt::Class(decl) => {
                self.exec_class(decl)?;
                Ok(Flow::Normal)
            }
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            }
        }
    }

    fn exec_while(&mut self, cond: &Expr, body: &Stmt) -> ExecResult {
        while self.eval_expr(cond)?.is_truthy() {
            if let Flow::Return(value) = self.exec_stmt(body)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }
}
