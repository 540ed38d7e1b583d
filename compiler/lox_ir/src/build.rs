//! Tree construction helpers.
//!
//! For callers that produce trees without going through a parser (tests,
//! embedders, generated code). Each helper builds exactly one node; `for`
//! loops are the only sugar and expand to `Block`/`While`.

use std::rc::Rc;

use crate::ast::{
    BinaryOp, ClassDecl, Expr, FunctionDecl, Literal, LogicalOp, Program, Stmt, UnaryOp,
};
use crate::Name;

pub fn program(stmts: Vec<Stmt>) -> Program {
    Program::new(stmts)
}

// Expressions

pub fn num(value: f64) -> Expr {
    Expr::Literal(Literal::Number(value))
}

pub fn string(value: &str) -> Expr {
    Expr::Literal(Literal::Str(value.to_string()))
}

pub fn boolean(value: bool) -> Expr {
    Expr::Literal(Literal::Bool(value))
}

pub fn nil() -> Expr {
    Expr::Literal(Literal::Nil)
}

pub fn var(name: &str) -> Expr {
    Expr::Var(Name::new(name))
}

pub fn assign(name: &str, value: Expr) -> Expr {
    Expr::Assign {
        name: Name::new(name),
        value: Box::new(value),
    }
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn and(left: Expr, right: Expr) -> Expr {
    Expr::Logical {
        op: LogicalOp::And,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn or(left: Expr, right: Expr) -> Expr {
    Expr::Logical {
        op: LogicalOp::Or,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::Unary {
        op,
        operand: Box::new(operand),
    }
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call {
        callee: Box::new(callee),
        args,
    }
}

pub fn getattr(object: Expr, attr: &str) -> Expr {
    Expr::Getattr {
        object: Box::new(object),
        attr: Name::new(attr),
    }
}

pub fn setattr(object: Expr, attr: &str, value: Expr) -> Expr {
    Expr::Setattr {
        object: Box::new(object),
        attr: Name::new(attr),
        value: Box::new(value),
    }
}

/// `object.method(args...)`
pub fn method_call(object: Expr, method: &str, args: Vec<Expr>) -> Expr {
    call(getattr(object, method), args)
}

pub fn this() -> Expr {
    Expr::This
}

pub fn super_method(method: &str) -> Expr {
    Expr::Super {
        method: Name::new(method),
    }
}

// Statements

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expr(expr)
}

pub fn print(expr: Expr) -> Stmt {
    Stmt::Print(expr)
}

pub fn var_def(name: &str, value: Expr) -> Stmt {
    Stmt::VarDef {
        name: Name::new(name),
        value,
    }
}

/// `var name;` initialises to `nil`.
pub fn var_decl(name: &str) -> Stmt {
    var_def(name, nil())
}

pub fn block(stmts: Vec<Stmt>) -> Stmt {
    Stmt::Block(stmts)
}

pub fn if_then(cond: Expr, then_branch: Stmt) -> Stmt {
    Stmt::If {
        cond,
        then_branch: Box::new(then_branch),
        else_branch: None,
    }
}

pub fn if_else(cond: Expr, then_branch: Stmt, else_branch: Stmt) -> Stmt {
    Stmt::If {
        cond,
        then_branch: Box::new(then_branch),
        else_branch: Some(Box::new(else_branch)),
    }
}

pub fn while_loop(cond: Expr, body: Stmt) -> Stmt {
    Stmt::While {
        cond,
        body: Box::new(body),
    }
}

/// `for (init; cond; incr) body`, expanded to
/// `{ init; while (cond) { body; incr; } }`.
///
/// A missing condition loops forever; missing `init`/`incr` become `nil`
/// expression statements.
pub fn for_loop(init: Option<Stmt>, cond: Option<Expr>, incr: Option<Expr>, body: Stmt) -> Stmt {
    let init = init.unwrap_or_else(|| expr_stmt(nil()));
    let cond = cond.unwrap_or_else(|| boolean(true));
    let incr = expr_stmt(incr.unwrap_or_else(nil));
    block(vec![init, while_loop(cond, block(vec![body, incr]))])
}

fn names(params: &[&str]) -> Vec<Name> {
    params.iter().map(|p| Name::new(p)).collect()
}

pub fn function(name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
    Stmt::Function(Rc::new(FunctionDecl::new(name, names(params), body)))
}

/// A method declaration, for use in [`class`].
pub fn method(name: &str, params: &[&str], body: Vec<Stmt>) -> Rc<FunctionDecl> {
    Rc::new(FunctionDecl::new(name, names(params), body))
}

pub fn class(name: &str, base: Option<&str>, methods: Vec<Rc<FunctionDecl>>) -> Stmt {
    Stmt::Class(ClassDecl {
        name: Name::new(name),
        base: base.map(Name::new),
        methods,
    })
}

pub fn return_value(value: Expr) -> Stmt {
    Stmt::Return(Some(value))
}

pub fn return_nil() -> Stmt {
    Stmt::Return(None)
}
