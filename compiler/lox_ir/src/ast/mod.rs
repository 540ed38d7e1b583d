//! Statement and expression nodes.
//!
//! The evaluator walks these nodes directly; there is no lowering pass.
//! Every node type carries exactly the attributes the evaluator needs, so an
//! `If` always has a condition and a then-branch, a `Class` always has a
//! name and a (possibly empty) method list.

mod operators;

use std::rc::Rc;

use crate::Name;

pub use operators::{BinaryOp, LogicalOp, UnaryOp};

/// A whole program: statements executed in order against the global scope.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Program { stmts }
    }
}

/// Statement kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// Expression evaluated for its side effects; the value is discarded.
    Expr(Expr),
    /// `print expr;`
    Print(Expr),
    /// `var name = value;` (absent initializers are `nil` literals).
    VarDef { name: Name, value: Expr },
    /// `{ ... }` with its own scope.
    Block(Vec<Stmt>),
    /// `if (cond) then_branch else else_branch`
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// `while (cond) body`
    While { cond: Expr, body: Box<Stmt> },
    /// `fun name(params) { body }`
    Function(Rc<FunctionDecl>),
    /// `class Name < Base { methods }`
    Class(ClassDecl),
    /// `return;` or `return value;`
    Return(Option<Expr>),
}

/// A function or method declaration.
///
/// The body statements run directly in the call scope that holds the
/// parameters; the body does not open a second scope.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: Vec<Stmt>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<Name>, params: Vec<Name>, body: Vec<Stmt>) -> Self {
        FunctionDecl {
            name: name.into(),
            params,
            body,
        }
    }

    /// Number of declared parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A class declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: Name,
    /// Name of the base class, resolved at runtime.
    pub base: Option<Name>,
    pub methods: Vec<Rc<FunctionDecl>>,
}

/// Literal values.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
}

/// Expression kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// Variable reference.
    Var(Name),
    /// `name = value`
    Assign { name: Name, value: Box<Expr> },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `callee(args...)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// `object.attr`
    Getattr { object: Box<Expr>, attr: Name },
    /// `object.attr = value`
    Setattr {
        object: Box<Expr>,
        attr: Name,
        value: Box<Expr>,
    },
    /// `this`
    This,
    /// `super.method`
    Super { method: Name },
}

impl Expr {
    /// Visit the direct child expressions of this node in evaluation order.
    pub fn for_each_child<'a>(&'a self, mut f: impl FnMut(&'a Expr)) {
        match self {
            Expr::Literal(_) | Expr::Var(_) | Expr::This | Expr::Super { .. } => {}
            Expr::Assign { value, .. } => f(value.as_ref()),
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                f(left.as_ref());
                f(right.as_ref());
            }
            Expr::Unary { operand, .. } => f(operand.as_ref()),
            Expr::Call { callee, args } => {
                f(callee.as_ref());
                args.iter().for_each(f);
            }
            Expr::Getattr { object, .. } => f(object.as_ref()),
            Expr::Setattr { object, value, .. } => {
                f(object.as_ref());
                f(value.as_ref());
            }
        }
    }

    /// Returns `true` if this expression or any expression nested in it
    /// reads the variable `name`.
    pub fn references(&self, name: &str) -> bool {
        if let Expr::Var(var) = self {
            if var == name {
                return true;
            }
        }
        let mut found = false;
        self.for_each_child(|child| found = found || child.references(name));
        found
    }
}
