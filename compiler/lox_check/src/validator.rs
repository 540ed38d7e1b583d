//! The validation walk.

use rustc_hash::FxHashSet;

use lox_ir::{is_keyword, ClassDecl, Expr, FunctionDecl, Name, Program, Stmt};
use lox_stack::ensure_sufficient_stack;

use crate::cursor::{Cursor, Node};
use crate::error::{SemanticError, SemanticErrorKind};

type CheckResult = Result<(), SemanticError>;

/// Validate a whole program.
///
/// Returns the first structural violation found in a top-down,
/// left-to-right walk.
#[tracing::instrument(level = "debug", skip_all, fields(stmts = program.stmts.len()))]
pub fn validate(program: &Program) -> CheckResult {
    let mut validator = Validator {
        cursor: Cursor::new(program),
    };
    let result = validator.visit_stmts(&program.stmts);
    if let Err(err) = &result {
        tracing::debug!(code = %err.code(), token = %err.token, "validation failed");
    }
    result
}

struct Validator<'ast> {
    cursor: Cursor<'ast>,
}

impl<'ast> Validator<'ast> {
    /// Push `node`, run `f`, pop `node` whatever `f` returned.
    fn enter(
        &mut self,
        node: Node<'ast>,
        f: impl FnOnce(&mut Self) -> CheckResult,
    ) -> CheckResult {
        self.cursor.push(node);
        let result = ensure_sufficient_stack(|| f(self));
        self.cursor.pop();
        result
    }

    fn visit_stmts(&mut self, stmts: &'ast [Stmt]) -> CheckResult {
        stmts.iter().try_for_each(|stmt| self.visit_stmt(stmt))
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) -> CheckResult {
        self.enter(Node::Stmt(stmt), |this| {
            this.check_stmt(stmt)?;
            this.walk_stmt(stmt)
        })
    }

    fn visit_method(&mut self, method: &'ast FunctionDecl) -> CheckResult {
        self.enter(Node::Method(method), |this| {
            check_function(method)?;
            this.visit_stmts(&method.body)
        })
    }

    fn visit_expr(&mut self, expr: &'ast Expr) -> CheckResult {
        self.enter(Node::Expr(expr), |this| {
            this.check_expr(expr)?;
            let mut result = Ok(());
            expr.for_each_child(|child| {
                if result.is_ok() {
                    result = this.visit_expr(child);
                }
            });
            result
        })
    }

    fn walk_stmt(&mut self, stmt: &'ast Stmt) -> CheckResult {
        match stmt {
            Stmt::Expr(expr) | Stmt::Print(expr) => self.visit_expr(expr),
            Stmt::VarDef { value, .. } => self.visit_expr(value),
            Stmt::Block(stmts) => self.visit_stmts(stmts),
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.visit_expr(cond)?;
                self.visit_stmt(then_branch)?;
                match else_branch {
                    Some(else_branch) => self.visit_stmt(else_branch),
                    None => Ok(()),
                }
            }
            Stmt::While { cond, body } => {
                self.visit_expr(cond)?;
                self.visit_stmt(body)
            }
            Stmt::Function(decl) => self.visit_stmts(&decl.body),
            Stmt::Class(decl) => decl
                .methods
                .iter()
                .try_for_each(|method| self.visit_method(method)),
            Stmt::Return(value) => match value {
                Some(value) => self.visit_expr(value),
                None => Ok(()),
            },
        }
    }

    fn check_stmt(&self, stmt: &'ast Stmt) -> CheckResult {
        match stmt {
            Stmt::VarDef { name, value } => {
                check_name(name)?;
                if !self.cursor.is_top_level() && value.references(name) {
                    return Err(SemanticError::new(
                        SemanticErrorKind::SelfReferentialInitializer,
                        name.clone(),
                    ));
                }
                Ok(())
            }
            Stmt::Block(stmts) => check_unique_declarations(stmts),
            Stmt::Function(decl) => {
                check_name(&decl.name)?;
                check_function(decl)
            }
            Stmt::Class(decl) => check_class(decl),
            Stmt::Return(value) => {
                let Some(scope) = self.cursor.enclosing_function() else {
                    return Err(SemanticError::new(
                        SemanticErrorKind::ReturnOutsideFunction,
                        "return",
                    ));
                };
                if value.is_some() && scope.is_initializer() {
                    return Err(SemanticError::new(
                        SemanticErrorKind::ReturnValueFromInit,
                        "return",
                    ));
                }
                Ok(())
            }
            Stmt::Expr(_) | Stmt::Print(_) | Stmt::If { .. } | Stmt::While { .. } => Ok(()),
        }
    }

    fn check_expr(&self, expr: &'ast Expr) -> CheckResult {
        match expr {
            Expr::Var(name) | Expr::Assign { name, .. } => check_name(name),
            Expr::This => {
                if self.cursor.enclosing_class().is_none() {
                    return Err(SemanticError::new(SemanticErrorKind::InvalidThis, "this"));
                }
                Ok(())
            }
            Expr::Super { .. } => match self.cursor.enclosing_class() {
                None => Err(SemanticError::new(SemanticErrorKind::InvalidSuper, "super")),
                Some(class) if class.base.is_none() => Err(SemanticError::new(
                    SemanticErrorKind::SuperWithoutBase,
                    "super",
                )),
                Some(_) => Ok(()),
            },
            Expr::Literal(_)
            | Expr::Binary { .. }
            | Expr::Logical { .. }
            | Expr::Unary { .. }
            | Expr::Call { .. }
            | Expr::Getattr { .. }
            | Expr::Setattr { .. } => Ok(()),
        }
    }
}

fn check_name(name: &Name) -> CheckResult {
    if is_keyword(name) {
        return Err(SemanticError::new(
            SemanticErrorKind::ReservedName,
            name.clone(),
        ));
    }
    Ok(())
}

/// No two `var` declarations directly in `stmts` may share a name.
fn check_unique_declarations(stmts: &[Stmt]) -> CheckResult {
    let mut seen = FxHashSet::default();
    for stmt in stmts {
        if let Stmt::VarDef { name, .. } = stmt {
            if !seen.insert(name) {
                return Err(SemanticError::new(
                    SemanticErrorKind::DuplicateVariable,
                    name.clone(),
                ));
            }
        }
    }
    Ok(())
}

/// Parameter and body-level checks shared by functions and methods.
fn check_function(decl: &FunctionDecl) -> CheckResult {
    let mut params = FxHashSet::default();
    for param in &decl.params {
        check_name(param)?;
        if !params.insert(param) {
            return Err(SemanticError::new(
                SemanticErrorKind::DuplicateParameter,
                param.clone(),
            ));
        }
    }

    for stmt in &decl.body {
        if let Stmt::VarDef { name, .. } = stmt {
            if params.contains(name) {
                return Err(SemanticError::new(
                    SemanticErrorKind::ParameterShadowed,
                    name.clone(),
                ));
            }
        }
    }

    // The body shares one scope with the parameters, like a block.
    check_unique_declarations(&decl.body)
}

fn check_class(decl: &ClassDecl) -> CheckResult {
    check_name(&decl.name)?;
    if let Some(base) = &decl.base {
        check_name(base)?;
        if *base == decl.name {
            return Err(SemanticError::new(
                SemanticErrorKind::SelfInheritance,
                decl.name.clone(),
            ));
        }
    }
    decl.methods
        .iter()
        .try_for_each(|method| check_name(&method.name))
}
