//! Programs rejected before evaluation starts.

use lox_check::SemanticErrorKind;
use lox_diagnostic::ErrorCode;
use lox_ir::build::*;
use lox_ir::Stmt;
use loxc::RunError;
use pretty_assertions::assert_eq;

use crate::common::failing;

fn rejected(stmts: Vec<Stmt>) -> SemanticErrorKind {
    let (out, err) = failing(stmts);
    assert_eq!(out, "", "nothing runs when validation fails");
    match err {
        RunError::Semantic(err) => err.kind,
        RunError::Runtime(err) => panic!("expected a semantic error, got {err}"),
    }
}

#[test]
fn this_at_top_level() {
    let kind = rejected(vec![print(string("before")), print(this())]);
    assert_eq!(kind, SemanticErrorKind::InvalidThis);
}

#[test]
fn super_in_class_without_base() {
    let kind = rejected(vec![class(
        "A",
        None,
        vec![method("m", &[], vec![expr_stmt(call(super_method("m"), vec![]))])],
    )]);
    assert_eq!(kind, SemanticErrorKind::SuperWithoutBase);
}

#[test]
fn return_at_top_level() {
    let kind = rejected(vec![print(num(1.0)), return_nil()]);
    assert_eq!(kind, SemanticErrorKind::ReturnOutsideFunction);
}

#[test]
fn return_value_from_init() {
    let kind = rejected(vec![class(
        "A",
        None,
        vec![method("init", &[], vec![return_value(num(1.0))])],
    )]);
    assert_eq!(kind, SemanticErrorKind::ReturnValueFromInit);
}

#[test]
fn reserved_word_as_name() {
    let kind = rejected(vec![var_def("while", num(1.0))]);
    assert_eq!(kind, SemanticErrorKind::ReservedName);
}

#[test]
fn duplicate_declaration_in_block() {
    let kind = rejected(vec![block(vec![var_def("a", num(1.0)), var_def("a", num(2.0))])]);
    assert_eq!(kind, SemanticErrorKind::DuplicateVariable);
}

#[test]
fn self_referential_local_initializer() {
    let kind = rejected(vec![block(vec![var_def("a", var("a"))])]);
    assert_eq!(kind, SemanticErrorKind::SelfReferentialInitializer);
}

#[test]
fn class_inheriting_from_itself() {
    let kind = rejected(vec![class("A", Some("A"), vec![])]);
    assert_eq!(kind, SemanticErrorKind::SelfInheritance);
}

#[test]
fn semantic_errors_render_with_their_code() {
    let (_, err) = failing(vec![print(this())]);
    assert_eq!(err.code(), ErrorCode::E1002);
    assert_eq!(
        err.to_diagnostic().to_string(),
        "error [E1002]: 'this' used outside of a class method"
    );
}
