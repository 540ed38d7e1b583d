//! Programs that pass validation but fail while running.

use lox_eval::{buffer_handler, EvalErrorKind, Interpreter};
use lox_ir::build::*;
use lox_ir::{BinaryOp, Program, Stmt};
use loxc::{run_in, RunError};
use pretty_assertions::assert_eq;

use crate::common::failing;

fn runtime_error(stmts: Vec<Stmt>) -> (String, lox_eval::EvalError) {
    let (out, err) = failing(stmts);
    match err {
        RunError::Runtime(err) => (out, err),
        RunError::Semantic(err) => panic!("expected a runtime error, got {err}"),
    }
}

#[test]
fn adding_number_and_string() {
    let (out, err) = runtime_error(vec![
        print(string("first")),
        print(binary(BinaryOp::Add, num(1.0), string("b"))),
        print(string("never")),
    ]);
    assert_eq!(out, "first\n");
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
    assert_eq!(
        err.to_diagnostic().to_string(),
        "error [E6004]: operands must be two numbers or two strings\n  = note: got number and string"
    );
}

#[test]
fn undefined_variable() {
    let (_, err) = runtime_error(vec![print(var("ghost"))]);
    assert_eq!(err.to_string(), "undefined variable 'ghost'");
}

#[test]
fn calling_a_number() {
    let (_, err) = runtime_error(vec![expr_stmt(call(num(1.0), vec![]))]);
    assert_eq!(err.kind, EvalErrorKind::NotCallable { type_name: "number" });
}

#[test]
fn attribute_on_string() {
    let (_, err) = runtime_error(vec![print(getattr(string("s"), "len"))]);
    assert_eq!(err.kind, EvalErrorKind::NotAnInstance { type_name: "string" });
}

#[test]
fn wrong_argument_count() {
    let (_, err) = runtime_error(vec![
        function("pair", &["a", "b"], vec![]),
        expr_stmt(call(var("pair"), vec![num(1.0)])),
    ]);
    assert_eq!(err.to_string(), "pair expects 2 argument(s), got 1");
}

#[test]
fn builtin_rejects_wrong_type() {
    let (_, err) = runtime_error(vec![print(call(var("sqrt"), vec![string("four")]))]);
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
}

#[test]
fn error_inside_method_carries_backtrace() {
    let (_, err) = runtime_error(vec![
        class(
            "Broken",
            None,
            vec![method("explode", &[], vec![expr_stmt(var("nothing_here"))])],
        ),
        function(
            "trigger",
            &[],
            vec![expr_stmt(method_call(call(var("Broken"), vec![]), "explode", vec![]))],
        ),
        expr_stmt(call(var("trigger"), vec![])),
    ]);
    let diagnostic = err.to_diagnostic().to_string();
    assert_eq!(
        diagnostic,
        "error [E6001]: undefined variable 'nothing_here'\n  = note: in explode\n  = note: in trigger"
    );
}

#[test]
fn runaway_recursion_hits_call_depth_limit() {
    let program = Program::new(vec![
        function(
            "down",
            &["n"],
            vec![return_value(call(
                var("down"),
                vec![binary(BinaryOp::Add, var("n"), num(1.0))],
            ))],
        ),
        expr_stmt(call(var("down"), vec![num(0.0)])),
    ]);
    let mut interpreter = Interpreter::builder()
        .print_handler(buffer_handler())
        .max_call_depth(Some(64))
        .build();

    let err = run_in(&mut interpreter, &program).unwrap_err();

    let RunError::Runtime(err) = err else {
        panic!("expected a runtime error");
    };
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 64 });
    assert_eq!(err.to_string(), "maximum call depth exceeded (limit: 64)");
}
