//! Whole programs and their output.

use lox_ir::build::*;
use lox_ir::{BinaryOp, UnaryOp};
use pretty_assertions::assert_eq;

use crate::common::output;

#[test]
fn block_shadowing() {
    // var a = 1; { var a = 2; print a; } print a;
    let out = output(vec![
        var_def("a", num(1.0)),
        block(vec![var_def("a", num(2.0)), print(var("a"))]),
        print(var("a")),
    ]);
    assert_eq!(out, "2\n1\n");
}

#[test]
fn bare_return_prints_nil() {
    // fun f() { return; } print f();
    let out = output(vec![
        function("f", &[], vec![return_nil()]),
        print(call(var("f"), vec![])),
    ]);
    assert_eq!(out, "nil\n");
}

#[test]
fn string_concatenation() {
    let out = output(vec![print(binary(BinaryOp::Add, string("a"), string("b")))]);
    assert_eq!(out, "ab\n");
}

#[test]
fn number_formatting() {
    let out = output(vec![
        print(num(4.0)),
        print(num(2.5)),
        print(binary(BinaryOp::Mul, num(0.1), num(3.0))),
        print(unary(UnaryOp::Neg, num(0.5))),
    ]);
    assert_eq!(out, "4\n2.5\n0.30000000000000004\n-0.5\n");
}

#[test]
fn division_edge_cases() {
    let out = output(vec![
        print(binary(BinaryOp::Div, num(0.0), num(0.0))),
        print(binary(BinaryOp::Div, num(1.0), num(0.0))),
        print(binary(BinaryOp::Div, num(-1.0), num(0.0))),
    ]);
    assert_eq!(out, "nan\ninf\n-inf\n");
}

#[test]
fn equality_across_kinds() {
    let out = output(vec![
        print(binary(BinaryOp::Eq, num(1.0), string("1"))),
        print(binary(BinaryOp::NotEq, nil(), boolean(false))),
        print(binary(BinaryOp::Eq, string("x"), string("x"))),
    ]);
    assert_eq!(out, "false\ntrue\ntrue\n");
}

#[test]
fn truthiness() {
    let out = output(vec![
        if_else(num(0.0), print(string("0 is truthy")), print(string("no"))),
        if_else(string(""), print(string("empty is truthy")), print(string("no"))),
        if_else(nil(), print(string("no")), print(string("nil is falsy"))),
    ]);
    assert_eq!(out, "0 is truthy\nempty is truthy\nnil is falsy\n");
}

#[test]
fn for_loop_sum() {
    // var sum = 0; for (var i = 1; i <= 4; i = i + 1) sum = sum + i; print sum;
    let out = output(vec![
        var_def("sum", num(0.0)),
        for_loop(
            Some(var_def("i", num(1.0))),
            Some(binary(BinaryOp::LtEq, var("i"), num(4.0))),
            Some(assign("i", binary(BinaryOp::Add, var("i"), num(1.0)))),
            expr_stmt(assign("sum", binary(BinaryOp::Add, var("sum"), var("i")))),
        ),
        print(var("sum")),
    ]);
    assert_eq!(out, "10\n");
}

#[test]
fn closures_share_captured_scope() {
    // fun make() { var n = 0; fun inc() { n = n + 1; } fun get() { return n; } ... }
    let make = function(
        "make",
        &[],
        vec![
            var_def("n", num(0.0)),
            function(
                "inc",
                &[],
                vec![expr_stmt(assign("n", binary(BinaryOp::Add, var("n"), num(1.0))))],
            ),
            function("get", &[], vec![return_value(var("n"))]),
            var_def("pair", call(var("Pair"), vec![var("inc"), var("get")])),
            return_value(var("pair")),
        ],
    );
    let pair = class(
        "Pair",
        None,
        vec![method(
            "init",
            &["a", "b"],
            vec![
                expr_stmt(setattr(this(), "a", var("a"))),
                expr_stmt(setattr(this(), "b", var("b"))),
            ],
        )],
    );
    let out = output(vec![
        pair,
        make,
        var_def("p", call(var("make"), vec![])),
        expr_stmt(method_call(var("p"), "a", vec![])),
        expr_stmt(method_call(var("p"), "a", vec![])),
        print(method_call(var("p"), "b", vec![])),
    ]);
    assert_eq!(out, "2\n");
}

#[test]
fn closure_observes_reassignment() {
    let out = output(vec![
        var_def("greeting", string("hello")),
        function("greet", &[], vec![print(var("greeting"))]),
        expr_stmt(assign("greeting", string("bye"))),
        expr_stmt(call(var("greet"), vec![])),
    ]);
    assert_eq!(out, "bye\n");
}

#[test]
fn distinct_functions_are_not_equal() {
    let out = output(vec![
        function("a", &[], vec![return_value(num(1.0))]),
        function("b", &[], vec![return_value(num(1.0))]),
        print(binary(BinaryOp::Eq, var("a"), var("b"))),
        print(binary(BinaryOp::Eq, var("a"), var("a"))),
    ]);
    assert_eq!(out, "false\ntrue\n");
}

#[test]
fn builtins_are_callable_values() {
    let out = output(vec![
        var_def("root", var("sqrt")),
        print(call(var("root"), vec![num(9.0)])),
        print(call(var("max"), vec![num(-1.0), num(7.0)])),
        print(call(var("is_even"), vec![num(3.0)])),
        print(var("max")),
    ]);
    assert_eq!(out, "3\n7\nfalse\n<native fn>\n");
}

