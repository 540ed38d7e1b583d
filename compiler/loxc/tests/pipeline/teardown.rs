//! Programs that build and free long linked structures.

use lox_ir::build::*;
use lox_ir::{BinaryOp, Stmt};
use pretty_assertions::assert_eq;

use crate::common::output;

const NODES: f64 = 100_000.0;

fn increment(name: &str) -> Stmt {
    expr_stmt(assign(name, binary(BinaryOp::Add, var(name), num(1.0))))
}

#[test]
fn linked_list_is_freed_when_the_call_returns() {
    // class Node { init(next) { this.next = next; } }
    // fun build(n) { var head = nil; var i = 0; while (i < n) { head = Node(head); i = i + 1; } return i; }
    // print build(100000);
    let out = output(vec![
        class(
            "Node",
            None,
            vec![method("init", &["next"], vec![expr_stmt(setattr(this(), "next", var("next")))])],
        ),
        function(
            "build",
            &["n"],
            vec![
                var_def("head", nil()),
                var_def("i", num(0.0)),
                while_loop(
                    binary(BinaryOp::Lt, var("i"), var("n")),
                    block(vec![
                        expr_stmt(assign("head", call(var("Node"), vec![var("head")]))),
                        increment("i"),
                    ]),
                ),
                return_value(var("i")),
            ],
        ),
        print(call(var("build"), vec![num(NODES)])),
    ]);
    assert_eq!(out, "100000\n");
}

#[test]
fn closure_chain_is_freed_when_the_call_returns() {
    // fun wrap(f) { fun g() { return f; } return g; }
    // fun build(n) { var f = nil; var i = 0; while (i < n) { f = wrap(f); i = i + 1; } return i; }
    // print build(100000);
    let out = output(vec![
        function(
            "wrap",
            &["f"],
            vec![
                function("g", &[], vec![return_value(var("f"))]),
                return_value(var("g")),
            ],
        ),
        function(
            "build",
            &["n"],
            vec![
                var_def("f", nil()),
                var_def("i", num(0.0)),
                while_loop(
                    binary(BinaryOp::Lt, var("i"), var("n")),
                    block(vec![
                        expr_stmt(assign("f", call(var("wrap"), vec![var("f")]))),
                        increment("i"),
                    ]),
                ),
                return_value(var("i")),
            ],
        ),
        print(call(var("build"), vec![num(NODES)])),
    ]);
    assert_eq!(out, "100000\n");
}
