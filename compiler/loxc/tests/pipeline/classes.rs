//! Instances, inheritance and `super`.

use lox_ir::build::*;
use lox_ir::BinaryOp;
use pretty_assertions::assert_eq;

use crate::common::output;

#[test]
fn inherited_init_and_method() {
    // class A { init(x) { this.x = x; } get() { return this.x; } }
    // class B < A {}
    // print B(5).get();
    let out = output(vec![
        class(
            "A",
            None,
            vec![
                method("init", &["x"], vec![expr_stmt(setattr(this(), "x", var("x")))]),
                method("get", &[], vec![return_value(getattr(this(), "x"))]),
            ],
        ),
        class("B", Some("A"), vec![]),
        print(method_call(call(var("B"), vec![num(5.0)]), "get", vec![])),
    ]);
    assert_eq!(out, "5\n");
}

#[test]
fn override_and_super() {
    let out = output(vec![
        class(
            "Animal",
            None,
            vec![
                method("init", &["name"], vec![expr_stmt(setattr(this(), "name", var("name")))]),
                method(
                    "speak",
                    &[],
                    vec![return_value(binary(
                        BinaryOp::Add,
                        getattr(this(), "name"),
                        string(" makes a sound"),
                    ))],
                ),
            ],
        ),
        class(
            "Dog",
            Some("Animal"),
            vec![method(
                "speak",
                &[],
                vec![return_value(binary(
                    BinaryOp::Add,
                    call(super_method("speak"), vec![]),
                    string(" (woof)"),
                ))],
            )],
        ),
        print(method_call(call(var("Dog"), vec![string("Rex")]), "speak", vec![])),
        print(method_call(call(var("Animal"), vec![string("Cat")]), "speak", vec![])),
    ]);
    assert_eq!(out, "Rex makes a sound (woof)\nCat makes a sound\n");
}

#[test]
fn show_of_classes_and_instances() {
    let out = output(vec![
        class("Point", None, vec![method("len", &[], vec![return_value(num(0.0))])]),
        var_def("p", call(var("Point"), vec![])),
        print(var("Point")),
        print(var("p")),
        print(getattr(var("p"), "len")),
    ]);
    assert_eq!(out, "Point\nPoint instance\n<fn len>\n");
}

#[test]
fn fields_shadow_methods() {
    let out = output(vec![
        class("Box", None, vec![method("value", &[], vec![return_value(string("method"))])]),
        var_def("b", call(var("Box"), vec![])),
        expr_stmt(setattr(var("b"), "value", string("field"))),
        print(getattr(var("b"), "value")),
    ]);
    assert_eq!(out, "field\n");
}

#[test]
fn methods_see_this_in_nested_closures() {
    // class Counter { init() { this.n = 0; } adder() { fun add() { this.n = this.n + 1; } return add; } }
    let out = output(vec![
        class(
            "Counter",
            None,
            vec![
                method("init", &[], vec![expr_stmt(setattr(this(), "n", num(0.0)))]),
                method(
                    "adder",
                    &[],
                    vec![
                        function(
                            "add",
                            &[],
                            vec![expr_stmt(setattr(
                                this(),
                                "n",
                                binary(BinaryOp::Add, getattr(this(), "n"), num(1.0)),
                            ))],
                        ),
                        return_value(var("add")),
                    ],
                ),
            ],
        ),
        var_def("c", call(var("Counter"), vec![])),
        var_def("add", method_call(var("c"), "adder", vec![])),
        expr_stmt(call(var("add"), vec![])),
        expr_stmt(call(var("add"), vec![])),
        print(getattr(var("c"), "n")),
    ]);
    assert_eq!(out, "2\n");
}

#[test]
fn calling_init_directly_returns_the_instance() {
    let out = output(vec![
        class("A", None, vec![method("init", &[], vec![])]),
        var_def("a", call(var("A"), vec![])),
        print(binary(BinaryOp::Eq, method_call(var("a"), "init", vec![]), var("a"))),
    ]);
    assert_eq!(out, "true\n");
}
