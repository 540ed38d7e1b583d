use std::rc::Rc;

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use lox_ir::{FunctionDecl, Name};

use super::*;
use crate::builtins::BUILTINS;
use crate::environment::{builtins_scope, LocalScope, Scope};
use crate::errors::EvalErrorKind;

fn function(name: &str) -> Function {
    let decl = Rc::new(FunctionDecl::new(name, vec![], vec![]));
    Function::new(decl, builtins_scope(), false)
}

fn class(name: &str, methods: &[&str], base: Option<Heap<Class>>) -> Heap<Class> {
    let methods: FxHashMap<Name, Heap<Function>> = methods
        .iter()
        .map(|m| (Name::new(m), Heap::new(function(m))))
        .collect();
    Heap::new(Class::new(Name::new(name), methods, base))
}

mod show {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn primitives() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::string("hi").to_string(), "hi");
    }

    #[test]
    fn numbers_drop_integral_fraction() {
        assert_eq!(Value::Number(4.0).to_string(), "4");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(0.1).to_string(), "0.1");
    }

    #[test]
    fn large_and_small_numbers_use_exponent_notation() {
        assert_eq!(Value::Number(1e15).to_string(), "1000000000000000");
        assert_eq!(Value::Number(1e16).to_string(), "1e+16");
        assert_eq!(Value::Number(1e21).to_string(), "1e+21");
        assert_eq!(Value::Number(1.5e300).to_string(), "1.5e+300");
        assert_eq!(Value::Number(-2.5e17).to_string(), "-2.5e+17");
        assert_eq!(Value::Number(0.0001).to_string(), "0.0001");
        assert_eq!(Value::Number(1e-5).to_string(), "1e-05");
        assert_eq!(Value::Number(1e-7).to_string(), "1e-07");
        assert_eq!(Value::Number(1.25e-100).to_string(), "1.25e-100");
        assert_eq!(Value::Number(0.0).to_string(), "0");
    }

    #[test]
    fn non_finite_numbers() {
        assert_eq!(Value::Number(f64::NAN).to_string(), "nan");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-inf");
    }

    #[test]
    fn objects() {
        let a = class("A", &["m"], None);
        let instance = Instance::allocate(a.clone());
        assert_eq!(Value::Class(a).to_string(), "A");
        assert_eq!(Value::Instance(instance).to_string(), "A instance");
        assert_eq!(Value::function(function("f")).to_string(), "<fn f>");
        assert_eq!(Value::Native(&BUILTINS[0]).to_string(), "<native fn>");
    }

    #[test]
    fn repr_quotes_strings_only() {
        assert_eq!(Value::string("hi").show_repr(), "\"hi\"");
        assert_eq!(Value::Number(1.0).show_repr(), "1");
        assert_eq!(Value::Nil.show_repr(), "nil");
    }
}

mod equality {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn functions_compare_by_identity() {
        let f = Value::function(function("f"));
        let g = Value::function(function("f"));
        assert_eq!(f.clone(), f);
        assert_ne!(f, g);
    }

    #[test]
    fn classes_and_instances_compare_by_identity() {
        let a = class("A", &[], None);
        assert_eq!(Value::Class(a.clone()), Value::Class(a.clone()));
        assert_ne!(Value::Class(a.clone()), Value::Class(class("A", &[], None)));

        let i = Instance::allocate(a.clone());
        assert_eq!(Value::Instance(i.clone()), Value::Instance(i));
        assert_ne!(
            Value::Instance(Instance::allocate(a.clone())),
            Value::Instance(Instance::allocate(a))
        );
    }

    #[test]
    fn natives_compare_by_identity() {
        assert_eq!(Value::Native(&BUILTINS[0]), Value::Native(&BUILTINS[0]));
        assert_ne!(Value::Native(&BUILTINS[0]), Value::Native(&BUILTINS[1]));
    }
}

mod objects {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn method_resolution_walks_base_chain() {
        let base = class("A", &["m", "n"], None);
        let derived = class("B", &["n"], Some(base.clone()));

        let m = derived.resolve_method("m").ok();
        let base_m = base.find_method("m").cloned();
        assert!(matches!((m, base_m), (Some(a), Some(b)) if Heap::ptr_eq(&a, &b)));

        // Overriding method shadows the base one.
        let (Some(own_n), Some(base_n)) = (derived.find_method("n"), base.find_method("n")) else {
            panic!("both classes define n");
        };
        assert!(!Heap::ptr_eq(own_n, base_n));
    }

    #[test]
    fn missing_method() {
        let derived = class("B", &[], Some(class("A", &[], None)));
        let err = derived.resolve_method("m").err();
        assert_eq!(
            err.map(|e| e.kind),
            Some(EvalErrorKind::MethodNotFound {
                class: "B".to_string(),
                method: "m".to_string(),
            })
        );
    }

    #[test]
    fn fields_shadow_methods() {
        let instance = Instance::allocate(class("A", &["m"], None));
        assert!(matches!(instance.get("m"), Ok(Value::Function(_))));

        instance.set(Name::new("m"), Value::Number(1.0));
        assert_eq!(instance.get("m").ok(), Some(Value::Number(1.0)));
    }

    #[test]
    fn undefined_attribute() {
        let instance = Instance::allocate(class("A", &[], None));
        let err = instance.get("x").err();
        assert_eq!(
            err.map(|e| e.kind),
            Some(EvalErrorKind::UndefinedAttribute {
                class: "A".to_string(),
                attr: "x".to_string(),
            })
        );
    }

    #[test]
    fn bind_adds_this_without_touching_receiver() {
        let method = function("m");
        let instance = Instance::allocate(class("A", &[], None));

        let bound = method.bind(&instance);
        assert_eq!(
            bound.closure().borrow().lookup("this"),
            Some(Value::Instance(instance.clone()))
        );
        assert_eq!(method.closure().borrow().lookup("this"), None);
        assert!(bound
            .closure()
            .borrow()
            .parent()
            .is_some_and(|p| p.ptr_eq(method.closure())));
    }

    #[test]
    fn each_attribute_read_binds_a_new_method() {
        let instance = Instance::allocate(class("A", &["m"], None));
        let first = instance.get("m").ok();
        let second = instance.get("m").ok();
        assert!(first.is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn closure_sees_shared_scope() {
        let scope = LocalScope::new(Scope::global());
        let decl = Rc::new(FunctionDecl::new("f", vec![], vec![]));
        let f = Function::new(decl, scope.clone(), false);
        scope
            .borrow_mut()
            .define(Name::new("late"), Value::Nil, crate::Mutability::Mutable)
            .ok();
        assert_eq!(f.closure().borrow().lookup("late"), Some(Value::Nil));
    }
}

proptest! {
    #[test]
    fn integral_numbers_show_without_fraction(n in -1_000_000i32..1_000_000) {
        prop_assert_eq!(Value::Number(f64::from(n)).to_string(), n.to_string());
    }

    #[test]
    fn strings_are_truthy(s in ".{0,8}") {
        prop_assert!(Value::string(s).is_truthy());
    }
}

#[test]
fn test_truthiness() {
    assert!(!Value::Nil.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Bool(true).is_truthy());
    assert!(Value::Number(0.0).is_truthy());
    assert!(Value::string("").is_truthy());
    assert!(Value::function(function("f")).is_truthy());
}

mod drop_chains {
    use super::*;
    use pretty_assertions::assert_eq;

    const LINKS: usize = 200_000;

    #[test]
    fn long_instance_chain_drops_iteratively() {
        let node = class("Node", &[], None);
        let mut head = Value::Nil;
        for _ in 0..LINKS {
            let instance = Instance::allocate(node.clone());
            instance.set(Name::new("next"), head);
            head = Value::Instance(instance);
        }
        drop(head);
        assert_eq!(Instance::allocate(node).field("next"), None);
    }

    #[test]
    fn long_closure_chain_drops_iteratively() {
        let mut scope = builtins_scope();
        for _ in 0..LINKS {
            let inner = LocalScope::new(Scope::with_parent(scope));
            let captured = Value::function(Function::new(
                Rc::new(FunctionDecl::new("f", vec![], vec![])),
                inner.clone(),
                false,
            ));
            scope = LocalScope::new(Scope::with_bindings(inner, [(Name::new("f"), captured)]));
        }
        drop(scope);
        assert_eq!(builtins_scope().borrow().kind(), crate::ScopeKind::Builtins);
    }

    #[test]
    fn long_class_hierarchy_drops_iteratively() {
        let mut base = class("C0", &["m"], None);
        for i in 1..LINKS {
            base = class(&format!("C{i}"), &[], Some(base));
        }
        assert!(base.base().is_some());
        drop(base);
    }

    #[test]
    fn shared_objects_survive_teardown() {
        let node = class("Node", &[], None);
        let shared = Instance::allocate(node.clone());
        shared.set(Name::new("tag"), Value::string("kept"));
        let owner = Instance::allocate(node);
        owner.set(Name::new("child"), Value::Instance(shared.clone()));

        drop(owner);

        assert_eq!(shared.field("tag"), Some(Value::string("kept")));
    }
}
