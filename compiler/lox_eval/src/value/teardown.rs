//! Iterative teardown of runtime object graphs.
//!
//! Instances, classes and scopes point at each other through `Rc`, so the
//! default recursive `Drop` of a long linked structure (a list built from
//! instances, a chain of closure scopes) uses one native stack frame per
//! link. Instead, each owner with children implements `Drop` by moving its
//! children onto a worklist and releasing them in a loop. A child that is
//! still shared elsewhere is just a reference-count decrement.
//!
//! A node taken off the worklist is emptied before it is dropped: its
//! removable children go onto the worklist, and fields that cannot be moved
//! out (an instance's class, a function's closure) get an extra handle
//! queued so that dropping the node never frees them in place. Every nested
//! `Drop` therefore sees an empty node and returns immediately.

use super::{Heap, Value};
use crate::environment::{LocalScope, Scope};

/// A handle waiting to be released.
pub(crate) enum Pending {
    Value(Value),
    Scope(LocalScope<Scope>),
}

/// Release everything in `pending` without recursing through the graph.
pub(crate) fn release(mut pending: Vec<Pending>) {
    while let Some(item) = pending.pop() {
        match item {
            Pending::Value(value) => detach_value(value, &mut pending),
            Pending::Scope(mut scope) => {
                if let Some(scope) = scope.get_mut() {
                    scope.detach_into(&mut pending);
                }
            }
        }
    }
}

/// Empty `value` onto `pending` if this is its last handle, then drop it.
fn detach_value(value: Value, pending: &mut Vec<Pending>) {
    match value {
        Value::Instance(mut instance) => {
            if let Some(instance) = Heap::get_mut(&mut instance) {
                instance.detach_into(pending);
            }
        }
        Value::Class(mut class) => {
            if let Some(class) = Heap::get_mut(&mut class) {
                class.detach_into(pending);
            }
        }
        Value::Function(mut function) => {
            if let Some(function) = Heap::get_mut(&mut function) {
                pending.push(Pending::Scope(function.closure().clone()));
            }
        }
        Value::Nil | Value::Bool(_) | Value::Number(_) | Value::Str(_) | Value::Native(_) => {}
    }
}
