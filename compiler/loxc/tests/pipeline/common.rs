//! Run helpers shared by the pipeline tests.

use lox_eval::buffer_handler;
use lox_ir::{Program, Stmt};
use loxc::{run, RunError};

/// Output of a run that must succeed.
pub fn output(stmts: Vec<Stmt>) -> String {
    match loxc::run_to_string(&Program::new(stmts)) {
        Ok(output) => output,
        Err(err) => panic!("unexpected failure: {}", err.to_diagnostic()),
    }
}

/// Output printed before the run stopped, and why it stopped.
pub fn failing(stmts: Vec<Stmt>) -> (String, RunError) {
    let handler = buffer_handler();
    let result = run(&Program::new(stmts), handler.clone());
    match result {
        Ok(()) => panic!("expected the run to fail"),
        Err(err) => (handler.get_output(), err),
    }
}
