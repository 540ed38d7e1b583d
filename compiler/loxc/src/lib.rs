//! Lox driver.
//!
//! Ties the phases together: a program is validated by `lox_check` and, if
//! it passes, evaluated by `lox_eval`. Nothing runs when validation fails.
//!
//! ```text
//! let output = loxc::run_to_string(&program)?;
//! ```

use std::sync::Once;

use lox_check::{validate, SemanticError};
use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_eval::{buffer_handler, EvalError, Interpreter, SharedPrintHandler};
use lox_ir::Program;
use thiserror::Error;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Why a run stopped.
#[derive(Error, Debug)]
pub enum RunError {
    /// The program was rejected before evaluation.
    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),
    /// Evaluation failed.
    #[error("runtime error: {0}")]
    Runtime(#[from] EvalError),
}

impl RunError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RunError::Semantic(err) => err.code(),
            RunError::Runtime(err) => err.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RunError::Semantic(err) => err.to_diagnostic(),
            RunError::Runtime(err) => err.to_diagnostic(),
        }
    }
}

/// Validate `program`, then run it with `print` writing to `handler`.
pub fn run(program: &Program, handler: SharedPrintHandler) -> Result<(), RunError> {
    let mut interpreter = Interpreter::builder().print_handler(handler).build();
    run_in(&mut interpreter, program)
}

/// Validate `program`, then run it in an existing interpreter.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run_in(interpreter: &mut Interpreter, program: &Program) -> Result<(), RunError> {
    if let Err(err) = validate(program) {
        tracing::warn!(code = %err.code(), error = %err, "program rejected");
        return Err(err.into());
    }
    interpreter.execute(program)?;
    Ok(())
}

/// Run `program` and return everything it printed.
pub fn run_to_string(program: &Program) -> Result<String, RunError> {
    let handler = buffer_handler();
    run(program, SharedPrintHandler::clone(&handler))?;
    Ok(handler.get_output())
}
