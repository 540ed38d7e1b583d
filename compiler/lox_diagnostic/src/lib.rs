//! Diagnostic system shared by the validator and the evaluator.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Notes (where it went wrong, e.g. a call backtrace)

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
