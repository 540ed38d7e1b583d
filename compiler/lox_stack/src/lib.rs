//! Stack growth for deeply nested programs.
//!
//! Both the validator walk and the evaluator recurse once per tree level and
//! once per Lox call, so a deeply recursive Lox function would otherwise
//! exhaust the native stack long before any configured recursion limit.
//! Wrap each recursive step in [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`; on WASM the
//! closure is called directly.

/// Grow the stack when less than this much remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
///
/// ```text
/// fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_expr_inner(expr))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
