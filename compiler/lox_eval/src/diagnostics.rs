//! Live call stack for runtime backtraces and the optional depth limit.

use lox_ir::Name;

use crate::errors::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// One active call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Function, method or class name.
    pub name: Name,
}

impl CallFrame {
    pub fn new(name: Name) -> Self {
        CallFrame { name }
    }
}

/// Frames of the calls currently executing, outermost first.
///
/// Each call runs in a child interpreter that owns a clone of its caller's
/// stack with one more frame pushed, so nothing needs popping when a call
/// unwinds through an error.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` of `None` means unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing with `StackOverflow` if the limit is reached.
    /// The frame is not pushed on failure.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Snapshot of the stack, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: f.name.to_string(),
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace unless the error already carries one from a
    /// deeper frame.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    /// Unlimited depth.
    fn default() -> Self {
        Self::new(None)
    }
}
