//! Runtime errors raised during evaluation.
//!
//! `EvalErrorKind` is the typed category; `EvalError` adds the rendered
//! message, an optional call-stack backtrace and context notes. Construct
//! errors through the `#[cold]` factory functions below rather than by hand,
//! so that `kind` and `message` always agree.

use std::fmt;

use lox_diagnostic::{Diagnostic, ErrorCode};

use crate::value::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category for structured diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Scope
    UndefinedName {
        name: String,
    },
    DuplicateDeclaration {
        name: String,
    },
    ImmutableBinding {
        name: String,
    },

    // Operators
    TypeMismatch {
        message: String,
    },

    // Objects
    NotAnInstance {
        type_name: &'static str,
    },
    MethodNotFound {
        class: String,
        method: String,
    },
    UndefinedAttribute {
        class: String,
        attr: String,
    },
    InvalidSuperclass {
        name: String,
    },

    // Calls
    NotCallable {
        type_name: &'static str,
    },
    ArityError {
        name: String,
        expected: usize,
        got: usize,
        /// `expected` is a lower bound rather than an exact count.
        at_least: bool,
    },
    NativeError {
        function: String,
        message: String,
    },
    StackOverflow {
        depth: usize,
    },
}

impl EvalErrorKind {
    /// Stable diagnostic code for this category.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UndefinedName { .. } => ErrorCode::E6001,
            Self::DuplicateDeclaration { .. } => ErrorCode::E6002,
            Self::ImmutableBinding { .. } => ErrorCode::E6003,
            Self::TypeMismatch { .. } => ErrorCode::E6004,
            Self::NotAnInstance { .. } => ErrorCode::E6005,
            Self::NotCallable { .. } => ErrorCode::E6006,
            Self::ArityError { .. } => ErrorCode::E6007,
            Self::MethodNotFound { .. } => ErrorCode::E6008,
            Self::UndefinedAttribute { .. } => ErrorCode::E6009,
            Self::InvalidSuperclass { .. } => ErrorCode::E6010,
            Self::NativeError { .. } => ErrorCode::E6011,
            Self::StackOverflow { .. } => ErrorCode::E6012,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedName { name } => write!(f, "undefined variable '{name}'"),
            Self::DuplicateDeclaration { name } => {
                write!(f, "variable '{name}' is already declared in this scope")
            }
            Self::ImmutableBinding { name } => {
                write!(f, "cannot assign to builtin '{name}'")
            }
            Self::TypeMismatch { message } => write!(f, "{message}"),
            Self::NotAnInstance { type_name } => {
                write!(f, "only instances have attributes, got {type_name}")
            }
            Self::MethodNotFound { class, method } => {
                write!(f, "undefined method '{method}' on class {class}")
            }
            Self::UndefinedAttribute { class, attr } => {
                write!(f, "undefined attribute '{attr}' on {class} instance")
            }
            Self::InvalidSuperclass { name } => {
                write!(f, "superclass '{name}' must be a class")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::ArityError {
                name,
                expected,
                got,
                at_least,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                let bound = if *at_least { "at least " } else { "" };
                write!(f, "{name} expects {bound}{expected} {arg_word}, got {got}")
            }
            Self::NativeError { function, message } => write!(f, "{function}: {message}"),
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }
        }
    }
}

/// Additional context attached to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function, method or class name.
    pub name: String,
}

/// Immutable snapshot of the call stack at an error site, most recent call
/// first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {}", frame.name)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Call stack at the error site, attached by the innermost call frame
    /// the error escapes from. `None` for errors raised at top level.
    pub backtrace: Option<EvalBacktrace>,
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            backtrace: None,
            notes: Vec::new(),
        }
    }

    /// Attach a backtrace to this error.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Add a context note to this error.
    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Render as a diagnostic, turning notes and backtrace frames into
    /// diagnostic notes.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diagnostic = Diagnostic::error(self.code()).with_message(self.message.clone());
        for note in &self.notes {
            diagnostic = diagnostic.with_note(note.message.clone());
        }
        if let Some(backtrace) = &self.backtrace {
            for frame in backtrace.frames() {
                diagnostic = diagnostic.with_note(format!("in {}", frame.name));
            }
        }
        diagnostic
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Scope Errors

/// Name not bound anywhere in the scope chain.
#[cold]
pub fn undefined_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedName {
        name: name.to_string(),
    })
}

/// Name declared twice in one non-global scope.
#[cold]
pub fn duplicate_declaration(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateDeclaration {
        name: name.to_string(),
    })
}

/// Assignment to a read-only binding.
#[cold]
pub fn immutable_binding(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImmutableBinding {
        name: name.to_string(),
    })
}

// Operator Errors

/// `+` applied to anything but two numbers or two strings.
#[cold]
pub fn operands_not_addable(left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        message: "operands must be two numbers or two strings".to_string(),
    })
    .with_note(EvalNote::new(format!("got {left} and {right}")))
}

/// Arithmetic or comparison operator applied to a non-number.
#[cold]
pub fn operation_requires_numbers(left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        message: "operation requires numbers".to_string(),
    })
    .with_note(EvalNote::new(format!("got {left} and {right}")))
}

/// Unary `-` applied to a non-number.
#[cold]
pub fn operand_must_be_number(got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        message: "operand must be a number".to_string(),
    })
    .with_note(EvalNote::new(format!("got {got}")))
}

/// Builtin argument of the wrong type.
#[cold]
pub fn wrong_arg_type(function: &str, expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        message: format!("{function} expects a {expected} argument, got {got}"),
    })
}

// Object Errors

/// Attribute access on a value that is not an instance.
#[cold]
pub fn not_an_instance(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnInstance { type_name })
}

/// Method missing from a class and all of its ancestors.
#[cold]
pub fn method_not_found(class: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MethodNotFound {
        class: class.to_string(),
        method: method.to_string(),
    })
}

/// Neither a field nor a method.
#[cold]
pub fn undefined_attribute(class: &str, attr: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedAttribute {
        class: class.to_string(),
        attr: attr.to_string(),
    })
}

/// Base class name bound to something other than a class.
#[cold]
pub fn invalid_superclass(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidSuperclass {
        name: name.to_string(),
    })
}

// Call Errors

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

/// Wrong number of arguments for a fixed-arity callable.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityError {
        name: name.to_string(),
        expected,
        got,
        at_least: false,
    })
}

/// Too few arguments for a variadic callable.
#[cold]
pub fn too_few_arguments(name: &str, min: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityError {
        name: name.to_string(),
        expected: min,
        got,
        at_least: true,
    })
}

/// A builtin failed for a reason other than its arguments.
#[cold]
pub fn native_error(function: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NativeError {
        function: function.to_string(),
        message: message.into(),
    })
}

/// Configured call depth exceeded.
#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}
