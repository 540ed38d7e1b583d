//! Semantic errors raised by the validator.

use std::fmt;

use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::Name;

/// Typed category of a semantic error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SemanticErrorKind {
    /// Reserved word used as a name.
    ReservedName,
    /// `this` outside a class method.
    InvalidThis,
    /// `super` outside a class method.
    InvalidSuper,
    /// `super` inside a class that declares no base.
    SuperWithoutBase,
    /// `return` outside a function or method body.
    ReturnOutsideFunction,
    /// `return value` inside a class's `init` method.
    ReturnValueFromInit,
    /// Two variable declarations with one name in the same block.
    DuplicateVariable,
    /// Two parameters with one name.
    DuplicateParameter,
    /// A local variable declaration reusing a parameter name.
    ParameterShadowed,
    /// A variable read inside its own initializer.
    SelfReferentialInitializer,
    /// A class naming itself as its base.
    SelfInheritance,
}

impl SemanticErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            Self::ReservedName => ErrorCode::E1001,
            Self::InvalidThis => ErrorCode::E1002,
            Self::InvalidSuper => ErrorCode::E1003,
            Self::SuperWithoutBase => ErrorCode::E1004,
            Self::ReturnOutsideFunction => ErrorCode::E1005,
            Self::ReturnValueFromInit => ErrorCode::E1006,
            Self::DuplicateVariable => ErrorCode::E1007,
            Self::DuplicateParameter => ErrorCode::E1008,
            Self::ParameterShadowed => ErrorCode::E1009,
            Self::SelfReferentialInitializer => ErrorCode::E1010,
            Self::SelfInheritance => ErrorCode::E1011,
        }
    }
}

/// A structural violation, carrying the offending token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    /// The name or keyword that triggered the error.
    pub token: Name,
}

impl SemanticError {
    pub fn new(kind: SemanticErrorKind, token: impl Into<Name>) -> Self {
        SemanticError {
            kind,
            token: token.into(),
        }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code()).with_message(self.to_string())
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = &self.token;
        match self.kind {
            SemanticErrorKind::ReservedName => {
                write!(f, "reserved word '{token}' cannot be used as a name")
            }
            SemanticErrorKind::InvalidThis => write!(f, "'this' used outside of a class method"),
            SemanticErrorKind::InvalidSuper => {
                write!(f, "'super' used outside of a class method")
            }
            SemanticErrorKind::SuperWithoutBase => {
                write!(f, "'super' used in a class with no superclass")
            }
            SemanticErrorKind::ReturnOutsideFunction => {
                write!(f, "'return' used outside of a function")
            }
            SemanticErrorKind::ReturnValueFromInit => {
                write!(f, "cannot return a value from an initializer")
            }
            SemanticErrorKind::DuplicateVariable => {
                write!(f, "variable '{token}' is already declared in this block")
            }
            SemanticErrorKind::DuplicateParameter => write!(f, "duplicate parameter '{token}'"),
            SemanticErrorKind::ParameterShadowed => {
                write!(f, "local variable '{token}' shadows a parameter")
            }
            SemanticErrorKind::SelfReferentialInitializer => {
                write!(f, "variable '{token}' is read in its own initializer")
            }
            SemanticErrorKind::SelfInheritance => {
                write!(f, "class '{token}' cannot inherit from itself")
            }
        }
    }
}

impl std::error::Error for SemanticError {}
