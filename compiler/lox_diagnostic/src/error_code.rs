use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Semantic (validation) errors
/// - E6xxx: Runtime errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Semantic Errors (E1xxx)
    /// Reserved word used as a name
    E1001,
    /// `this` outside a class method
    E1002,
    /// `super` outside a class method
    E1003,
    /// `super` in a class without a base
    E1004,
    /// `return` outside a function
    E1005,
    /// `return` with a value inside an initializer
    E1006,
    /// Variable declared twice in one block
    E1007,
    /// Parameter declared twice
    E1008,
    /// Local variable shadows a parameter
    E1009,
    /// Variable read in its own initializer
    E1010,
    /// Class inherits from itself
    E1011,

    // Runtime Errors (E6xxx)
    /// Undefined name
    E6001,
    /// Duplicate declaration in a scope
    E6002,
    /// Assignment to a read-only binding
    E6003,
    /// Operand type mismatch
    E6004,
    /// Attribute access on a non-instance
    E6005,
    /// Call of a non-callable value
    E6006,
    /// Wrong number of arguments
    E6007,
    /// Method not found in class hierarchy
    E6008,
    /// Undefined attribute on instance
    E6009,
    /// Superclass is not a class
    E6010,
    /// Builtin function failure
    E6011,
    /// Recursion limit exceeded
    E6012,
}

impl ErrorCode {
    /// Check if this is a semantic error (E1xxx range).
    pub fn is_semantic_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a runtime error (E6xxx range).
    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Semantic
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            // Runtime
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
