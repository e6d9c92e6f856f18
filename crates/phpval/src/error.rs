//! Error types for value operations

use thiserror::Error;

/// Main error type for value operations.
///
/// Every failure here is synchronous and local to the call; this layer
/// never logs and never retries. Numeric overflow during parsing is not
/// an error at all (it falls back to the floating representation), and
/// loose-comparison results are ordinary return values.
#[derive(Error, Debug)]
pub enum ValueError {
    /// A value was asked for a view its type cannot supply
    #[error("type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: &'static str,
        /// Actual type received
        got: &'static str,
    },

    /// An object without a string conversion was cast to string
    #[error("object of class {0} could not be converted to string")]
    NotStringable(String),

    /// Two objects with no shared ordering capability were compared
    #[error("objects of class {left} and {right} are not comparable")]
    Incomparable {
        /// Class name of the left operand
        left: String,
        /// Class name of the right operand
        right: String,
    },

    /// Integer division or modulo by zero
    #[error("division by zero")]
    DivisionByZero,

    /// A reference cell was released more times than it was retained
    #[error("alias reference count underflow")]
    AliasUnderflow,
}

/// Result type alias for value operations
pub type Result<T> = std::result::Result<T, ValueError>;
