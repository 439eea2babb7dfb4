use crate::foundation::value_type::ValueType;

/// Convenience result type used across the operator library.
pub type OpResult<T> = Result<T, OpError>;

/// Precondition failures raised while composing expression nodes.
///
/// Every variant is reported before any node of the failing call is built.
#[derive(thiserror::Error, Debug)]
pub enum OpError {
    /// A float cast was requested from or to a non-float value type.
    #[error("invalid cast: {from} to {to}")]
    InvalidCast {
        /// Value type of the node being cast.
        from: ValueType,
        /// Requested target value type.
        to: ValueType,
    },

    /// Two operands were required to share the exact same value type.
    #[error("type mismatch: {left} and {right}")]
    TypeMismatch {
        /// Value type of the first operand.
        left: ValueType,
        /// Value type of the second operand.
        right: ValueType,
    },

    /// An operand does not have the shape an operation requires.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed operator request.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OpError {
    /// Build an [`OpError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build an [`OpError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
