//! Expense error types.

use thiserror::Error;

use crate::expense::types::ExpenseStatus;

/// Errors that can occur during expense operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    /// Attempted an invalid status transition.
    #[error("Invalid expense status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ExpenseStatus,
        /// The attempted target status.
        to: ExpenseStatus,
    },

    /// Expense amount cannot be zero.
    #[error("Expense amount cannot be zero")]
    ZeroAmount,
}

impl ExpenseError {
    /// Returns the error code for command output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ZeroAmount => "ZERO_AMOUNT",
        }
    }
}
