//! Custody transfer error types.

use custody_shared::types::EmployeeId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::custody::types::CustodyStatus;

/// Errors that can occur during custody transfer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustodyError {
    /// Attempted an invalid status transition.
    #[error("Invalid custody request transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: CustodyStatus,
        /// The attempted target status.
        to: CustodyStatus,
    },

    /// Pending requests must be answered before they can be deleted.
    #[error("Cannot delete a pending custody request")]
    RemovePending,

    /// Transfer amount must be greater than zero.
    #[error("Transfer amount must be greater than zero, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// Sender and receiver are the same employee.
    #[error("Cannot transfer custody to the same employee")]
    SelfTransfer,

    /// Only the receiver may answer a request.
    #[error("Only {receiver} can answer this custody request, not {actor}")]
    NotReceiver {
        /// Employee who tried to answer.
        actor: EmployeeId,
        /// Receiver of the request.
        receiver: EmployeeId,
    },
}

impl CustodyError {
    /// Returns the error code for command output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::RemovePending => "REMOVE_PENDING",
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::SelfTransfer => "SELF_TRANSFER",
            Self::NotReceiver { .. } => "NOT_RECEIVER",
        }
    }
}
