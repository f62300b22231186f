//! Store error types.

use custody_core::custody::CustodyError;
use custody_core::employee::BalanceOverflow;
use custody_core::expense::ExpenseError;
use custody_shared::AppError;
use thiserror::Error;

/// Store operation errors.
///
/// Missing records, undecodable collections and backend failures are kept
/// apart so callers can decide whether to alert or carry on.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Record kind, e.g. `expense`.
        kind: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// A stored collection is not valid JSON for its record type.
    #[error("collection '{key}' is corrupt: {source}")]
    Corrupt {
        /// Storage key of the collection.
        key: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// A collection could not be encoded.
    #[error("collection '{key}' could not be encoded: {source}")]
    Encode {
        /// Storage key of the collection.
        key: String,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Backend read or write failed.
    #[error("storage operation failed: {0}")]
    Backend(String),

    /// The store was closed.
    #[error("store is closed")]
    Closed,

    /// Backend could not be initialized.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// Expense rule violation.
    #[error(transparent)]
    Expense(#[from] ExpenseError),

    /// Custody request rule violation.
    #[error(transparent)]
    Custody(#[from] CustodyError),

    /// A balance change does not fit the amount type.
    #[error(transparent)]
    Balance(#[from] BalanceOverflow),
}

impl StoreError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Returns the error code for command output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Corrupt { .. } => "STORAGE_CORRUPT",
            Self::Encode { .. } | Self::Backend(_) => "STORAGE_ERROR",
            Self::Closed => "STORE_CLOSED",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Expense(e) => e.error_code(),
            Self::Custody(e) => e.error_code(),
            Self::Balance(e) => e.error_code(),
        }
    }
}

impl From<opendal::Error> for StoreError {
    fn from(err: opendal::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let msg = err.to_string();
        match err {
            StoreError::NotFound { .. } => Self::NotFound(msg),
            StoreError::Corrupt { .. } => Self::StorageCorrupt(msg),
            StoreError::Encode { .. } | StoreError::Backend(_) => Self::Storage(msg),
            StoreError::Closed => Self::Internal(msg),
            StoreError::Configuration(_) => Self::Configuration(msg),
            StoreError::Expense(ExpenseError::InvalidTransition { .. })
            | StoreError::Custody(
                CustodyError::InvalidTransition { .. } | CustodyError::RemovePending,
            ) => Self::InvalidTransition(msg),
            StoreError::Expense(ExpenseError::ZeroAmount)
            | StoreError::Custody(
                CustodyError::NonPositiveAmount { .. }
                | CustodyError::SelfTransfer
                | CustodyError::NotReceiver { .. },
            )
            | StoreError::Balance(_) => Self::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use custody_core::custody::CustodyStatus;

    #[test]
    fn test_not_found_maps_to_app_not_found() {
        let err = StoreError::not_found("expense", "abc");
        assert_eq!(err.to_string(), "expense abc not found");
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(matches!(AppError::from(err), AppError::NotFound(_)));
    }

    #[test]
    fn test_corrupt_maps_to_storage_corrupt() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = StoreError::Corrupt {
            key: "app_expenses".to_string(),
            source,
        };
        assert!(err.to_string().contains("app_expenses"));
        assert_eq!(err.error_code(), "STORAGE_CORRUPT");
        assert!(matches!(AppError::from(err), AppError::StorageCorrupt(_)));
    }

    #[test]
    fn test_transition_errors_map_to_invalid_transition() {
        let err = StoreError::from(CustodyError::InvalidTransition {
            from: CustodyStatus::Confirmed,
            to: CustodyStatus::Confirmed,
        });
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(matches!(
            AppError::from(err),
            AppError::InvalidTransition(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::from(CustodyError::RemovePending)),
            AppError::InvalidTransition(_)
        ));
    }

    #[test]
    fn test_input_errors_map_to_validation() {
        assert!(matches!(
            AppError::from(StoreError::from(ExpenseError::ZeroAmount)),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::from(CustodyError::SelfTransfer)),
            AppError::Validation(_)
        ));
        let overflow = StoreError::from(BalanceOverflow {
            employee_id: "abu_tamim".into(),
            balance: rust_decimal::Decimal::ONE,
            delta: rust_decimal::Decimal::MAX,
        });
        assert_eq!(overflow.error_code(), "BALANCE_OVERFLOW");
        assert!(matches!(AppError::from(overflow), AppError::Validation(_)));
        assert!(matches!(
            AppError::from(StoreError::from(CustodyError::NotReceiver {
                actor: "abu_tamim".into(),
                receiver: "emp_ahmed".into(),
            })),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_closed_maps_to_internal() {
        assert_eq!(StoreError::Closed.error_code(), "STORE_CLOSED");
        assert!(matches!(AppError::from(StoreError::Closed), AppError::Internal(_)));
    }
}
