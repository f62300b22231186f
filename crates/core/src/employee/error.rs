//! Balance arithmetic errors.

use custody_shared::types::EmployeeId;
use rust_decimal::Decimal;
use thiserror::Error;

/// A balance change would leave the representable `Decimal` range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Custody balance of {employee_id} would overflow: {balance} + {delta}")]
pub struct BalanceOverflow {
    /// Employee whose balance was being changed.
    pub employee_id: EmployeeId,
    /// Balance before the change.
    pub balance: Decimal,
    /// Rejected delta.
    pub delta: Decimal,
}

impl BalanceOverflow {
    /// Returns the error code for command output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        "BALANCE_OVERFLOW"
    }
}
