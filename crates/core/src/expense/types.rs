//! Expense domain types.

use chrono::{DateTime, Utc};
use custody_shared::types::{EmployeeId, ExpenseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::expense::error::ExpenseError;

/// Recorder used when the caller does not name one.
pub const DEFAULT_CREATED_BY: &str = "employee";

/// Expense status.
///
/// Valid transitions:
/// - Pending → Paid (confirm)
/// - Pending → Rejected (reject)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Recorded, awaiting the employee's confirmation.
    Pending,
    /// Confirmed by the employee.
    Paid,
    /// Rejected by the employee.
    Rejected,
}

impl ExpenseStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true once the employee has answered.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Rejected)
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a ledger entry, used where a positive magnitude is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Cash handed out of custody; lowers the balance.
    Disbursement,
    /// Cash returned or topped up; raises the balance.
    Settlement,
}

impl EntryKind {
    /// Turns a magnitude into the signed amount stored on the expense.
    #[must_use]
    pub fn signed_amount(self, magnitude: Decimal) -> Decimal {
        match self {
            Self::Disbursement => -magnitude.abs(),
            Self::Settlement => magnitude.abs(),
        }
    }
}

/// A ledger entry recorded against one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Entry id.
    pub id: ExpenseId,
    /// Owning employee.
    pub employee_id: EmployeeId,
    /// Owner's name at creation time.
    pub employee_name: String,
    /// Signed amount; negative debits the owner's balance.
    pub amount: Decimal,
    /// Current status.
    pub status: ExpenseStatus,
    /// Set when the employee confirmed the entry.
    #[serde(default)]
    pub confirmed_by_employee: bool,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
    /// When the employee answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Who recorded the entry.
    pub created_by: String,
    /// Display name of the recorder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_name: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Expense {
    /// Builds a pending expense from caller input.
    #[must_use]
    pub fn record(input: NewExpense, employee_name: String, now: DateTime<Utc>) -> Self {
        let created_by = input
            .created_by
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CREATED_BY.to_string());

        Self {
            id: ExpenseId::new(),
            employee_id: input.employee_id,
            employee_name,
            amount: input.amount,
            status: ExpenseStatus::Pending,
            confirmed_by_employee: false,
            created_at: now,
            confirmed_at: None,
            created_by,
            created_by_name: input.created_by_name,
            notes: input.notes,
        }
    }

    /// Balance change applied to the owner when the entry is recorded.
    #[must_use]
    pub fn balance_effect(&self) -> Decimal {
        self.amount
    }

    /// Balance change that undoes [`Self::balance_effect`].
    #[must_use]
    pub fn reversal_effect(&self) -> Decimal {
        -self.amount
    }

    /// Writes a validated transition onto the record.
    pub fn apply(&mut self, action: &ExpenseAction) {
        self.status = action.new_status;
        self.confirmed_by_employee = action.confirmed_by_employee;
        self.confirmed_at = Some(action.answered_at);
    }
}

/// Input for recording an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Owning employee.
    pub employee_id: EmployeeId,
    /// Signed amount. The caller chooses the sign.
    pub amount: Decimal,
    /// Who records the entry; blank means [`DEFAULT_CREATED_BY`].
    pub created_by: Option<String>,
    /// Display name of the recorder.
    pub created_by_name: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl NewExpense {
    /// Creates an input with only the required fields.
    #[must_use]
    pub fn new(employee_id: EmployeeId, amount: Decimal) -> Self {
        Self {
            employee_id,
            amount,
            created_by: None,
            created_by_name: None,
            notes: None,
        }
    }

    /// Attaches notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Names the recorder.
    #[must_use]
    pub fn with_creator(mut self, id: impl Into<String>, name: Option<String>) -> Self {
        self.created_by = Some(id.into());
        self.created_by_name = name;
        self
    }

    /// Input-boundary check: a zero amount records nothing.
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.amount.is_zero() {
            return Err(ExpenseError::ZeroAmount);
        }
        Ok(())
    }
}

/// A validated status change with its audit data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseAction {
    /// The new status.
    pub new_status: ExpenseStatus,
    /// Value of the `confirmed_by_employee` flag after the change.
    pub confirmed_by_employee: bool,
    /// When the employee answered.
    pub answered_at: DateTime<Utc>,
}
