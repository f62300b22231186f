//! Custody transfer domain types.

use chrono::{DateTime, Utc};
use custody_shared::types::{CustodyRequestId, EmployeeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::custody::error::CustodyError;

/// Custody request status.
///
/// Valid transitions:
/// - Pending → Confirmed (confirm, moves the balance)
/// - Pending → Rejected (reject)
///
/// Confirmed and Rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustodyStatus {
    /// Awaiting the receiver's answer.
    Pending,
    /// Accepted by the receiver; the balance has moved.
    Confirmed,
    /// Declined by the receiver.
    Rejected,
}

impl CustodyStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true for Confirmed and Rejected.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Rejected)
    }
}

impl fmt::Display for CustodyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to move custody balance from one employee to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyRequest {
    /// Request id.
    pub id: CustodyRequestId,
    /// Sender.
    pub from_employee_id: EmployeeId,
    /// Sender's name at request time.
    pub from_employee_name: String,
    /// Receiver, who answers the request.
    pub to_employee_id: EmployeeId,
    /// Receiver's name at request time.
    pub to_employee_name: String,
    /// Amount to move; positive.
    pub amount: Decimal,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Who raised the request.
    pub requested_by: String,
    /// When the request was raised.
    pub requested_at: DateTime<Utc>,
    /// Current status.
    pub status: CustodyStatus,
    /// When the receiver answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl CustodyRequest {
    /// Builds a pending request from caller input.
    #[must_use]
    pub fn open(
        input: NewCustodyRequest,
        from_employee_name: String,
        to_employee_name: String,
        now: DateTime<Utc>,
    ) -> Self {
        let requested_by = input
            .requested_by
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| input.from.to_string());

        Self {
            id: CustodyRequestId::new(),
            from_employee_id: input.from,
            from_employee_name,
            to_employee_id: input.to,
            to_employee_name,
            amount: input.amount,
            notes: input.notes,
            requested_by,
            requested_at: now,
            status: CustodyStatus::Pending,
            confirmed_at: None,
        }
    }

    /// Balance deltas applied together when the request is confirmed:
    /// the sender is debited and the receiver credited by `amount`.
    #[must_use]
    pub fn transfer_legs(&self) -> [(EmployeeId, Decimal); 2] {
        [
            (self.from_employee_id.clone(), -self.amount),
            (self.to_employee_id.clone(), self.amount),
        ]
    }

    /// Returns true if `employee` sends or receives this request.
    #[must_use]
    pub fn involves(&self, employee: &EmployeeId) -> bool {
        &self.from_employee_id == employee || &self.to_employee_id == employee
    }

    /// Checks that `actor` is the receiver, the only party allowed to
    /// confirm or reject.
    ///
    /// # Errors
    ///
    /// Returns `NotReceiver` for anyone else, the sender included.
    pub fn ensure_receiver(&self, actor: &EmployeeId) -> Result<(), CustodyError> {
        if actor == &self.to_employee_id {
            Ok(())
        } else {
            Err(CustodyError::NotReceiver {
                actor: actor.clone(),
                receiver: self.to_employee_id.clone(),
            })
        }
    }

    /// Writes a validated transition onto the record.
    pub fn apply(&mut self, action: &CustodyAction) {
        self.status = action.new_status;
        self.confirmed_at = Some(action.answered_at);
    }
}

/// Input for raising a custody request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustodyRequest {
    /// Sender.
    pub from: EmployeeId,
    /// Receiver.
    pub to: EmployeeId,
    /// Amount to move.
    pub amount: Decimal,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Who raises the request; defaults to the sender.
    pub requested_by: Option<String>,
}

impl NewCustodyRequest {
    /// Creates an input with only the required fields.
    #[must_use]
    pub fn new(from: EmployeeId, to: EmployeeId, amount: Decimal) -> Self {
        Self {
            from,
            to,
            amount,
            notes: None,
            requested_by: None,
        }
    }

    /// Attaches notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Input-boundary checks: a positive amount between two different
    /// employees.
    pub fn validate(&self) -> Result<(), CustodyError> {
        if self.amount <= Decimal::ZERO {
            return Err(CustodyError::NonPositiveAmount {
                amount: self.amount,
            });
        }
        if self.from == self.to {
            return Err(CustodyError::SelfTransfer);
        }
        Ok(())
    }
}

/// A validated status change with its timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustodyAction {
    /// The new status.
    pub new_status: CustodyStatus,
    /// When the receiver answered.
    pub answered_at: DateTime<Utc>,
}
