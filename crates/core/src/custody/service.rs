//! Custody request state machine.
//!
//! Every answer is checked against the current status before anything is
//! written, so a second confirm can never move the balance twice.

use chrono::Utc;

use crate::custody::error::CustodyError;
use crate::custody::types::{CustodyAction, CustodyStatus};

/// Stateless service for custody request transitions.
pub struct CustodyWorkflow;

impl CustodyWorkflow {
    /// The receiver accepts a pending request.
    ///
    /// # Returns
    /// * `Ok(CustodyAction)` moving to `Confirmed`
    /// * `Err(CustodyError::InvalidTransition)` if not `Pending`
    pub fn confirm(current_status: CustodyStatus) -> Result<CustodyAction, CustodyError> {
        Self::answer(current_status, CustodyStatus::Confirmed)
    }

    /// The receiver declines a pending request.
    ///
    /// # Returns
    /// * `Ok(CustodyAction)` moving to `Rejected`
    /// * `Err(CustodyError::InvalidTransition)` if not `Pending`
    pub fn reject(current_status: CustodyStatus) -> Result<CustodyAction, CustodyError> {
        Self::answer(current_status, CustodyStatus::Rejected)
    }

    /// Checks that a request may be deleted.
    ///
    /// # Returns
    /// * `Ok(())` for `Confirmed` and `Rejected`
    /// * `Err(CustodyError::RemovePending)` for `Pending`
    pub fn ensure_removable(current_status: CustodyStatus) -> Result<(), CustodyError> {
        if current_status.is_terminal() {
            Ok(())
        } else {
            Err(CustodyError::RemovePending)
        }
    }

    /// Check if a status transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: CustodyStatus, to: CustodyStatus) -> bool {
        matches!(
            (from, to),
            (
                CustodyStatus::Pending,
                CustodyStatus::Confirmed | CustodyStatus::Rejected
            )
        )
    }

    fn answer(from: CustodyStatus, to: CustodyStatus) -> Result<CustodyAction, CustodyError> {
        if !Self::is_valid_transition(from, to) {
            return Err(CustodyError::InvalidTransition { from, to });
        }
        Ok(CustodyAction {
            new_status: to,
            answered_at: Utc::now(),
        })
    }
}
