//! Expense status transitions.

use chrono::Utc;

use crate::expense::error::ExpenseError;
use crate::expense::types::{ExpenseAction, ExpenseStatus};

/// Stateless service for expense status transitions.
///
/// Neither transition touches the owner's balance; it was applied when the
/// expense was recorded.
pub struct ExpenseWorkflow;

impl ExpenseWorkflow {
    /// The employee confirms a pending expense.
    ///
    /// # Returns
    /// * `Ok(ExpenseAction)` moving to `Paid` with `confirmed_by_employee` set
    /// * `Err(ExpenseError::InvalidTransition)` if not `Pending`
    pub fn confirm(current_status: ExpenseStatus) -> Result<ExpenseAction, ExpenseError> {
        Self::answer(current_status, ExpenseStatus::Paid)
    }

    /// The employee rejects a pending expense.
    ///
    /// # Returns
    /// * `Ok(ExpenseAction)` moving to `Rejected`
    /// * `Err(ExpenseError::InvalidTransition)` if not `Pending`
    pub fn reject(current_status: ExpenseStatus) -> Result<ExpenseAction, ExpenseError> {
        Self::answer(current_status, ExpenseStatus::Rejected)
    }

    /// Check if a status transition is valid.
    ///
    /// Only an unanswered expense can move, and only to an answer.
    #[must_use]
    pub fn is_valid_transition(from: ExpenseStatus, to: ExpenseStatus) -> bool {
        !from.is_terminal() && to.is_terminal()
    }

    fn answer(from: ExpenseStatus, to: ExpenseStatus) -> Result<ExpenseAction, ExpenseError> {
        if !Self::is_valid_transition(from, to) {
            return Err(ExpenseError::InvalidTransition { from, to });
        }
        Ok(ExpenseAction {
            new_status: to,
            confirmed_by_employee: to == ExpenseStatus::Paid,
            answered_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_from_pending() {
        let action = ExpenseWorkflow::confirm(ExpenseStatus::Pending).unwrap();
        assert_eq!(action.new_status, ExpenseStatus::Paid);
        assert!(action.confirmed_by_employee);
    }

    #[test]
    fn test_reject_from_pending() {
        let action = ExpenseWorkflow::reject(ExpenseStatus::Pending).unwrap();
        assert_eq!(action.new_status, ExpenseStatus::Rejected);
        assert!(!action.confirmed_by_employee);
    }

    #[test]
    fn test_confirm_twice_fails() {
        let result = ExpenseWorkflow::confirm(ExpenseStatus::Paid);
        assert_eq!(
            result,
            Err(ExpenseError::InvalidTransition {
                from: ExpenseStatus::Paid,
                to: ExpenseStatus::Paid,
            })
        );
    }

    #[test]
    fn test_reject_after_confirm_fails() {
        assert!(matches!(
            ExpenseWorkflow::reject(ExpenseStatus::Paid),
            Err(ExpenseError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(ExpenseWorkflow::is_valid_transition(
            ExpenseStatus::Pending,
            ExpenseStatus::Paid
        ));
        assert!(ExpenseWorkflow::is_valid_transition(
            ExpenseStatus::Pending,
            ExpenseStatus::Rejected
        ));
        assert!(!ExpenseWorkflow::is_valid_transition(
            ExpenseStatus::Rejected,
            ExpenseStatus::Paid
        ));
        assert!(!ExpenseWorkflow::is_valid_transition(
            ExpenseStatus::Paid,
            ExpenseStatus::Pending
        ));
        assert!(!ExpenseWorkflow::is_valid_transition(
            ExpenseStatus::Pending,
            ExpenseStatus::Pending
        ));
    }
}
