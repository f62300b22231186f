//! Property-based tests for ExpenseWorkflow and expense balance effects.

use chrono::Utc;
use custody_shared::types::EmployeeId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::employee::Employee;
use crate::expense::error::ExpenseError;
use crate::expense::service::ExpenseWorkflow;
use crate::expense::types::{EntryKind, Expense, ExpenseStatus, NewExpense};

fn arb_status() -> impl Strategy<Value = ExpenseStatus> {
    prop_oneof![
        Just(ExpenseStatus::Pending),
        Just(ExpenseStatus::Paid),
        Just(ExpenseStatus::Rejected),
    ]
}

/// Signed amounts with two decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Only pending expenses accept an answer; every other status is rejected
    /// with the attempted target named in the error.
    #[test]
    fn prop_transitions_require_pending(status in arb_status()) {
        let confirm = ExpenseWorkflow::confirm(status);
        let reject = ExpenseWorkflow::reject(status);

        if status == ExpenseStatus::Pending {
            prop_assert_eq!(confirm.unwrap().new_status, ExpenseStatus::Paid);
            prop_assert_eq!(reject.unwrap().new_status, ExpenseStatus::Rejected);
        } else {
            prop_assert_eq!(
                confirm,
                Err(ExpenseError::InvalidTransition { from: status, to: ExpenseStatus::Paid })
            );
            prop_assert_eq!(
                reject,
                Err(ExpenseError::InvalidTransition { from: status, to: ExpenseStatus::Rejected })
            );
        }
    }

    /// Recording then deleting restores the owner's balance, whatever status
    /// the entry reached in between.
    #[test]
    fn prop_removal_restores_balance(
        opening in arb_amount(),
        amount in arb_amount(),
        answer in arb_status(),
    ) {
        let mut owner = Employee {
            id: EmployeeId::new("owner"),
            name: "Owner".to_string(),
            role: "Staff".to_string(),
            custody_balance: opening,
        };
        let mut expense = Expense::record(
            NewExpense::new(owner.id.clone(), amount),
            owner.name.clone(),
            Utc::now(),
        );
        owner.apply_delta(expense.balance_effect()).unwrap();

        match answer {
            ExpenseStatus::Paid => expense.apply(&ExpenseWorkflow::confirm(expense.status).unwrap()),
            ExpenseStatus::Rejected => expense.apply(&ExpenseWorkflow::reject(expense.status).unwrap()),
            ExpenseStatus::Pending => {}
        }
        prop_assert_eq!(owner.custody_balance, opening + amount);

        owner.apply_delta(expense.reversal_effect()).unwrap();
        prop_assert_eq!(owner.custody_balance, opening);
    }

    /// A disbursement never raises a balance and a settlement never lowers it.
    #[test]
    fn prop_entry_kind_sign(magnitude in arb_amount()) {
        prop_assert!(EntryKind::Disbursement.signed_amount(magnitude) <= Decimal::ZERO);
        prop_assert!(EntryKind::Settlement.signed_amount(magnitude) >= Decimal::ZERO);
        prop_assert_eq!(
            EntryKind::Settlement.signed_amount(magnitude),
            -EntryKind::Disbursement.signed_amount(magnitude)
        );
    }
}
