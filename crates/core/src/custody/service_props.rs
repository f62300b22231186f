//! Property-based tests for CustodyWorkflow and transfer arithmetic.

use chrono::Utc;
use custody_shared::types::EmployeeId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::custody::error::CustodyError;
use crate::custody::service::CustodyWorkflow;
use crate::custody::types::{CustodyRequest, CustodyStatus, NewCustodyRequest};
use crate::employee::{Employee, apply_balance_deltas};

fn arb_status() -> impl Strategy<Value = CustodyStatus> {
    prop_oneof![
        Just(CustodyStatus::Pending),
        Just(CustodyStatus::Confirmed),
        Just(CustodyStatus::Rejected),
    ]
}

fn arb_balance() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn roster(a: Decimal, b: Decimal) -> Vec<Employee> {
    vec![
        Employee {
            id: EmployeeId::new("a"),
            name: "A".to_string(),
            role: "Staff".to_string(),
            custody_balance: a,
        },
        Employee {
            id: EmployeeId::new("b"),
            name: "B".to_string(),
            role: "Staff".to_string(),
            custody_balance: b,
        },
    ]
}

fn open(amount: Decimal) -> CustodyRequest {
    CustodyRequest::open(
        NewCustodyRequest::new(EmployeeId::new("a"), EmployeeId::new("b"), amount),
        "A".to_string(),
        "B".to_string(),
        Utc::now(),
    )
}

/// Confirms through the state machine and, only on success, applies the legs.
fn confirm(request: &mut CustodyRequest, employees: &mut [Employee]) -> Result<(), CustodyError> {
    let action = CustodyWorkflow::confirm(request.status)?;
    request.apply(&action);
    let missing = apply_balance_deltas(employees, &request.transfer_legs()).unwrap();
    assert!(missing.is_empty());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Confirm debits the sender and credits the receiver by exactly the amount.
    #[test]
    fn prop_confirm_moves_amount(
        a in arb_balance(),
        b in arb_balance(),
        amount in arb_positive_amount(),
    ) {
        let mut employees = roster(a, b);
        let mut request = open(amount);

        confirm(&mut request, &mut employees).unwrap();

        prop_assert_eq!(request.status, CustodyStatus::Confirmed);
        prop_assert_eq!(employees[0].custody_balance, a - amount);
        prop_assert_eq!(employees[1].custody_balance, b + amount);
        prop_assert_eq!(
            employees[0].custody_balance + employees[1].custody_balance,
            a + b
        );
    }

    /// A second confirm is refused and the balance moves only once.
    #[test]
    fn prop_confirm_is_not_reapplied(
        a in arb_balance(),
        b in arb_balance(),
        amount in arb_positive_amount(),
    ) {
        let mut employees = roster(a, b);
        let mut request = open(amount);

        confirm(&mut request, &mut employees).unwrap();
        let second = confirm(&mut request, &mut employees);

        prop_assert_eq!(
            second,
            Err(CustodyError::InvalidTransition {
                from: CustodyStatus::Confirmed,
                to: CustodyStatus::Confirmed,
            })
        );
        prop_assert_eq!(employees[0].custody_balance, a - amount);
        prop_assert_eq!(employees[1].custody_balance, b + amount);
    }

    /// Reject ends terminal, removable, and cannot be confirmed afterwards.
    #[test]
    fn prop_reject_is_final(
        a in arb_balance(),
        b in arb_balance(),
        amount in arb_positive_amount(),
    ) {
        let mut employees = roster(a, b);
        let mut request = open(amount);

        let action = CustodyWorkflow::reject(request.status).unwrap();
        request.apply(&action);

        prop_assert_eq!(request.status, CustodyStatus::Rejected);
        prop_assert!(CustodyWorkflow::ensure_removable(request.status).is_ok());
        prop_assert!(confirm(&mut request, &mut employees).is_err());
        prop_assert_eq!(employees[0].custody_balance, a);
        prop_assert_eq!(employees[1].custody_balance, b);
    }

    /// Transitions succeed exactly when the source state is Pending.
    #[test]
    fn prop_transition_table(status in arb_status()) {
        let pending = status == CustodyStatus::Pending;
        prop_assert_eq!(CustodyWorkflow::confirm(status).is_ok(), pending);
        prop_assert_eq!(CustodyWorkflow::reject(status).is_ok(), pending);
        prop_assert_eq!(CustodyWorkflow::ensure_removable(status).is_ok(), !pending);
    }

    /// Amount validation at the input boundary accepts exactly positive values.
    #[test]
    fn prop_validate_amount(amount in arb_balance()) {
        let input = NewCustodyRequest::new(EmployeeId::new("a"), EmployeeId::new("b"), amount);
        prop_assert_eq!(input.validate().is_ok(), amount > Decimal::ZERO);
    }
}
