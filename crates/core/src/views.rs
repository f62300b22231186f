//! Per-employee views over the ledger collections.

use custody_shared::types::EmployeeId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::custody::{CustodyRequest, CustodyStatus};
use crate::employee::Employee;
use crate::expense::Expense;

/// Ledger entries owned by `employee`, in collection order.
#[must_use]
pub fn expenses_for<'a>(expenses: &'a [Expense], employee: &EmployeeId) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|e| &e.employee_id == employee)
        .collect()
}

/// Requests that `employee` sends or receives, in collection order.
#[must_use]
pub fn requests_involving<'a>(
    requests: &'a [CustodyRequest],
    employee: &EmployeeId,
) -> Vec<&'a CustodyRequest> {
    requests.iter().filter(|r| r.involves(employee)).collect()
}

/// Number of pending requests waiting for `employee` to answer.
#[must_use]
pub fn pending_incoming_count(requests: &[CustodyRequest], employee: &EmployeeId) -> usize {
    requests
        .iter()
        .filter(|r| &r.to_employee_id == employee && r.status == CustodyStatus::Pending)
        .count()
}

/// Sorts newest first by the given timestamp key.
///
/// The sort is stable, so records sharing a timestamp keep their order.
pub fn sort_newest_first<T, K, F>(items: &mut [T], key: F)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// Dashboard figures for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    /// The employee.
    pub employee: Employee,
    /// Current custody balance.
    pub balance: Decimal,
    /// Number of ledger entries owned by the employee.
    pub expense_count: usize,
    /// Pending requests awaiting the employee's answer.
    pub pending_incoming: usize,
}

/// Builds the dashboard figures for `employee`.
#[must_use]
pub fn summarize(
    employee: &Employee,
    expenses: &[Expense],
    requests: &[CustodyRequest],
) -> EmployeeSummary {
    EmployeeSummary {
        employee: employee.clone(),
        balance: employee.custody_balance,
        expense_count: expenses_for(expenses, &employee.id).len(),
        pending_incoming: pending_incoming_count(requests, &employee.id),
    }
}
