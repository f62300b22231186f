//! Plain-text rendering of records.

use std::fmt::Write as _;

use custody_core::custody::CustodyRequest;
use custody_core::employee::Employee;
use custody_core::expense::Expense;
use custody_core::views::EmployeeSummary;
use custody_shared::AppError;
use serde::Serialize;

/// Pretty JSON for `--json` output.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))
}

pub fn employees(roster: &[Employee]) -> String {
    let mut out = format!("{:<12} {:<16} {:<16} {:>12}\n", "ID", "NAME", "ROLE", "BALANCE");
    for e in roster {
        let _ = writeln!(
            out,
            "{:<12} {:<16} {:<16} {:>12}",
            e.id, e.name, e.role, e.custody_balance
        );
    }
    out
}

pub fn expenses(expenses: &[Expense]) -> String {
    let mut out = format!(
        "{:<36} {:<12} {:>10} {:<8} {:<20}\n",
        "ID", "EMPLOYEE", "AMOUNT", "STATUS", "CREATED"
    );
    for e in expenses {
        let _ = writeln!(
            out,
            "{:<36} {:<12} {:>10} {:<8} {:<20}",
            e.id,
            e.employee_id,
            e.amount,
            e.status,
            e.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    out
}

pub fn requests(requests: &[CustodyRequest]) -> String {
    let mut out = format!(
        "{:<36} {:<12} {:<12} {:>10} {:<9} {:<20}\n",
        "ID", "FROM", "TO", "AMOUNT", "STATUS", "REQUESTED"
    );
    for r in requests {
        let _ = writeln!(
            out,
            "{:<36} {:<12} {:<12} {:>10} {:<9} {:<20}",
            r.id,
            r.from_employee_id,
            r.to_employee_id,
            r.amount,
            r.status,
            r.requested_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    out
}

pub fn expense(e: &Expense) -> String {
    format!(
        "expense {} {} {} for {} ({})",
        e.id, e.status, e.amount, e.employee_name, e.employee_id
    )
}

pub fn request(r: &CustodyRequest) -> String {
    format!(
        "transfer {} {} {} from {} to {}",
        r.id, r.status, r.amount, r.from_employee_name, r.to_employee_name
    )
}

pub fn summary(s: &EmployeeSummary) -> String {
    format!(
        "{} ({})\nrole:              {}\nbalance:           {}\nexpenses:          {}\npending incoming:  {}\n",
        s.employee.name,
        s.employee.id,
        s.employee.role,
        s.balance,
        s.expense_count,
        s.pending_incoming
    )
}
