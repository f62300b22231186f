//! Seed roster for a freshly opened store.

use custody_shared::types::EmployeeId;
use rust_decimal::Decimal;

use super::types::Employee;

/// Returns the static employee roster written on first open.
///
/// Opening balances are in whole riyals.
#[must_use]
pub fn fixture_employees() -> Vec<Employee> {
    [
        ("abu_tamim", "أبو تميم", "مسؤول العهدة", 5_000),
        ("emp_ahmed", "أحمد علي", "مشرف مشتريات", 1_500),
        ("emp_sara", "سارة محمد", "محاسبة", 0),
        ("emp_khaled", "خالد عبدالله", "مندوب ميداني", 750),
        ("emp_noura", "نورة سعد", "منسقة إدارية", 250),
    ]
    .into_iter()
    .map(|(id, name, role, balance)| Employee {
        id: EmployeeId::new(id),
        name: name.to_string(),
        role: role.to_string(),
        custody_balance: Decimal::from(balance),
    })
    .collect()
}
