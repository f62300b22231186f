//! Employee record and custody balance arithmetic.

use custody_shared::types::EmployeeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BalanceOverflow;

/// Display label used when a referenced employee is missing from the roster.
pub const UNKNOWN_EMPLOYEE_NAME: &str = "غير معروف";

/// An employee holding a custody balance.
///
/// `custody_balance` is a signed running total. Only expense and custody
/// transfer operations change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Roster slug.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Running custody balance.
    #[serde(default)]
    pub custody_balance: Decimal,
}

impl Employee {
    /// Adds `delta` to the custody balance and returns the new balance.
    ///
    /// The balance is left untouched when the sum does not fit a `Decimal`.
    pub fn apply_delta(&mut self, delta: Decimal) -> Result<Decimal, BalanceOverflow> {
        self.custody_balance = self
            .custody_balance
            .checked_add(delta)
            .ok_or_else(|| BalanceOverflow {
                employee_id: self.id.clone(),
                balance: self.custody_balance,
                delta,
            })?;
        Ok(self.custody_balance)
    }
}

/// Finds an employee by id.
#[must_use]
pub fn find<'a>(roster: &'a [Employee], id: &EmployeeId) -> Option<&'a Employee> {
    roster.iter().find(|e| &e.id == id)
}

/// Returns the employee's name, or [`UNKNOWN_EMPLOYEE_NAME`] when absent.
#[must_use]
pub fn resolve_name(roster: &[Employee], id: &EmployeeId) -> String {
    find(roster, id).map_or_else(|| UNKNOWN_EMPLOYEE_NAME.to_string(), |e| e.name.clone())
}

/// Applies balance deltas to a roster in memory.
///
/// Deltas naming an employee that is not on the roster are skipped; their
/// ids are returned so the caller can report them. Either every delta is
/// applied or, on overflow, none is.
pub fn apply_balance_deltas(
    roster: &mut [Employee],
    deltas: &[(EmployeeId, Decimal)],
) -> Result<Vec<EmployeeId>, BalanceOverflow> {
    let mut updated = roster.to_vec();
    let mut missing = Vec::new();
    for (id, delta) in deltas {
        match updated.iter_mut().find(|e| &e.id == id) {
            Some(employee) => {
                employee.apply_delta(*delta)?;
            }
            None => missing.push(id.clone()),
        }
    }
    roster.clone_from_slice(&updated);
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn employee(id: &str, balance: Decimal) -> Employee {
        Employee {
            id: EmployeeId::new(id),
            name: format!("Employee {id}"),
            role: "Staff".to_string(),
            custody_balance: balance,
        }
    }

    #[test]
    fn test_apply_delta() {
        let mut e = employee("a", dec!(1000));
        assert_eq!(e.apply_delta(dec!(-200)), Ok(dec!(800)));
        assert_eq!(e.apply_delta(dec!(50.25)), Ok(dec!(850.25)));
    }

    #[test]
    fn test_resolve_name_falls_back_to_unknown() {
        let roster = vec![employee("a", Decimal::ZERO)];
        assert_eq!(resolve_name(&roster, &EmployeeId::new("a")), "Employee a");
        assert_eq!(
            resolve_name(&roster, &EmployeeId::new("ghost")),
            UNKNOWN_EMPLOYEE_NAME
        );
    }

    #[test]
    fn test_apply_balance_deltas_skips_missing() {
        let mut roster = vec![employee("a", dec!(1000)), employee("b", dec!(0))];
        let missing = apply_balance_deltas(
            &mut roster,
            &[
                (EmployeeId::new("a"), dec!(-300)),
                (EmployeeId::new("ghost"), dec!(10)),
                (EmployeeId::new("b"), dec!(300)),
            ],
        )
        .unwrap();
        assert_eq!(missing, vec![EmployeeId::new("ghost")]);
        assert_eq!(roster[0].custody_balance, dec!(700));
        assert_eq!(roster[1].custody_balance, dec!(300));
    }

    #[test]
    fn test_apply_delta_overflow_leaves_balance() {
        let mut e = employee("a", dec!(5000));
        let err = e.apply_delta(Decimal::MAX).unwrap_err();
        assert_eq!(err.employee_id, EmployeeId::new("a"));
        assert_eq!(err.delta, Decimal::MAX);
        assert_eq!(e.custody_balance, dec!(5000));
    }

    #[test]
    fn test_apply_balance_deltas_overflow_applies_nothing() {
        let mut roster = vec![employee("a", dec!(1000)), employee("b", dec!(5000))];
        let before = roster.clone();
        let err = apply_balance_deltas(
            &mut roster,
            &[
                (EmployeeId::new("a"), dec!(-300)),
                (EmployeeId::new("b"), Decimal::MAX),
            ],
        )
        .unwrap_err();
        assert_eq!(err.employee_id, EmployeeId::new("b"));
        assert_eq!(err.error_code(), "BALANCE_OVERFLOW");
        assert_eq!(roster, before);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(employee("a", dec!(12.5))).unwrap();
        assert_eq!(json["custodyBalance"], "12.5");
        assert_eq!(json["id"], "a");
    }

    #[test]
    fn test_numeric_balance_is_accepted() {
        let e: Employee = serde_json::from_str(
            r#"{"id":"x","name":"X","role":"R","custodyBalance":1500}"#,
        )
        .unwrap();
        assert_eq!(e.custody_balance, dec!(1500));
    }
}
