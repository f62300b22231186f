//! Expense ledger.

use chrono::Utc;
use custody_core::employee::{UNKNOWN_EMPLOYEE_NAME, apply_balance_deltas, resolve_name};
use custody_core::expense::{Expense, ExpenseAction, ExpenseError, ExpenseStatus, ExpenseWorkflow, NewExpense};
use custody_core::views::{expenses_for, sort_newest_first};
use custody_shared::types::{EmployeeId, ExpenseId};
use tracing::{info, warn};

use crate::commit::commit_pair;
use crate::error::StoreError;
use crate::service::{Store, keys};

/// Expense records and their effect on custody balances.
///
/// Recording an expense applies its signed amount to the owner at once;
/// removing it applies the opposite amount, whatever its status.
#[derive(Debug, Clone)]
pub struct ExpenseLedger {
    store: Store,
}

impl ExpenseLedger {
    /// Creates a ledger over `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All expenses, newest first.
    pub async fn list(&self) -> Result<Vec<Expense>, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;
        let mut expenses = self.store.load_expenses().await?;
        sort_newest_first(&mut expenses, |e| e.created_at);
        Ok(expenses)
    }

    /// Expenses owned by `employee`, newest first.
    pub async fn list_for(&self, employee: &EmployeeId) -> Result<Vec<Expense>, StoreError> {
        let expenses = self.list().await?;
        Ok(expenses_for(&expenses, employee).into_iter().cloned().collect())
    }

    /// Records an expense and applies its amount to the owner's balance.
    ///
    /// The owner's name falls back to the unknown label when the id is not
    /// on the roster; the balance update is then skipped.
    pub async fn add(&self, input: NewExpense) -> Result<Expense, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;

        let mut roster = self.store.load_employees_locked().await?;
        let employee_name = resolve_name(&roster, &input.employee_id);
        if employee_name == UNKNOWN_EMPLOYEE_NAME {
            warn!(employee_id = %input.employee_id, "expense recorded for unknown employee");
        }
        let expense = Expense::record(input, employee_name, Utc::now());

        let before = self.store.load_expenses().await?;
        let mut expenses = Vec::with_capacity(before.len() + 1);
        expenses.push(expense.clone());
        expenses.extend(before.iter().cloned());

        let missing = apply_balance_deltas(
            &mut roster,
            &[(expense.employee_id.clone(), expense.balance_effect())],
        )?;
        let roster_changed = missing.is_empty();

        commit_pair(
            self.store.write_collection(keys::EXPENSES, &expenses),
            async {
                if roster_changed {
                    self.store.write_collection(keys::EMPLOYEES, &roster).await
                } else {
                    Ok(())
                }
            },
            self.store.write_collection(keys::EXPENSES, &before),
        )
        .await?;

        info!(
            expense_id = %expense.id,
            employee_id = %expense.employee_id,
            amount = %expense.amount,
            "expense recorded"
        );
        Ok(expense)
    }

    /// The employee confirms a pending expense. Balances are untouched.
    pub async fn confirm(&self, id: ExpenseId) -> Result<Expense, StoreError> {
        self.answer(id, ExpenseWorkflow::confirm).await
    }

    /// The employee rejects a pending expense. Balances are untouched; the
    /// amount stays applied until the expense is removed.
    pub async fn reject(&self, id: ExpenseId) -> Result<Expense, StoreError> {
        self.answer(id, ExpenseWorkflow::reject).await
    }

    async fn answer(
        &self,
        id: ExpenseId,
        transition: fn(ExpenseStatus) -> Result<ExpenseAction, ExpenseError>,
    ) -> Result<Expense, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;

        let mut expenses = self.store.load_expenses().await?;
        let expense = expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::not_found("expense", id))?;

        let action = transition(expense.status)?;
        expense.apply(&action);
        let updated = expense.clone();

        self.store.write_collection(keys::EXPENSES, &expenses).await?;
        info!(expense_id = %id, status = %updated.status, "expense answered");
        Ok(updated)
    }

    /// Deletes an expense at any status and reverses its balance effect.
    pub async fn remove(&self, id: ExpenseId) -> Result<Expense, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;

        let mut expenses = self.store.load_expenses().await?;
        let position = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StoreError::not_found("expense", id))?;
        let expense = expenses.remove(position);

        let roster_before = self.store.load_employees_locked().await?;
        let mut roster = roster_before.clone();
        let missing = apply_balance_deltas(
            &mut roster,
            &[(expense.employee_id.clone(), expense.reversal_effect())],
        )?;
        if !missing.is_empty() {
            warn!(employee_id = %expense.employee_id, "removed expense of unknown employee");
        }

        commit_pair(
            self.store.write_collection(keys::EMPLOYEES, &roster),
            self.store.write_collection(keys::EXPENSES, &expenses),
            self.store.write_collection(keys::EMPLOYEES, &roster_before),
        )
        .await?;

        info!(
            expense_id = %id,
            employee_id = %expense.employee_id,
            reversed = %expense.reversal_effect(),
            "expense removed"
        );
        Ok(expense)
    }
}
