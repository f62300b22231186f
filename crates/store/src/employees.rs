//! Employee directory.

use custody_core::employee::{Employee, find};
use custody_shared::types::EmployeeId;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::service::{Store, keys};

/// Read access to the roster plus the single balance mutation.
#[derive(Debug, Clone)]
pub struct EmployeeDirectory {
    store: Store,
}

impl EmployeeDirectory {
    /// Creates a directory over `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Lists the roster, seeding it on first access if it was never written.
    pub async fn list(&self) -> Result<Vec<Employee>, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;
        self.store.load_employees_locked().await
    }

    /// Looks up one employee.
    pub async fn get(&self, id: &EmployeeId) -> Result<Option<Employee>, StoreError> {
        let roster = self.list().await?;
        Ok(find(&roster, id).cloned())
    }

    /// Adds `delta` to an employee's custody balance.
    ///
    /// An unknown id is a no-op and yields `Ok(None)`; otherwise the roster is
    /// written back and the new balance returned.
    pub async fn update_balance(
        &self,
        id: &EmployeeId,
        delta: Decimal,
    ) -> Result<Option<Decimal>, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;

        let mut roster = self.store.load_employees_locked().await?;
        let Some(employee) = roster.iter_mut().find(|e| &e.id == id) else {
            warn!(employee_id = %id, %delta, "balance update for unknown employee ignored");
            return Ok(None);
        };
        let balance = employee.apply_delta(delta)?;

        self.store.write_collection(keys::EMPLOYEES, &roster).await?;
        info!(employee_id = %id, %delta, %balance, "custody balance updated");
        Ok(Some(balance))
    }
}
