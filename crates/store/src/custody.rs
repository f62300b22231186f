//! Custody transfer requests between employees.

use chrono::Utc;
use custody_core::custody::{CustodyRequest, CustodyWorkflow, NewCustodyRequest};
use custody_core::employee::{apply_balance_deltas, resolve_name};
use custody_core::views::{pending_incoming_count, requests_involving, sort_newest_first};
use custody_shared::types::{CustodyRequestId, EmployeeId};
use tracing::{info, warn};

use crate::commit::commit_pair;
use crate::error::StoreError;
use crate::service::{Store, keys};

const KIND: &str = "custody request";

/// Two-party custody transfers.
///
/// A request moves no money until the receiver confirms it. Confirmation
/// debits the sender and credits the receiver together, exactly once.
#[derive(Debug, Clone)]
pub struct CustodyTransfers {
    store: Store,
}

impl CustodyTransfers {
    /// Creates the component over `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All requests, newest first.
    pub async fn list(&self) -> Result<Vec<CustodyRequest>, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;
        let mut requests = self.store.load_requests().await?;
        sort_newest_first(&mut requests, |r| r.requested_at);
        Ok(requests)
    }

    /// Looks up one request.
    pub async fn get(&self, id: CustodyRequestId) -> Result<Option<CustodyRequest>, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;
        let requests = self.store.load_requests().await?;
        Ok(requests.into_iter().find(|r| r.id == id))
    }

    /// Requests sent or received by `employee`, newest first.
    pub async fn list_involving(
        &self,
        employee: &EmployeeId,
    ) -> Result<Vec<CustodyRequest>, StoreError> {
        let requests = self.list().await?;
        Ok(requests_involving(&requests, employee)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Pending requests waiting for `employee` to answer.
    pub async fn pending_incoming_count(&self, employee: &EmployeeId) -> Result<usize, StoreError> {
        let requests = self.list().await?;
        Ok(pending_incoming_count(&requests, employee))
    }

    /// Raises a pending request. Balances are untouched.
    ///
    /// Input is stored as given; callers check it with
    /// [`NewCustodyRequest::validate`] first.
    pub async fn create(&self, input: NewCustodyRequest) -> Result<CustodyRequest, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;

        let roster = self.store.load_employees_locked().await?;
        let from_name = resolve_name(&roster, &input.from);
        let to_name = resolve_name(&roster, &input.to);
        let request = CustodyRequest::open(input, from_name, to_name, Utc::now());

        let mut requests = self.store.load_requests().await?;
        requests.insert(0, request.clone());
        self.store
            .write_collection(keys::CUSTODY_CONFIRMATIONS, &requests)
            .await?;

        info!(
            request_id = %request.id,
            from = %request.from_employee_id,
            to = %request.to_employee_id,
            amount = %request.amount,
            "custody request created"
        );
        Ok(request)
    }

    /// The receiver accepts a pending request and the amount moves from
    /// sender to receiver.
    ///
    /// A request that is no longer pending fails with an invalid transition
    /// and nothing is written.
    pub async fn confirm(&self, id: CustodyRequestId) -> Result<CustodyRequest, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;

        let before = self.store.load_requests().await?;
        let mut requests = before.clone();
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found(KIND, id))?;

        let action = CustodyWorkflow::confirm(request.status)?;
        request.apply(&action);
        let confirmed = request.clone();

        let mut roster = self.store.load_employees_locked().await?;
        let missing = apply_balance_deltas(&mut roster, &confirmed.transfer_legs())?;
        for employee_id in &missing {
            warn!(request_id = %id, %employee_id, "transfer leg for unknown employee skipped");
        }

        commit_pair(
            self.store
                .write_collection(keys::CUSTODY_CONFIRMATIONS, &requests),
            self.store.write_collection(keys::EMPLOYEES, &roster),
            self.store
                .write_collection(keys::CUSTODY_CONFIRMATIONS, &before),
        )
        .await?;

        info!(
            request_id = %id,
            from = %confirmed.from_employee_id,
            to = %confirmed.to_employee_id,
            amount = %confirmed.amount,
            "custody transfer confirmed"
        );
        Ok(confirmed)
    }

    /// The receiver declines a pending request. Balances are untouched.
    pub async fn reject(&self, id: CustodyRequestId) -> Result<CustodyRequest, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;

        let mut requests = self.store.load_requests().await?;
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found(KIND, id))?;

        let action = CustodyWorkflow::reject(request.status)?;
        request.apply(&action);
        let rejected = request.clone();

        self.store
            .write_collection(keys::CUSTODY_CONFIRMATIONS, &requests)
            .await?;
        info!(request_id = %id, "custody request rejected");
        Ok(rejected)
    }

    /// Deletes an answered request. Balances are untouched.
    ///
    /// Pending requests cannot be removed; reject them first.
    pub async fn remove(&self, id: CustodyRequestId) -> Result<CustodyRequest, StoreError> {
        self.store.simulate_latency().await;
        let _guard = self.store.lock().await?;

        let mut requests = self.store.load_requests().await?;
        let position = requests
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found(KIND, id))?;
        CustodyWorkflow::ensure_removable(requests[position].status)?;
        let removed = requests.remove(position);

        self.store
            .write_collection(keys::CUSTODY_CONFIRMATIONS, &requests)
            .await?;
        info!(request_id = %id, status = %removed.status, "custody request removed");
        Ok(removed)
    }
}
