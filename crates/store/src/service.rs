//! Store lifecycle and collection I/O on top of Apache OpenDAL.

use std::sync::Arc;

use custody_core::custody::CustodyRequest;
use custody_core::employee::{Employee, fixture_employees};
use custody_core::expense::Expense;
use opendal::{ErrorKind, Operator, services};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info};

use crate::config::{StoreConfig, StoreProvider};
use crate::custody::CustodyTransfers;
use crate::employees::EmployeeDirectory;
use crate::error::StoreError;
use crate::expenses::ExpenseLedger;

/// Storage keys of the persisted collections.
pub mod keys {
    /// Employee roster.
    pub const EMPLOYEES: &str = "app_employees";
    /// Expense ledger.
    pub const EXPENSES: &str = "app_expenses";
    /// Custody transfer requests.
    pub const CUSTODY_CONFIRMATIONS: &str = "app_custody_confirmations";
}

/// Handle to an open store.
///
/// Cloning is cheap; clones share the backend and the write lock. The
/// lifecycle is [`Store::open`] (seeding once) to [`Store::close`]. Once
/// closed, every clone and component fails with [`StoreError::Closed`].
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("provider", &self.inner.config.provider)
            .finish_non_exhaustive()
    }
}

struct Inner {
    operator: Operator,
    config: StoreConfig,
    /// Guards every read-modify-write; holds the closed flag.
    write_lock: Mutex<bool>,
}

impl Store {
    /// Opens a store and, when configured, seeds missing collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be initialized or seeding fails.
    pub async fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let operator = Self::create_operator(&config.provider)?;
        let seed = config.seed_on_open;

        let store = Self {
            inner: Arc::new(Inner {
                operator,
                config,
                write_lock: Mutex::new(false),
            }),
        };
        info!(provider = store.provider_name(), "opening store");

        if seed {
            let _guard = store.lock().await?;
            store.seed_locked().await?;
        }

        Ok(store)
    }

    /// Closes the store once in-flight writes have finished.
    ///
    /// Components and clones obtained earlier are closed with it.
    pub async fn close(self) {
        let mut closed = self.inner.write_lock.lock().await;
        *closed = true;
        info!(provider = self.provider_name(), "store closed");
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StoreProvider) -> Result<Operator, StoreError> {
        match provider {
            StoreProvider::Memory => Ok(Operator::new(services::Memory::default())
                .map_err(|e| StoreError::configuration(e.to_string()))?
                .finish()),
            StoreProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StoreError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StoreError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Employee directory backed by this store.
    #[must_use]
    pub fn employees(&self) -> EmployeeDirectory {
        EmployeeDirectory::new(self.clone())
    }

    /// Expense ledger backed by this store.
    #[must_use]
    pub fn expenses(&self) -> ExpenseLedger {
        ExpenseLedger::new(self.clone())
    }

    /// Custody transfer workflow backed by this store.
    #[must_use]
    pub fn custody(&self) -> CustodyTransfers {
        CustodyTransfers::new(self.clone())
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.inner.config.provider.name()
    }

    /// Waits out the configured latency.
    pub(crate) async fn simulate_latency(&self) {
        let latency = self.inner.config.simulated_latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    /// Acquires the write lock. Every read-modify-write holds it throughout.
    pub(crate) async fn lock(&self) -> Result<MutexGuard<'_, bool>, StoreError> {
        let guard = self.inner.write_lock.lock().await;
        if *guard {
            return Err(StoreError::Closed);
        }
        Ok(guard)
    }

    /// Writes the fixture roster and empty collections for missing keys.
    async fn seed_locked(&self) -> Result<(), StoreError> {
        if !self.exists(keys::EMPLOYEES).await? {
            let roster = fixture_employees();
            self.write_collection(keys::EMPLOYEES, &roster).await?;
            info!(count = roster.len(), "seeded employee roster");
        }
        if !self.exists(keys::EXPENSES).await? {
            self.write_collection::<Expense>(keys::EXPENSES, &[]).await?;
        }
        if !self.exists(keys::CUSTODY_CONFIRMATIONS).await? {
            self.write_collection::<CustodyRequest>(keys::CUSTODY_CONFIRMATIONS, &[])
                .await?;
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        match self.inner.operator.stat(key).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Reads one collection. `Ok(None)` means the key has never been written.
    pub(crate) async fn read_collection<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<Vec<T>>, StoreError> {
        let buffer = match self.inner.operator.read(key).await {
            Ok(buffer) => buffer,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&buffer.to_vec())
            .map(Some)
            .map_err(|source| {
                error!(key, error = %source, "stored collection is corrupt");
                StoreError::Corrupt {
                    key: key.to_string(),
                    source,
                }
            })
    }

    /// Replaces one collection.
    pub(crate) async fn write_collection<T: Serialize>(
        &self,
        key: &str,
        items: &[T],
    ) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(items).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.inner.operator.write(key, bytes).await?;
        debug!(key, count = items.len(), "collection written");
        Ok(())
    }

    /// Loads the roster, writing the fixture roster first if it is missing.
    pub(crate) async fn load_employees_locked(&self) -> Result<Vec<Employee>, StoreError> {
        if let Some(roster) = self.read_collection(keys::EMPLOYEES).await? {
            return Ok(roster);
        }
        let roster = fixture_employees();
        self.write_collection(keys::EMPLOYEES, &roster).await?;
        info!(count = roster.len(), "seeded employee roster on first access");
        Ok(roster)
    }

    /// Loads the expense ledger; a missing key is an empty ledger.
    pub(crate) async fn load_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        Ok(self
            .read_collection(keys::EXPENSES)
            .await?
            .unwrap_or_default())
    }

    /// Loads the custody requests; a missing key means none.
    pub(crate) async fn load_requests(&self) -> Result<Vec<CustodyRequest>, StoreError> {
        Ok(self
            .read_collection(keys::CUSTODY_CONFIRMATIONS)
            .await?
            .unwrap_or_default())
    }

    /// Writes raw bytes under a key, bypassing encoding.
    #[cfg(test)]
    pub(crate) async fn write_raw(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.inner.operator.write(key, bytes.to_vec()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_open_seeds_all_collections() {
        let store = Store::open(StoreConfig::memory()).await.unwrap();

        let roster: Vec<Employee> = store
            .read_collection(keys::EMPLOYEES)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(roster, fixture_employees());
        assert_eq!(
            store
                .read_collection::<Expense>(keys::EXPENSES)
                .await
                .unwrap(),
            Some(Vec::new())
        );
        assert_eq!(
            store
                .read_collection::<CustodyRequest>(keys::CUSTODY_CONFIRMATIONS)
                .await
                .unwrap(),
            Some(Vec::new())
        );
    }

    #[tokio::test]
    async fn test_open_without_seed_leaves_keys_missing() {
        let store = Store::open(StoreConfig::memory().with_seed_on_open(false))
            .await
            .unwrap();
        assert!(!store.exists(keys::EMPLOYEES).await.unwrap());
        assert!(store.load_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_roster_seeded_on_first_access() {
        let store = Store::open(StoreConfig::memory().with_seed_on_open(false))
            .await
            .unwrap();
        let roster = store.load_employees_locked().await.unwrap();
        assert_eq!(roster, fixture_employees());
        assert!(store.exists(keys::EMPLOYEES).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_reported() {
        let store = Store::open(StoreConfig::memory()).await.unwrap();
        store.write_raw(keys::EXPENSES, b"{not json").await.unwrap();

        let err = store.load_expenses().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == keys::EXPENSES));
    }

    #[tokio::test]
    async fn test_reopen_keeps_existing_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(StoreProvider::local_fs(dir.path()));

        let store = Store::open(config.clone()).await.unwrap();
        let mut roster = store.load_employees_locked().await.unwrap();
        roster[0].custody_balance += rust_decimal::Decimal::ONE;
        store
            .write_collection(keys::EMPLOYEES, &roster)
            .await
            .unwrap();
        store.close().await;

        let reopened = Store::open(config).await.unwrap();
        assert_eq!(reopened.load_employees_locked().await.unwrap(), roster);
    }

    #[tokio::test]
    async fn test_components_fail_after_close() {
        let store = Store::open(StoreConfig::memory()).await.unwrap();
        let employees = store.employees();
        let expenses = store.expenses();
        let handle = store.clone();
        assert!(employees.list().await.is_ok());

        store.close().await;

        assert!(matches!(employees.list().await.unwrap_err(), StoreError::Closed));
        assert!(matches!(expenses.list().await.unwrap_err(), StoreError::Closed));
        assert!(matches!(
            handle.custody().pending_incoming_count(&"emp_ahmed".into()).await,
            Err(StoreError::Closed)
        ));
    }

    #[rstest::rstest]
    #[case::memory(StoreProvider::Memory, "memory")]
    #[case::fs(StoreProvider::local_fs(std::env::temp_dir()), "fs")]
    #[tokio::test]
    async fn test_provider_name(#[case] provider: StoreProvider, #[case] name: &str) {
        let store = Store::open(StoreConfig::new(provider).with_seed_on_open(false))
            .await
            .unwrap();
        assert_eq!(store.provider_name(), name);
    }

    #[tokio::test]
    async fn test_simulated_latency() {
        let store = Store::open(StoreConfig::memory().with_latency(Duration::from_millis(20)))
            .await
            .unwrap();
        let started = Instant::now();
        store.simulate_latency().await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
