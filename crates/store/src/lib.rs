//! Persistent store for the custody ledger.
//!
//! The three collections (employees, expenses, custody requests) are kept
//! as JSON arrays under fixed keys in a key-value backend provided by
//! Apache OpenDAL:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ EmployeeDirectory │ ExpenseLedger │ CustodyTransfers     │
//! ├──────────────────────────────────────────────────────────┤
//! │ Store  (open / seed once / write lock / close)           │
//! ├──────────────────────────────────────────────────────────┤
//! │ OpenDAL Operator  (memory | local filesystem)            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation is a full read-modify-write of the collections it
//! touches, serialized by a single write lock held by the [`Store`].

mod commit;
pub mod config;
pub mod custody;
pub mod employees;
pub mod error;
pub mod expenses;
mod service;

pub use config::{StoreConfig, StoreProvider};
pub use custody::CustodyTransfers;
pub use employees::EmployeeDirectory;
pub use error::StoreError;
pub use expenses::ExpenseLedger;
pub use service::{Store, keys};
