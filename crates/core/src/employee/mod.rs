//! Employee roster and custody balances.
//!
//! Employees are the leaf dependency of the ledger: expenses and custody
//! transfers resolve display names from the roster and move balances on it.
//!
//! # Modules
//!
//! - `types` - Employee record and balance arithmetic
//! - `error` - Balance overflow error
//! - `fixtures` - Static roster used to seed an empty store

pub mod error;
pub mod fixtures;
pub mod types;

pub use error::BalanceOverflow;
pub use fixtures::fixture_employees;
pub use types::{Employee, UNKNOWN_EMPLOYEE_NAME, apply_balance_deltas, find, resolve_name};
