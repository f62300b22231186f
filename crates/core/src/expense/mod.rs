//! Expense ledger entries and their confirmation workflow.
//!
//! An expense moves its owner's custody balance by its signed amount the
//! moment it is recorded. Confirming or rejecting it later only changes the
//! status; deleting it is the one way to reverse the balance effect.
//!
//! # Modules
//!
//! - `types` - Expense record, status and input types
//! - `error` - Expense-specific error types
//! - `service` - Status transition logic

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::ExpenseError;
pub use service::ExpenseWorkflow;
pub use types::{EntryKind, Expense, ExpenseAction, ExpenseStatus, NewExpense};
