//! Custody transfer requests.
//!
//! One employee asks to move part of their custody balance to another. The
//! balance moves only when the receiver confirms; a rejected request leaves
//! both balances untouched. Answered requests can be deleted, pending ones
//! cannot.
//!
//! # Modules
//!
//! - `types` - Request record, status and input types
//! - `error` - Custody-specific error types
//! - `service` - State machine for request answers and removal

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::CustodyError;
pub use service::CustodyWorkflow;
pub use types::{CustodyAction, CustodyRequest, CustodyStatus, NewCustodyRequest};
