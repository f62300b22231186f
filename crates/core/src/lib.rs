//! Core business logic for the custody ledger.
//!
//! This crate contains pure business logic with ZERO storage dependencies.
//! All domain types, transition rules, and balance calculations live here.
//!
//! # Modules
//!
//! - `employee` - Employee roster and custody balance arithmetic
//! - `expense` - Expense ledger entries and their confirmation workflow
//! - `custody` - Custody transfer requests between employees
//! - `views` - Per-employee filtering and summaries

pub mod custody;
pub mod employee;
pub mod expense;
pub mod views;
