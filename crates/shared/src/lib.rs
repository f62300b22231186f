//! Shared types, errors, and configuration for the custody ledger.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error type
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LogSettings, StoreBackend, StoreSettings};
pub use error::{AppError, AppResult};
