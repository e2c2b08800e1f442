//! fintrack - terminal personal-finance tracker
//!
//! This library provides the core functionality for the fintrack application:
//! recording income and expenses, monthly budget goals, savings goals,
//! recurring transactions, alerts and reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, goals, categories, etc.)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: Aggregations over stored transactions
//! - `alerts`: Budget and goal alerts
//! - `calculator`: Savings projections
//! - `export`: Export formats shared with the importer
//! - `display`, `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::paths::FinTrackPaths;
//! use fintrack::storage::Storage;
//!
//! let storage = Storage::open(FinTrackPaths::new()?)?;
//! let summary = fintrack::reports::FinancialSummary::from_transactions(
//!     &storage.transactions.get_all()?,
//! );
//! storage.close()?;
//! ```

pub mod alerts;
pub mod audit;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
