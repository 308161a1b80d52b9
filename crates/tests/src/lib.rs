//! Integration and end-to-end tests for the hot state cache.
//!
//! This crate contains the cross-crate test suites:
//!
//! - `ingest_tests`: block ingestion through the updater, decoded snapshot
//!   contents, and hit/miss accounting
//! - `retention_tests`: history bounds under small retention windows
//! - `reorg_tests`: rollback and replay across chain reorganizations
//! - `validation_tests`: shadow-mode drift detection against a mutable
//!   canonical state
//! - `facade_tests`: the node boundary, including typed Uniswap V2 access
//!   and disabled-cache behavior
//! - `concurrency_tests`: reader consistency while writers ingest and reorg
//! - `mock_infrastructure`: reusable mock state reader and header builders
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --package tests
//! ```

pub mod mock_infrastructure;


#[cfg(test)]
mod retention_tests;

#[cfg(test)]
mod reorg_tests;


#[cfg(test)]
mod facade_tests;
