//! Batch ETL runner.
//!
//! Ties the ingestion, transform, and output crates together into one
//! linear job: Extract → Transform → Load, driven by a TOML job
//! configuration and narrated by an append-only progress log.

pub mod cli;
pub mod commands;
pub mod config;
pub mod driver;
pub mod logging;
pub mod progress;
