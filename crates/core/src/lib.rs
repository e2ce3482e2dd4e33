//! Core business logic for the reconciliation service.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Month parsing, spreadsheet schema mapping and chart series live here.
//!
//! # Modules
//!
//! - `reconciliation` - Monthly uploads and balance history

pub mod reconciliation;
