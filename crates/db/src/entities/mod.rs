//! `SeaORM` entity definitions.

pub mod reconciliation_records;
