//! adfl-sql - SQL parsing layer for adf-lineage
//!
//! This crate provides SQL parsing using sqlparser-rs with dialect support
//! and base-table extraction (relations minus CTE aliases) for copy-activity
//! source queries.

pub mod dialect;
pub mod error;
pub mod extractor;
pub mod parser;

pub use dialect::{AnsiDialect, DuckDbDialect, GenericDialect, MsSqlDialect, SnowflakeDialect, SqlDialect};
pub use error::{SqlError, SqlResult};
pub use extractor::{extract_base_tables, extract_tables};
pub use parser::SqlParser;
