//! Reader-query parser over sqlparser-rs

use crate::dialect::{
    AnsiDialect, DuckDbDialect, GenericDialect, MsSqlDialect, SnowflakeDialect, SqlDialect,
};
use crate::error::{SqlError, SqlResult};
use sqlparser::ast::Statement;

/// Parses copy-activity reader queries in one dialect
pub struct SqlParser {
    dialect: Box<dyn SqlDialect>,
}

impl SqlParser {
    /// Parser with the permissive generic dialect
    pub fn generic() -> Self {
        Self {
            dialect: Box::new(GenericDialect::new()),
        }
    }

    /// Parser for a dialect name; Oracle sources parse with the generic dialect
    pub fn from_dialect_name(name: &str) -> SqlResult<Self> {
        let dialect: Box<dyn SqlDialect> = match name.to_lowercase().as_str() {
            "generic" | "oracle" => Box::new(GenericDialect::new()),
            "mssql" | "tsql" | "sqlserver" => Box::new(MsSqlDialect::new()),
            "snowflake" => Box::new(SnowflakeDialect::new()),
            "duckdb" => Box::new(DuckDbDialect::new()),
            "ansi" => Box::new(AnsiDialect::new()),
            _ => return Err(SqlError::UnknownDialect(name.to_string())),
        };
        Ok(Self { dialect })
    }

    /// `from_dialect_name` when a name is given, generic otherwise
    pub fn for_dialect(name: Option<&str>) -> SqlResult<Self> {
        name.map_or_else(|| Ok(Self::generic()), Self::from_dialect_name)
    }

    /// Parse a query into statements. Blank input is `EmptySql`.
    pub fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(SqlError::EmptySql);
        }
        self.dialect.parse(sql)
    }

    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::generic()
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
