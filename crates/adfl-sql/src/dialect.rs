//! SQL dialect abstraction

use sqlparser::ast::Statement;
use sqlparser::dialect::Dialect;
use sqlparser::parser::Parser;

use crate::error::{SqlError, SqlResult};

/// Trait for SQL dialect implementations
pub trait SqlDialect: Send + Sync {
    /// Get the underlying sqlparser dialect
    fn parser_dialect(&self) -> &dyn Dialect;

    /// Parse SQL into AST statements
    fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        Parser::parse_sql(self.parser_dialect(), sql).map_err(|e| {
            let message = e.to_string();
            let (line, column) = parse_location_from_error(&message);
            SqlError::ParseError {
                message,
                line,
                column,
            }
        })
    }

    /// Get the dialect name
    fn name(&self) -> &'static str;
}

/// Pull "Line: N, Column: M" out of a sqlparser error message.
///
/// `ParserError` carries no structured location, only the rendered text.
fn parse_location_from_error(msg: &str) -> (usize, usize) {
    let number_after = |label: &str| -> Option<usize> {
        let start = msg.find(label)? + label.len();
        let digits: String = msg[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    };

    match (number_after("Line: "), number_after("Column: ")) {
        (Some(line), Some(column)) => (line, column),
        _ => (0, 0),
    }
}

/// Declare a unit dialect wrapper around a sqlparser dialect.
macro_rules! define_dialect {
    ($(#[$meta:meta])* $Name:ident => $Inner:path, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $Name {
            dialect: $Inner,
        }

        impl $Name {
            /// Create the dialect
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl SqlDialect for $Name {
            fn parser_dialect(&self) -> &dyn Dialect {
                &self.dialect
            }

            fn name(&self) -> &'static str {
                $label
            }
        }
    };
}

define_dialect!(
    /// Permissive dialect used when the source system is unknown (Oracle included)
    GenericDialect => sqlparser::dialect::GenericDialect, "generic"
);
define_dialect!(
    /// T-SQL, for Azure SQL, Synapse and on-premises SQL Server sources
    MsSqlDialect => sqlparser::dialect::MsSqlDialect, "mssql"
);
define_dialect!(
    /// Snowflake SQL dialect
    SnowflakeDialect => sqlparser::dialect::SnowflakeDialect, "snowflake"
);
define_dialect!(
    /// DuckDB SQL dialect
    DuckDbDialect => sqlparser::dialect::DuckDbDialect, "duckdb"
);
define_dialect!(
    /// Strict ANSI SQL
    AnsiDialect => sqlparser::dialect::AnsiDialect, "ansi"
);

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
