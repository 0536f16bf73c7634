//! Classification of provider type strings

use serde::Serialize;
use std::fmt;

/// Internal dataset kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DatasetKind {
    Oracle,
    /// Azure-managed relational database
    AzureSql,
    /// Dedicated SQL pool (warehouse)
    Synapse,
    OnPremMssql,
    /// Flat or columnar files in blob / data lake storage
    Blob,
    Unsupported,
}

impl DatasetKind {
    /// Map a provider dataset type; unknown strings are `Unsupported`
    pub fn from_provider_type(provider_type: &str) -> Self {
        match provider_type {
            "OracleTable" | "OracleSource" => Self::Oracle,
            "AzureSqlTable" => Self::AzureSql,
            "AzureSqlDWTable" => Self::Synapse,
            "SqlServerTable" => Self::OnPremMssql,
            "Parquet" | "DelimitedText" | "Json" => Self::Blob,
            _ => Self::Unsupported,
        }
    }

    /// Table-addressable database kinds
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Self::Oracle | Self::AzureSql | Self::Synapse | Self::OnPremMssql
        )
    }

    pub fn is_supported(self) -> bool {
        self != Self::Unsupported
    }

    /// Field of the copy source that carries the reader query at run time
    pub fn reader_query_field(self) -> Option<&'static str> {
        match self {
            Self::Oracle => Some("oracleReaderQuery"),
            Self::AzureSql | Self::Synapse | Self::OnPremMssql => Some("sqlReaderQuery"),
            Self::Blob | Self::Unsupported => None,
        }
    }

    /// Default SQL dialect for reader queries against this kind
    pub fn sql_dialect(self) -> Option<&'static str> {
        match self {
            Self::Oracle => Some("generic"),
            Self::AzureSql | Self::Synapse | Self::OnPremMssql => Some("mssql"),
            Self::Blob | Self::Unsupported => None,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Oracle => "oracle",
            Self::AzureSql => "azure_sql",
            Self::Synapse => "synapse",
            Self::OnPremMssql => "onprem_mssql",
            Self::Blob => "blob",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Internal linked-service kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LinkedServiceKind {
    Oracle,
    AzureSql,
    Synapse,
    OnPremMssql,
    Blob,
    Unsupported,
}

impl LinkedServiceKind {
    /// Map a provider linked-service type; unknown strings are `Unsupported`
    pub fn from_provider_type(provider_type: &str) -> Self {
        match provider_type {
            "Oracle" => Self::Oracle,
            "AzureSqlDatabase" => Self::AzureSql,
            "AzureSqlDW" => Self::Synapse,
            "SqlServer" => Self::OnPremMssql,
            "AzureBlobStorage" | "AzureBlobFS" => Self::Blob,
            _ => Self::Unsupported,
        }
    }

    /// Kinds configured through a SQL Server style connection string
    pub fn is_sql_server_family(self) -> bool {
        matches!(self, Self::AzureSql | Self::Synapse | Self::OnPremMssql)
    }
}

impl fmt::Display for LinkedServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Oracle => "oracle",
            Self::AzureSql => "azure_sql",
            Self::Synapse => "synapse",
            Self::OnPremMssql => "onprem_mssql",
            Self::Blob => "blob",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_kind_mapping() {
        assert_eq!(DatasetKind::from_provider_type("OracleTable"), DatasetKind::Oracle);
        assert_eq!(DatasetKind::from_provider_type("OracleSource"), DatasetKind::Oracle);
        assert_eq!(DatasetKind::from_provider_type("AzureSqlTable"), DatasetKind::AzureSql);
        assert_eq!(DatasetKind::from_provider_type("AzureSqlDWTable"), DatasetKind::Synapse);
        assert_eq!(DatasetKind::from_provider_type("SqlServerTable"), DatasetKind::OnPremMssql);
        assert_eq!(DatasetKind::from_provider_type("Parquet"), DatasetKind::Blob);
        assert_eq!(DatasetKind::from_provider_type("DelimitedText"), DatasetKind::Blob);
    }

    #[test]
    fn test_unknown_dataset_type_is_unsupported() {
        assert_eq!(DatasetKind::from_provider_type("CosmosDbSqlApiCollection"), DatasetKind::Unsupported);
        assert_eq!(DatasetKind::from_provider_type(""), DatasetKind::Unsupported);
        assert_eq!(DatasetKind::from_provider_type("azuresqltable"), DatasetKind::Unsupported);
        assert!(!DatasetKind::Unsupported.is_supported());
    }

    #[test]
    fn test_linked_service_kind_mapping() {
        assert_eq!(LinkedServiceKind::from_provider_type("Oracle"), LinkedServiceKind::Oracle);
        assert_eq!(LinkedServiceKind::from_provider_type("AzureSqlDatabase"), LinkedServiceKind::AzureSql);
        assert_eq!(LinkedServiceKind::from_provider_type("AzureSqlDW"), LinkedServiceKind::Synapse);
        assert_eq!(LinkedServiceKind::from_provider_type("SqlServer"), LinkedServiceKind::OnPremMssql);
        assert_eq!(LinkedServiceKind::from_provider_type("AzureBlobStorage"), LinkedServiceKind::Blob);
        assert_eq!(LinkedServiceKind::from_provider_type("AzureBlobFS"), LinkedServiceKind::Blob);
        assert_eq!(LinkedServiceKind::from_provider_type("Snowflake"), LinkedServiceKind::Unsupported);
    }

    #[test]
    fn test_reader_query_field() {
        assert_eq!(DatasetKind::Oracle.reader_query_field(), Some("oracleReaderQuery"));
        assert_eq!(DatasetKind::Synapse.reader_query_field(), Some("sqlReaderQuery"));
        assert_eq!(DatasetKind::Blob.reader_query_field(), None);
    }

    #[test]
    fn test_relational_kinds() {
        assert!(DatasetKind::AzureSql.is_relational());
        assert!(!DatasetKind::Blob.is_relational());
        assert!(LinkedServiceKind::OnPremMssql.is_sql_server_family());
        assert!(!LinkedServiceKind::Oracle.is_sql_server_family());
    }
}
