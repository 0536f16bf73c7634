use super::*;
use serde_json::json;

fn raw(value: serde_json::Value) -> LinkedServiceResource {
    serde_json::from_value(value).unwrap()
}

fn database(host: Parameter, database: Parameter) -> Option<LinkedServiceInfo> {
    Some(LinkedServiceInfo::Database { host, database })
}

#[test]
fn test_sql_server_connection_string() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "SqlDb",
        "properties": {
            "type": "AzureSqlDatabase",
            "typeProperties": {
                "connectionString": "Data Source=tcp:srv.database.windows.net,1433;Initial Catalog=sales;Encrypt=True"
            }
        }
    })));

    assert_eq!(ls.kind, LinkedServiceKind::AzureSql);
    assert_eq!(
        ls.info,
        database(
            Parameter::fixed("srv.database.windows.net"),
            Parameter::fixed("sales")
        )
    );
    assert_eq!(ls.host_prefix().as_deref(), Some("srv.database.windows.net.sales"));
}

#[test]
fn test_sql_server_legacy_connection_string_and_aliases() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "OnPrem",
        "properties": {
            "type": "SqlServer",
            "connectionString": "Server=onprem01;Database=erp;Integrated Security=True"
        }
    })));

    assert_eq!(
        ls.info,
        database(Parameter::fixed("onprem01"), Parameter::fixed("erp"))
    );
}

#[test]
fn test_sql_server_secure_string_unwrapped() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "Dw",
        "properties": {
            "type": "AzureSqlDW",
            "typeProperties": {
                "connectionString": {
                    "type": "SecureString",
                    "value": "Data Source=dw.sql.azuresynapse.net;Initial Catalog=pool"
                }
            }
        }
    })));

    assert_eq!(ls.host_prefix().as_deref(), Some("dw.sql.azuresynapse.net.pool"));
}

#[test]
fn test_vaulted_connection_string_has_no_info() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "Vaulted",
        "properties": {
            "type": "AzureSqlDatabase",
            "typeProperties": {
                "connectionString": {
                    "type": "AzureKeyVaultSecret",
                    "store": { "referenceName": "kv", "type": "LinkedServiceReference" },
                    "secretName": "sql-conn"
                }
            }
        }
    })));

    assert_eq!(ls.kind, LinkedServiceKind::AzureSql);
    assert!(ls.info.is_none());
    assert!(!ls.is_valid_for_lineage());
    assert_eq!(ls.host_prefix(), None);
}

#[test]
fn test_expression_marker_detected() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "Param",
        "properties": {
            "type": "AzureSqlDatabase",
            "typeProperties": {
                "connectionString": "Data Source=srv;Initial Catalog=@{linkedService().dbName}"
            }
        }
    })));

    let Some(LinkedServiceInfo::Database { host, database }) = &ls.info else {
        panic!("expected database info");
    };
    assert!(host.is_static());
    assert!(database.is_expression());
    assert!(!ls.is_valid_for_lineage());
    assert_eq!(ls.host_prefix(), None);
}

#[test]
fn test_missing_database_has_no_info() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "NoCatalog",
        "properties": {
            "type": "SqlServer",
            "typeProperties": { "connectionString": "Data Source=srv" }
        }
    })));
    assert!(ls.info.is_none());
}

#[test]
fn test_oracle_key_value_connection_string() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "Ora",
        "properties": {
            "type": "Oracle",
            "typeProperties": { "connectionString": "Host=orahost;Port=1521;SID=ORCL;User Id=reader" }
        }
    })));

    assert_eq!(
        ls.info,
        database(Parameter::fixed("orahost"), Parameter::fixed("ORCL"))
    );
}

#[test]
fn test_oracle_partial_connection_string_falls_back_to_server() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "OraMixed",
        "properties": {
            "type": "Oracle",
            "typeProperties": {
                "connectionString": "User Id=reader;Password=secret",
                "server": "(DESCRIPTION = (ADDRESS = (HOST = h4)(PORT = 1521))(CONNECT_DATA = (SID = s4)))"
            }
        }
    })));
    assert_eq!(ls.host_prefix().as_deref(), Some("h4.s4"));
}

#[test]
fn test_oracle_server_descriptor() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "OraTns",
        "properties": {
            "type": "Oracle",
            "typeProperties": { "server": "(DESCRIPTION=(ADDRESS=(HOST=h1)(PORT=1521))(CONNECT_DATA=(SID=s1)))" }
        }
    })));
    assert_eq!(ls.host_prefix().as_deref(), Some("h1.s1"));

    let ls = resolve_linked_service(&raw(json!({
        "name": "OraEz",
        "properties": {
            "type": "Oracle",
            "typeProperties": { "server": "h2:1521/svc" }
        }
    })));
    assert_eq!(ls.host_prefix().as_deref(), Some("h2.svc"));
}

#[test]
fn test_blob_storage_account_name() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "Blob",
        "properties": {
            "type": "AzureBlobStorage",
            "typeProperties": {
                "connectionString": "DefaultEndpointsProtocol=https;AccountName=acct01;AccountKey=abc=="
            }
        }
    })));

    assert_eq!(
        ls.info,
        Some(LinkedServiceInfo::Blob {
            url: Parameter::fixed("acct01")
        })
    );
}

#[test]
fn test_blob_storage_service_endpoint_fallback() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "BlobMsi",
        "properties": {
            "type": "AzureBlobStorage",
            "typeProperties": { "serviceEndpoint": "https://acct02.blob.core.windows.net/" }
        }
    })));

    assert_eq!(ls.host_prefix().as_deref(), Some("acct02.blob.core.windows.net"));
}

#[test]
fn test_data_lake_url_host() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "Lake",
        "properties": {
            "type": "AzureBlobFS",
            "typeProperties": { "url": "https://lake.dfs.core.windows.net/" }
        }
    })));

    assert_eq!(ls.host_prefix().as_deref(), Some("lake.dfs.core.windows.net"));
}

#[test]
fn test_unsupported_linked_service() {
    let ls = resolve_linked_service(&raw(json!({
        "name": "Rest",
        "properties": { "type": "RestService", "typeProperties": { "url": "https://api" } }
    })));

    assert_eq!(ls.kind, LinkedServiceKind::Unsupported);
    assert!(ls.info.is_none());
    assert!(!ls.is_valid_for_lineage());
}

#[test]
fn test_find_linked_service() {
    let services = resolve_linked_services(&[
        raw(json!({ "name": "A", "properties": { "type": "SqlServer" } })),
        raw(json!({ "name": "B", "properties": { "type": "Oracle" } })),
    ]);

    assert_eq!(find_linked_service(&services, "B").unwrap().kind, LinkedServiceKind::Oracle);
    assert!(find_linked_service(&services, "C").is_none());
}
