//! Linked-service resolution into host / database identity

use crate::connection::{
    normalize_sql_server_host, parse_kv_connection_string, parse_oracle_descriptor, url_host,
};
use crate::kind::LinkedServiceKind;
use crate::parameter::Parameter;
use adfl_client::LinkedServiceResource;
use serde_json::Value;
use std::collections::HashMap;

/// Markers of a value templated on linked-service parameters
const LINKED_SERVICE_EXPRESSION_MARKERS: [&str; 2] = ["@{linkedService()", "@linkedService()"];

/// Connection identity of a linked service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkedServiceInfo {
    Database { host: Parameter, database: Parameter },
    Blob { url: Parameter },
}

/// A resolved linked service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedService {
    pub name: String,
    pub kind: LinkedServiceKind,
    /// `None` when the connection could not be resolved (vaulted secret,
    /// missing fields, unsupported kind)
    pub info: Option<LinkedServiceInfo>,
}

impl LinkedService {
    /// True when the connection identity is fully static and may prefix names
    pub fn is_valid_for_lineage(&self) -> bool {
        if self.kind == LinkedServiceKind::Unsupported {
            return false;
        }
        match &self.info {
            Some(LinkedServiceInfo::Database { host, database }) => {
                host.is_static() && database.is_static()
            }
            Some(LinkedServiceInfo::Blob { url }) => url.is_static(),
            None => false,
        }
    }

    /// `host.database` for databases, the account host for blob stores
    pub fn host_prefix(&self) -> Option<String> {
        if !self.is_valid_for_lineage() {
            return None;
        }
        match self.info.as_ref()? {
            LinkedServiceInfo::Database { host, database } => {
                Some(format!("{}.{}", host.value, database.value))
            }
            LinkedServiceInfo::Blob { url } => Some(url.value.clone()),
        }
    }
}

/// Resolve one provider linked-service record
pub fn resolve_linked_service(raw: &LinkedServiceResource) -> LinkedService {
    let kind = LinkedServiceKind::from_provider_type(&raw.properties.provider_type);

    let info = match kind {
        k if k.is_sql_server_family() => resolve_sql_server(raw),
        LinkedServiceKind::Oracle => resolve_oracle(raw),
        LinkedServiceKind::Blob => resolve_blob(raw),
        _ => None,
    };

    if info.is_none() && kind != LinkedServiceKind::Unsupported {
        log::debug!(
            "Linked service '{}' ({}) has no resolvable connection info",
            raw.name,
            kind
        );
    }

    LinkedService {
        name: raw.name.clone(),
        kind,
        info,
    }
}

/// Resolve every provider linked-service record, preserving order
pub fn resolve_linked_services(raws: &[LinkedServiceResource]) -> Vec<LinkedService> {
    raws.iter().map(resolve_linked_service).collect()
}

/// First linked service with the given name
pub fn find_linked_service<'a>(
    linked_services: &'a [LinkedService],
    name: &str,
) -> Option<&'a LinkedService> {
    linked_services.iter().find(|ls| ls.name == name)
}

/// Plain string of a connection field, unwrapping `SecureString`.
///
/// Vault references and other shapes yield `None`.
fn connection_value(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) if map.get("type").and_then(Value::as_str) == Some("SecureString") => {
            map.get("value").and_then(Value::as_str)
        }
        _ => None,
    }
}

fn tagged(value: &str) -> Parameter {
    if LINKED_SERVICE_EXPRESSION_MARKERS
        .iter()
        .any(|marker| value.contains(marker))
    {
        Parameter::expression(value)
    } else {
        Parameter::fixed(value)
    }
}

fn first_of<'a>(props: &'a HashMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| props.get(*key))
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

fn resolve_sql_server(raw: &LinkedServiceResource) -> Option<LinkedServiceInfo> {
    let connection_string = raw.connection_string().and_then(connection_value)?;
    let props = parse_kv_connection_string(connection_string);

    let host = first_of(&props, &["datasource", "server", "address"])?;
    let database = first_of(&props, &["initialcatalog", "database"])?;

    Some(LinkedServiceInfo::Database {
        host: tagged(&normalize_sql_server_host(host)),
        database: tagged(database),
    })
}

fn resolve_oracle(raw: &LinkedServiceResource) -> Option<LinkedServiceInfo> {
    if let Some(connection_string) = raw.connection_string().and_then(connection_value) {
        let props = parse_kv_connection_string(connection_string);
        let host = first_of(&props, &["host"]);
        let database = first_of(&props, &["sid", "servicename"]);
        if let (Some(host), Some(database)) = (host, database) {
            return Some(LinkedServiceInfo::Database {
                host: tagged(host),
                database: tagged(database),
            });
        }
    }

    let server = raw
        .properties
        .type_properties
        .server
        .as_ref()
        .and_then(connection_value)?;
    let descriptor = parse_oracle_descriptor(server);
    let host = descriptor.host.as_deref()?;
    let database = descriptor.database()?;

    Some(LinkedServiceInfo::Database {
        host: tagged(host),
        database: tagged(database),
    })
}

fn resolve_blob(raw: &LinkedServiceResource) -> Option<LinkedServiceInfo> {
    let type_properties = &raw.properties.type_properties;

    let host = match raw.properties.provider_type.as_str() {
        "AzureBlobFS" => type_properties
            .url
            .as_ref()
            .and_then(connection_value)
            .and_then(url_host)
            .map(String::from),
        _ => raw
            .connection_string()
            .and_then(connection_value)
            .and_then(|cs| {
                parse_kv_connection_string(cs)
                    .remove("accountname")
                    .filter(|name| !name.is_empty())
            })
            .or_else(|| {
                type_properties
                    .service_endpoint
                    .as_ref()
                    .and_then(connection_value)
                    .and_then(url_host)
                    .map(String::from)
            }),
    }?;

    Some(LinkedServiceInfo::Blob {
        url: Parameter::fixed(host),
    })
}

#[cfg(test)]
#[path = "linked_service_test.rs"]
mod tests;
