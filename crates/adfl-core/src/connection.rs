//! Connection string and Oracle descriptor parsing

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Split a `key=value;key=value` connection string.
///
/// Keys are lower-cased with spaces removed (`Initial Catalog` becomes
/// `initialcatalog`); each segment splits on its first `=`, so values may
/// contain `=`. Segments without `=` are ignored.
pub fn parse_kv_connection_string(s: &str) -> HashMap<String, String> {
    s.split(';')
        .filter_map(|segment| segment.split_once('='))
        .map(|(key, value)| {
            let key: String = key
                .chars()
                .filter(|c| *c != ' ')
                .flat_map(char::to_lowercase)
                .collect();
            (key, value.trim().to_string())
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Host and database identity parsed from an Oracle server specification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OracleDescriptor {
    pub host: Option<String>,
    pub sid: Option<String>,
    pub service_name: Option<String>,
}

impl OracleDescriptor {
    /// Database identity, preferring `sid` over `service_name`
    pub fn database(&self) -> Option<&str> {
        self.sid.as_deref().or(self.service_name.as_deref())
    }
}

/// Parse a TNS descriptor (`(DESCRIPTION=...)`) or easy-connect string
/// (`host[:port]/service_name`).
pub fn parse_oracle_descriptor(descriptor: &str) -> OracleDescriptor {
    let text = descriptor.trim();
    if is_tns_descriptor(text) {
        return OracleDescriptor {
            host: tns_value(text, TnsKey::Host),
            sid: tns_value(text, TnsKey::Sid),
            service_name: tns_value(text, TnsKey::ServiceName),
        };
    }

    let host = text
        .split([':', '/'])
        .next()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(String::from);
    let service_name = text
        .split_once('/')
        .map(|(_, service)| service.trim())
        .filter(|s| !s.is_empty())
        .map(String::from);

    OracleDescriptor {
        host,
        sid: None,
        service_name,
    }
}

fn is_tns_descriptor(text: &str) -> bool {
    static DESCRIPTION: OnceLock<Regex> = OnceLock::new();
    DESCRIPTION
        .get_or_init(|| Regex::new(r"(?i)\(\s*DESCRIPTION\s*=").expect("valid regex"))
        .is_match(text)
}

#[derive(Clone, Copy)]
enum TnsKey {
    Host,
    Sid,
    ServiceName,
}

fn tns_value(text: &str, key: TnsKey) -> Option<String> {
    static HOST: OnceLock<Regex> = OnceLock::new();
    static SID: OnceLock<Regex> = OnceLock::new();
    static SERVICE_NAME: OnceLock<Regex> = OnceLock::new();

    let (cell, pattern) = match key {
        TnsKey::Host => (&HOST, r"(?i)\(\s*HOST\s*=\s*([^)]+?)\s*\)"),
        TnsKey::Sid => (&SID, r"(?i)\(\s*SID\s*=\s*([^)]+?)\s*\)"),
        TnsKey::ServiceName => (&SERVICE_NAME, r"(?i)\(\s*SERVICE_NAME\s*=\s*([^)]+?)\s*\)"),
    };
    let re = cell.get_or_init(|| Regex::new(pattern).expect("valid regex"));
    re.captures(text).map(|caps| caps[1].to_string())
}

/// Strip a `tcp:` prefix and a trailing `,port` from a SQL Server host
pub fn normalize_sql_server_host(host: &str) -> String {
    let host = host.trim();
    let host = host
        .get(..4)
        .filter(|prefix| prefix.eq_ignore_ascii_case("tcp:"))
        .map_or(host, |_| &host[4..]);
    host.split(',').next().unwrap_or(host).trim().to_string()
}

/// Host segment of a URL: the text between `//` and the next `/`
pub fn url_host(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("//")?;
    let host = rest.split('/').next().unwrap_or(rest);
    (!host.is_empty()).then_some(host)
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
