//! Static and expression-valued locator parameters

use crate::dataset::SingleTableDataset;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Whether a parameter value is a resolved literal or an unresolved template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParameterKind {
    Static,
    Expression,
}

/// A locator value (schema, table, host, ...) tagged with its kind.
///
/// An `Expression` value must be substituted before it is rendered into a
/// lineage identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub value: String,
    pub kind: ParameterKind,
}

impl Parameter {
    pub fn fixed(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: ParameterKind::Static,
        }
    }

    pub fn expression(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: ParameterKind::Expression,
        }
    }

    /// Build from a provider field: a JSON string is `Static`, an object
    /// carrying a string `value` is an `Expression`. Anything else is `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::fixed(s.as_str())),
            Value::Object(map) => map
                .get("value")
                .and_then(Value::as_str)
                .map(Self::expression),
            _ => None,
        }
    }

    pub fn is_static(&self) -> bool {
        self.kind == ParameterKind::Static
    }

    pub fn is_expression(&self) -> bool {
        self.kind == ParameterKind::Expression
    }
}

/// Apply run-time parameter values to the expression-valued parts of a
/// single-table dataset.
///
/// Only names listed in `declared_param_names` that also have a run value are
/// substituted, for both `@{dataset().name}` and `@dataset().name`. Every
/// `Expression` part becomes `Static` afterwards; unmatched placeholders stay
/// in the text as-is.
pub fn substitute(
    dataset: &SingleTableDataset,
    declared_param_names: &[String],
    run_parameters: &HashMap<String, String>,
) -> SingleTableDataset {
    let replacements: Vec<(String, &str)> = declared_param_names
        .iter()
        .filter_map(|name| run_parameters.get(name).map(|value| (name, value.as_str())))
        .flat_map(|(name, value)| {
            [
                (format!("@{{dataset().{name}}}"), value),
                (format!("@dataset().{name}"), value),
            ]
        })
        .collect();

    let apply = |part: &Option<Parameter>| -> Option<Parameter> {
        part.as_ref().map(|param| {
            if param.is_static() {
                return param.clone();
            }
            let value = replacements
                .iter()
                .fold(param.value.clone(), |acc, (key, value)| acc.replace(key.as_str(), value));
            Parameter::fixed(value)
        })
    };

    SingleTableDataset {
        name: dataset.name.clone(),
        kind: dataset.kind,
        schema: apply(&dataset.schema),
        table: apply(&dataset.table),
    }
}
