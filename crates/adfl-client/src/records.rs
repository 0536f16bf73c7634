//! Typed provider records
//!
//! These mirror the factory REST JSON closely enough to deserialize an
//! exported resource listing. Optional provider fields are `Option` here so
//! downstream code never probes for attribute existence.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Reference to another factory resource by name
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceReference {
    pub reference_name: String,
}

// ---------------------------------------------------------------------------
// Datasets
// ---------------------------------------------------------------------------

/// A dataset definition
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetResource {
    pub name: String,
    pub properties: DatasetProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProperties {
    /// Provider type string, e.g. `AzureSqlTable` or `Parquet`
    #[serde(rename = "type")]
    pub provider_type: String,

    /// Absent for some workspace-native datasets (e.g. SQL pool tables)
    #[serde(default)]
    pub linked_service_name: Option<ResourceReference>,

    #[serde(default)]
    pub type_properties: DatasetTypeProperties,
}

/// Locator fields; each is a literal string or an `{ "value": ..., "type": "Expression" }` object
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetTypeProperties {
    #[serde(default)]
    pub schema: Option<Value>,
    #[serde(default)]
    pub table: Option<Value>,
    /// Legacy single-field locator
    #[serde(default)]
    pub table_name: Option<Value>,
}

impl DatasetResource {
    /// Name of the linked service backing this dataset, empty when none
    pub fn linked_service_name(&self) -> &str {
        self.properties
            .linked_service_name
            .as_ref()
            .map(|r| r.reference_name.as_str())
            .unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Linked services
// ---------------------------------------------------------------------------

/// A linked service (connection profile) definition
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedServiceResource {
    pub name: String,
    pub properties: LinkedServiceProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedServiceProperties {
    /// Provider type string, e.g. `SqlServer` or `AzureBlobFS`
    #[serde(rename = "type")]
    pub provider_type: String,

    #[serde(default)]
    pub type_properties: LinkedServiceTypeProperties,

    /// Legacy location of the connection string, outside `typeProperties`
    #[serde(default)]
    pub connection_string: Option<Value>,
}

/// Connection fields; values may be plain strings, `SecureString` wrappers,
/// or vault references
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedServiceTypeProperties {
    #[serde(default)]
    pub connection_string: Option<Value>,
    /// Oracle server descriptor (TNS or easy-connect)
    #[serde(default)]
    pub server: Option<Value>,
    /// Data Lake endpoint
    #[serde(default)]
    pub url: Option<Value>,
    /// Blob service endpoint
    #[serde(default)]
    pub service_endpoint: Option<Value>,
}

impl LinkedServiceResource {
    /// Connection string value, preferring `typeProperties` over the legacy field
    pub fn connection_string(&self) -> Option<&Value> {
        self.properties
            .type_properties
            .connection_string
            .as_ref()
            .or(self.properties.connection_string.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Pipelines and activities
// ---------------------------------------------------------------------------

/// A pipeline definition
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineResource {
    pub name: String,
    #[serde(default)]
    pub properties: PipelineProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineProperties {
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Pipeline activity tree, closed over the shapes lineage cares about
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Activity {
    Copy(CopyActivityDefinition),
    IfCondition(IfConditionActivity),
    ForEach(ForEachActivity),
    /// Every other activity type (Lookup, SetVariable, ExecutePipeline, ...)
    #[serde(other)]
    Other,
}

/// A Copy activity with its dataset references
#[derive(Debug, Clone, Deserialize)]
pub struct CopyActivityDefinition {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<DatasetReference>,
    #[serde(default)]
    pub outputs: Vec<DatasetReference>,
}

/// Dataset reference with the parameter bindings passed to the dataset template
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetReference {
    pub reference_name: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl DatasetReference {
    /// Names of the dataset parameters bound by this reference
    pub fn parameter_names(&self) -> Vec<String> {
        self.parameters.keys().cloned().collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IfConditionActivity {
    pub name: String,
    #[serde(default)]
    pub type_properties: IfConditionProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IfConditionProperties {
    #[serde(default)]
    pub if_true_activities: Option<Vec<Activity>>,
    #[serde(default)]
    pub if_false_activities: Option<Vec<Activity>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForEachActivity {
    pub name: String,
    #[serde(default)]
    pub type_properties: ForEachProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForEachProperties {
    #[serde(default)]
    pub activities: Vec<Activity>,
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// A trigger definition
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerResource {
    pub name: String,
    pub properties: TriggerProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerProperties {
    #[serde(rename = "type")]
    pub trigger_type: String,
    #[serde(default)]
    pub runtime_state: Option<String>,
    #[serde(default)]
    pub pipelines: Vec<TriggerPipelineReference>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerPipelineReference {
    pub pipeline_reference: ResourceReference,
}

impl TriggerResource {
    /// Whether the trigger is currently active
    pub fn is_started(&self) -> bool {
        self.properties.runtime_state.as_deref() == Some("Started")
    }

    /// Names of the pipelines this trigger starts
    pub fn pipeline_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .pipelines
            .iter()
            .map(|p| p.pipeline_reference.reference_name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Run history
// ---------------------------------------------------------------------------

/// One execution of a pipeline
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    pub run_id: String,
    pub pipeline_name: String,
    pub run_start: DateTime<Utc>,
    /// `None` while the run is still in progress
    #[serde(default)]
    pub run_end: Option<DateTime<Utc>>,
    /// Set on the most recent run of a rerun group
    #[serde(default)]
    pub is_latest: bool,
    /// Pipeline parameter values the run was started with
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

/// One execution of an activity inside a pipeline run
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRun {
    pub activity_name: String,
    pub activity_type: String,
    /// Resolved activity input as captured by the run (source/sink settings)
    #[serde(default)]
    pub input: Option<Value>,
    #[serde(default)]
    pub output: Option<Value>,
}

impl ActivityRun {
    /// Whether this run belongs to a Copy activity
    pub fn is_copy(&self) -> bool {
        self.activity_type == "Copy"
    }

    /// String field of the captured `input.source` object, e.g. `sqlReaderQuery`
    pub fn source_field(&self, key: &str) -> Option<&str> {
        self.input.as_ref()?.get("source")?.get(key)?.as_str()
    }
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
