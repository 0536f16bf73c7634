//! OpenLineage run events

use crate::graph::PipelineLineage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Schema of the run event document
pub const RUN_EVENT_SCHEMA_URL: &str =
    "https://openlineage.io/spec/2-0-2/OpenLineage.json#/definitions/RunEvent";

/// Schema attached to every dataset facet
pub const DATASET_FACET_SCHEMA_URL: &str =
    "https://openlineage.io/spec/facets/1-0-0/DataSourceDatasetFacet.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Start,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunEvent {
    pub event_type: EventType,
    pub event_time: DateTime<Utc>,
    pub producer: String,
    #[serde(rename = "schemaURL")]
    pub schema_url: String,
    pub run: Run,
    pub job: Job,
    pub inputs: Vec<LineageDataset>,
    pub outputs: Vec<LineageDataset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub run_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub namespace: String,
    pub name: String,
}

/// Input or output dataset entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageDataset {
    pub namespace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<DatasetFacets>,
}

/// Facets marking a dataset that only appears as a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetFacets {
    pub data_source: DataSourceFacet,
    pub schema: FacetHeader,
    pub storage_dataset_facet: StorageFacet,
}

/// `_producer` / `_schemaURL` pair every facet carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetHeader {
    #[serde(rename = "_producer")]
    pub producer: String,
    #[serde(rename = "_schemaURL")]
    pub schema_url: String,
}

impl FacetHeader {
    fn new(producer: &str) -> Self {
        Self {
            producer: producer.to_string(),
            schema_url: DATASET_FACET_SCHEMA_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceFacet {
    #[serde(flatten)]
    pub header: FacetHeader,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageFacet {
    #[serde(flatten)]
    pub header: FacetHeader,
    pub is_source: bool,
}

impl DatasetFacets {
    fn source(producer: &str, pipeline_name: &str) -> Self {
        Self {
            data_source: DataSourceFacet {
                header: FacetHeader::new(producer),
                name: pipeline_name.to_string(),
                uri: DATASET_FACET_SCHEMA_URL.to_string(),
            },
            schema: FacetHeader::new(producer),
            storage_dataset_facet: StorageFacet {
                header: FacetHeader::new(producer),
                is_source: true,
            },
        }
    }
}

/// START and COMPLETE events for one pipeline's merged lineage.
///
/// Both share a fresh run id; each carries its own emission time. A root
/// edge becomes an output flagged as a source. Any other edge becomes one
/// input per parent plus one output.
pub fn to_event_pair(
    namespace: &str,
    producer: &str,
    pipeline_lineage: &PipelineLineage,
) -> (RunEvent, RunEvent) {
    let run_id = Uuid::new_v4().to_string();
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();

    let entry = |name: &str, facets: Option<DatasetFacets>| LineageDataset {
        namespace: namespace.to_string(),
        name: name.to_string(),
        facets,
    };

    for edge in &pipeline_lineage.lineage {
        if edge.is_root() {
            let facets = DatasetFacets::source(producer, &pipeline_lineage.pipeline_name);
            outputs.push(entry(&edge.node_name, Some(facets)));
        } else {
            inputs.extend(edge.parent_nodes.iter().map(|parent| entry(parent, None)));
            outputs.push(entry(&edge.node_name, None));
        }
    }

    let event = |event_type: EventType| RunEvent {
        event_type,
        event_time: Utc::now(),
        producer: producer.to_string(),
        schema_url: RUN_EVENT_SCHEMA_URL.to_string(),
        run: Run {
            run_id: run_id.clone(),
        },
        job: Job {
            namespace: namespace.to_string(),
            name: pipeline_lineage.pipeline_name.clone(),
        },
        inputs: inputs.clone(),
        outputs: outputs.clone(),
    };

    let start = event(EventType::Start);
    let complete = event(EventType::Complete);
    (start, complete)
}

#[cfg(test)]
#[path = "event_test.rs"]
mod tests;
