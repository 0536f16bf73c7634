//! adfl-core - Core library for adf-lineage
//!
//! This crate turns factory metadata into table lineage: type classification,
//! connection-string decomposition, dataset and linked-service resolution,
//! copy-activity discovery, run-time parameter substitution, the per-pipeline
//! edge merge, OpenLineage event construction, and the extraction driver.

pub mod activity;
pub mod config;
pub mod connection;
pub mod dataset;
pub mod error;
pub mod event;
pub mod extract;
pub mod graph;
pub mod kind;
pub mod lineage;
pub mod linked_service;
pub mod output;
pub mod parameter;

pub use activity::{build_pipelines, flatten_copy_activities, CopyActivity, Pipeline};
pub use config::{Config, EdgeListScope};
pub use connection::{parse_kv_connection_string, parse_oracle_descriptor, OracleDescriptor};
pub use dataset::{
    resolve_dataset, resolve_datasets, Dataset, DatasetInfo, LocationDataset, QueryDataset,
    SingleTableDataset,
};
pub use error::{CoreError, CoreResult};
pub use event::{to_event_pair, EventType, RunEvent};
pub use extract::{extract_lineage, ExtractionReport, Extractor};
pub use graph::{fold_transitive, merge_edges, Edge, LineageGraph, PipelineLineage};
pub use kind::{DatasetKind, LinkedServiceKind};
pub use lineage::{add_host_prefix, LineageBuilder};
pub use linked_service::{resolve_linked_service, resolve_linked_services, LinkedService, LinkedServiceInfo};
pub use output::{build_events, write_edge_list, write_events};
pub use parameter::{substitute, Parameter, ParameterKind};
