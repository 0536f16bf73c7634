//! adfl-client - Metadata client layer for adf-lineage
//!
//! Defines the typed records returned by the orchestration provider
//! (datasets, linked services, pipelines, triggers, run history), the
//! [`MetadataClient`] trait every backend implements, and a backend that
//! reads an exported factory from disk.

pub mod error;
pub mod export;
pub mod records;
pub mod traits;
pub mod window;

pub use error::{ClientError, ClientResult};
pub use export::JsonExportClient;
pub use records::{
    Activity, ActivityRun, CopyActivityDefinition, DatasetReference, DatasetResource,
    ForEachActivity, IfConditionActivity, LinkedServiceResource, PipelineResource, PipelineRun,
    TriggerResource,
};
pub use traits::MetadataClient;
pub use window::TimeWindow;
