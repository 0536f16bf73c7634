//! Metadata client trait definition

use crate::error::ClientResult;
use crate::records::{
    ActivityRun, DatasetResource, LinkedServiceResource, PipelineResource, PipelineRun,
    TriggerResource,
};
use crate::window::TimeWindow;
use async_trait::async_trait;

/// Source of factory metadata and run history
///
/// Implementations must be Send + Sync for async operation. Each listing
/// either succeeds (possibly empty) or fails as a whole.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// List every dataset definition
    async fn list_datasets(&self) -> ClientResult<Vec<DatasetResource>>;

    /// List every linked service definition
    async fn list_linked_services(&self) -> ClientResult<Vec<LinkedServiceResource>>;

    /// List every pipeline definition
    async fn list_pipelines(&self) -> ClientResult<Vec<PipelineResource>>;

    /// List every trigger definition
    async fn list_triggers(&self) -> ClientResult<Vec<TriggerResource>>;

    /// Runs of `pipeline_name` updated inside `window`
    async fn query_pipeline_runs(
        &self,
        pipeline_name: &str,
        window: &TimeWindow,
    ) -> ClientResult<Vec<PipelineRun>>;

    /// Activity runs recorded for one pipeline run
    async fn query_activity_runs(&self, run: &PipelineRun) -> ClientResult<Vec<ActivityRun>>;

    /// Client type identifier for logging
    fn client_type(&self) -> &'static str;
}
