//! Metadata client over an exported factory directory
//!
//! Layout:
//!
//! ```text
//! <root>/datasets.json              required, array of dataset resources
//! <root>/linkedServices.json        required, array of linked service resources
//! <root>/pipelines.json             required, array of pipeline resources
//! <root>/triggers.json              optional
//! <root>/pipelineRuns.json          optional, array of pipeline runs
//! <root>/activityRuns/<runId>.json  optional, array of activity runs
//! ```

use crate::error::{ClientError, ClientResult};
use crate::records::{
    ActivityRun, DatasetResource, LinkedServiceResource, PipelineResource, PipelineRun,
    TriggerResource,
};
use crate::traits::MetadataClient;
use crate::window::TimeWindow;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const DATASETS_FILE: &str = "datasets.json";
const LINKED_SERVICES_FILE: &str = "linkedServices.json";
const PIPELINES_FILE: &str = "pipelines.json";
const TRIGGERS_FILE: &str = "triggers.json";
const PIPELINE_RUNS_FILE: &str = "pipelineRuns.json";
const ACTIVITY_RUNS_DIR: &str = "activityRuns";

/// Reads provider JSON exported to disk
#[derive(Debug, Clone)]
pub struct JsonExportClient {
    root: PathBuf,
}

impl JsonExportClient {
    /// Create a client rooted at an export directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The export directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_required<T: DeserializeOwned>(&self, file: &str) -> ClientResult<Vec<T>> {
        let path = self.root.join(file);
        match read_json(&path).await? {
            Some(items) => Ok(items),
            None => Err(ClientError::Unavailable {
                resource: file.trim_end_matches(".json").to_string(),
                message: format!("'{}' does not exist", path.display()),
            }),
        }
    }

    async fn read_optional<T: DeserializeOwned>(&self, path: &Path) -> ClientResult<Vec<T>> {
        Ok(read_json(path).await?.unwrap_or_default())
    }
}

/// Read a JSON array file; `Ok(None)` when the file does not exist
async fn read_json<T: DeserializeOwned>(path: &Path) -> ClientResult<Option<Vec<T>>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ClientError::Io {
                path: path.display().to_string(),
                source,
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| ClientError::Parse {
            path: path.display().to_string(),
            source,
        })
}

#[async_trait]
impl MetadataClient for JsonExportClient {
    async fn list_datasets(&self) -> ClientResult<Vec<DatasetResource>> {
        self.read_required(DATASETS_FILE).await
    }

    async fn list_linked_services(&self) -> ClientResult<Vec<LinkedServiceResource>> {
        self.read_required(LINKED_SERVICES_FILE).await
    }

    async fn list_pipelines(&self) -> ClientResult<Vec<PipelineResource>> {
        self.read_required(PIPELINES_FILE).await
    }

    async fn list_triggers(&self) -> ClientResult<Vec<TriggerResource>> {
        self.read_optional(&self.root.join(TRIGGERS_FILE)).await
    }

    async fn query_pipeline_runs(
        &self,
        pipeline_name: &str,
        window: &TimeWindow,
    ) -> ClientResult<Vec<PipelineRun>> {
        let runs: Vec<PipelineRun> = self
            .read_optional(&self.root.join(PIPELINE_RUNS_FILE))
            .await?;
        Ok(runs
            .into_iter()
            .filter(|run| run.pipeline_name == pipeline_name && window.contains(run.run_start))
            .collect())
    }

    async fn query_activity_runs(&self, run: &PipelineRun) -> ClientResult<Vec<ActivityRun>> {
        let path = self
            .root
            .join(ACTIVITY_RUNS_DIR)
            .join(format!("{}.json", run.run_id));
        let runs = self.read_optional(&path).await?;
        if runs.is_empty() {
            log::debug!("No activity runs recorded for run {}", run.run_id);
        }
        Ok(runs)
    }

    fn client_type(&self) -> &'static str {
        "json-export"
    }
}
