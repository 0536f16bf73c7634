//! Output documents: OpenLineage events and the plain edge list

use crate::error::{CoreError, CoreResult};
use crate::event::{to_event_pair, RunEvent};
use crate::graph::{Edge, PipelineLineage};
use serde::Serialize;
use std::path::Path;

/// START/COMPLETE pairs for every pipeline, in processing order
pub fn build_events(lineages: &[PipelineLineage], namespace: &str, producer: &str) -> Vec<RunEvent> {
    lineages
        .iter()
        .flat_map(|lineage| {
            let (start, complete) = to_event_pair(namespace, producer, lineage);
            [start, complete]
        })
        .collect()
}

/// Write the OpenLineage document
pub fn write_events(path: &Path, events: &[RunEvent]) -> CoreResult<()> {
    write_json(path, &events)
}

/// Write the edge-list document
pub fn write_edge_list(path: &Path, edges: &[Edge]) -> CoreResult<()> {
    write_json(path, &edges)
}

/// Pretty-print `value` to `path`, creating parent directories
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> CoreResult<()> {
    let output_err = |source: std::io::Error| CoreError::Output {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(output_err)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(output_err)
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
