//! End-to-end extraction over a metadata client

use crate::activity::{build_pipelines, Pipeline};
use crate::config::{Config, EdgeListScope};
use crate::dataset::resolve_datasets;
use crate::error::{CoreError, CoreResult};
use crate::graph::{Edge, PipelineLineage};
use crate::lineage::LineageBuilder;
use crate::linked_service::resolve_linked_services;
use adfl_client::{MetadataClient, PipelineRun, TimeWindow};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Result of one extraction pass
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// One entry per processed pipeline, in processing order
    pub lineages: Vec<PipelineLineage>,
    /// Pipelines skipped because their run history could not be fetched
    pub skipped_pipelines: Vec<String>,
}

impl ExtractionReport {
    /// Edges written to the plain edge-list document
    pub fn edge_list(&self, scope: EdgeListScope) -> Vec<Edge> {
        match scope {
            EdgeListScope::Last => self
                .lineages
                .last()
                .map(|l| l.lineage.clone())
                .unwrap_or_default(),
            EdgeListScope::All => self
                .lineages
                .iter()
                .flat_map(|l| l.lineage.iter().cloned())
                .collect(),
        }
    }
}

/// Drives one extraction: metadata listing, static resolution, then one
/// lineage computation per pipeline's latest run
pub struct Extractor<'a> {
    client: &'a dyn MetadataClient,
    config: &'a Config,
}

impl<'a> Extractor<'a> {
    pub fn new(client: &'a dyn MetadataClient, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// Run the extraction with the lookback window ending at `now`.
    ///
    /// Fails only when a bulk listing (datasets, linked services, pipelines,
    /// or triggers with `only_triggered`) fails. Per-pipeline run history
    /// failures skip that pipeline.
    pub async fn run(&self, now: DateTime<Utc>) -> CoreResult<ExtractionReport> {
        log::info!("Extracting datasets (client: {})", self.client.client_type());
        let raw_datasets = self
            .client
            .list_datasets()
            .await
            .map_err(|source| CoreError::Upstream {
                resource: "datasets",
                source,
            })?;
        let datasets = resolve_datasets(&raw_datasets);
        log::info!("Extracting datasets: {} found", datasets.len());

        log::info!("Extracting linked services");
        let raw_linked_services = self
            .client
            .list_linked_services()
            .await
            .map_err(|source| CoreError::Upstream {
                resource: "linked services",
                source,
            })?;
        let linked_services = resolve_linked_services(&raw_linked_services);
        log::info!("Extracting linked services: {} found", linked_services.len());

        log::info!("Extracting pipelines");
        let raw_pipelines = self
            .client
            .list_pipelines()
            .await
            .map_err(|source| CoreError::Upstream {
                resource: "pipelines",
                source,
            })?;
        log::info!("Extracting pipelines: {} found", raw_pipelines.len());

        let triggered = if self.config.only_triggered {
            Some(self.started_pipeline_names().await?)
        } else {
            None
        };

        let pipelines = build_pipelines(&raw_pipelines, &datasets);
        let builder = LineageBuilder::new(&linked_services)
            .with_fqn(self.config.use_fqn)
            .with_sql_dialect(self.config.sql_dialect.clone())
            .with_transitive(self.config.transitive);

        let mut report = ExtractionReport::default();

        log::info!("Extracting lineage");
        let Some(window) = TimeWindow::lookback(self.config.lookback_days, now) else {
            log::warn!(
                "Lookback of {} days is below 1, no pipeline runs searched",
                self.config.lookback_days
            );
            log::info!("Lineage found: 0");
            return Ok(report);
        };

        let mut processed: HashSet<String> = HashSet::new();

        for raw in &raw_pipelines {
            if let Some(names) = &triggered {
                if !names.contains(&raw.name) {
                    log::debug!("Pipeline '{}' has no started trigger, skipping", raw.name);
                    continue;
                }
            }

            let runs = match self.client.query_pipeline_runs(&raw.name, &window).await {
                Ok(runs) => runs,
                Err(e) => {
                    log::warn!("Pipeline '{}': run history unavailable: {}", raw.name, e);
                    report.skipped_pipelines.push(raw.name.clone());
                    continue;
                }
            };

            for run in runs.iter().filter(|r| r.is_latest) {
                if processed.contains(&run.pipeline_name) {
                    continue;
                }
                let Some(pipeline) = pipelines.iter().find(|p| p.name == run.pipeline_name) else {
                    log::warn!(
                        "Run '{}' belongs to unknown pipeline '{}'",
                        run.run_id,
                        run.pipeline_name
                    );
                    continue;
                };

                match self.run_lineage(&builder, pipeline, run).await {
                    Some(lineage) => {
                        report.lineages.push(lineage);
                        processed.insert(run.pipeline_name.clone());
                    }
                    None => {
                        report.skipped_pipelines.push(run.pipeline_name.clone());
                        break;
                    }
                }
            }
        }

        log::info!("Lineage found: {}", report.lineages.len());
        Ok(report)
    }

    async fn run_lineage(
        &self,
        builder: &LineageBuilder<'_>,
        pipeline: &Pipeline,
        run: &PipelineRun,
    ) -> Option<PipelineLineage> {
        let activity_runs = match self.client.query_activity_runs(run).await {
            Ok(runs) => runs,
            Err(e) => {
                log::warn!(
                    "Pipeline '{}': activity runs of '{}' unavailable: {}",
                    pipeline.name,
                    run.run_id,
                    e
                );
                return None;
            }
        };

        let lineage = builder.pipeline_run_lineage(pipeline, &run.parameters, &activity_runs);
        log::debug!(
            "Pipeline '{}' run '{}': {} edges",
            pipeline.name,
            run.run_id,
            lineage.len()
        );

        Some(PipelineLineage {
            pipeline_name: pipeline.name.clone(),
            lineage,
        })
    }

    /// Pipelines referenced by at least one started trigger
    async fn started_pipeline_names(&self) -> CoreResult<HashSet<String>> {
        log::info!("Extracting triggers");
        let triggers = self
            .client
            .list_triggers()
            .await
            .map_err(|source| CoreError::Upstream {
                resource: "triggers",
                source,
            })?;

        Ok(triggers
            .iter()
            .filter(|t| t.is_started())
            .flat_map(|t| t.pipeline_names())
            .map(String::from)
            .collect())
    }
}

/// Convenience wrapper around [`Extractor::run`]
pub async fn extract_lineage(
    client: &dyn MetadataClient,
    config: &Config,
    now: DateTime<Utc>,
) -> CoreResult<ExtractionReport> {
    Extractor::new(client, config).run(now).await
}
