//! Per-run table lineage: source/target resolution, name qualification, merge

use crate::activity::{CopyActivity, Pipeline};
use crate::dataset::{Dataset, DatasetInfo, SingleTableDataset};
use crate::graph::{fold_transitive, merge_edges, Edge};
use crate::linked_service::{find_linked_service, LinkedService};
use crate::parameter::substitute;
use adfl_client::ActivityRun;
use std::collections::{BTreeSet, HashMap};

/// Computes the merged edge list of one pipeline run
#[derive(Debug, Clone)]
pub struct LineageBuilder<'a> {
    linked_services: &'a [LinkedService],
    use_fqn: bool,
    sql_dialect: Option<String>,
    transitive: bool,
}

impl<'a> LineageBuilder<'a> {
    /// Builder with fully-qualified names on and per-kind SQL dialects
    pub fn new(linked_services: &'a [LinkedService]) -> Self {
        Self {
            linked_services,
            use_fqn: true,
            sql_dialect: None,
            transitive: false,
        }
    }

    pub fn with_fqn(mut self, use_fqn: bool) -> Self {
        self.use_fqn = use_fqn;
        self
    }

    /// Parse every reader query with this dialect instead of the per-kind default
    pub fn with_sql_dialect(mut self, dialect: Option<String>) -> Self {
        self.sql_dialect = dialect;
        self
    }

    /// Fold indirect ancestors into every merged edge's parents
    pub fn with_transitive(mut self, transitive: bool) -> Self {
        self.transitive = transitive;
        self
    }

    /// Merged lineage for one run of `pipeline`.
    ///
    /// Only Copy activity runs count. Each is matched by name to the first
    /// static copy activity; runs with no static counterpart are skipped.
    pub fn pipeline_run_lineage(
        &self,
        pipeline: &Pipeline,
        run_parameters: &HashMap<String, String>,
        activity_runs: &[ActivityRun],
    ) -> Vec<Edge> {
        let mut lineage: Vec<Edge> = Vec::new();

        for run in activity_runs.iter().filter(|r| r.is_copy()) {
            let Some(activity) = pipeline.copy_activity(&run.activity_name) else {
                log::warn!(
                    "Pipeline '{}': no copy activity named '{}', skipping run",
                    pipeline.name,
                    run.activity_name
                );
                continue;
            };

            if let Some(edge) = self.activity_edge(activity, run_parameters, run) {
                lineage = merge_edges(lineage, vec![edge]);
            }
        }

        if self.transitive {
            fold_transitive(&lineage)
        } else {
            lineage
        }
    }

    /// Edge contributed by a single copy activity run, if it yields lineage
    pub fn activity_edge(
        &self,
        activity: &CopyActivity,
        run_parameters: &HashMap<String, String>,
        run: &ActivityRun,
    ) -> Option<Edge> {
        if !activity.is_supported() {
            log::debug!("Copy activity '{}' has an unsupported endpoint", activity.name);
            return None;
        }
        let input = activity.input.as_ref()?;
        let output = activity.output.as_ref()?;

        if !matches!(
            output.info,
            Some(DatasetInfo::SingleTable(_)) | Some(DatasetInfo::Location(_))
        ) {
            log::debug!(
                "Copy activity '{}' writes to '{}', which is not a table or location",
                activity.name,
                output.name
            );
            return None;
        }

        let sources = self.source_tables(input, &activity.input_parameter_names, run_parameters, run);
        let Some(target) = target_table(output, &activity.output_parameter_names, run_parameters) else {
            log::debug!(
                "Copy activity '{}': target of '{}' could not be resolved",
                activity.name,
                output.name
            );
            return None;
        };

        let parents: Vec<String> = sources
            .iter()
            .map(|source| self.qualify(input, source))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Some(Edge::new(self.qualify(output, &target), parents))
    }

    /// Tables read by the input side of a copy run
    pub fn source_tables(
        &self,
        input: &Dataset,
        parameter_names: &[String],
        run_parameters: &HashMap<String, String>,
        run: &ActivityRun,
    ) -> BTreeSet<String> {
        match &input.info {
            Some(DatasetInfo::SingleTable(table)) => {
                single_table_name(table, parameter_names, run_parameters)
                    .into_iter()
                    .collect()
            }
            Some(DatasetInfo::Query(query)) => {
                let Some(field) = query.kind.reader_query_field() else {
                    return BTreeSet::new();
                };
                let Some(sql) = run.source_field(field) else {
                    log::warn!(
                        "Copy activity '{}': no {} captured for dataset '{}'",
                        run.activity_name,
                        field,
                        input.name
                    );
                    return BTreeSet::new();
                };
                let dialect = self.sql_dialect.as_deref().or(query.kind.sql_dialect());
                match adfl_sql::extract_tables(sql, dialect) {
                    Ok(tables) => tables,
                    Err(e) => {
                        log::warn!(
                            "Copy activity '{}': could not parse source query: {}",
                            run.activity_name,
                            e
                        );
                        BTreeSet::new()
                    }
                }
            }
            Some(DatasetInfo::Location(location)) => BTreeSet::from([location.location.clone()]),
            None => BTreeSet::new(),
        }
    }

    /// Prefix `table` with the host of the dataset's linked service when
    /// fully-qualified names are enabled and that service is fully static
    fn qualify(&self, dataset: &Dataset, table: &str) -> String {
        if !self.use_fqn {
            return table.to_string();
        }
        find_linked_service(self.linked_services, &dataset.linked_service_name)
            .and_then(LinkedService::host_prefix)
            .map_or_else(|| table.to_string(), |prefix| add_host_prefix(table, &prefix))
    }
}

/// Table written by the output side of a copy run
pub fn target_table(
    output: &Dataset,
    parameter_names: &[String],
    run_parameters: &HashMap<String, String>,
) -> Option<String> {
    match output.info.as_ref()? {
        DatasetInfo::SingleTable(table) => single_table_name(table, parameter_names, run_parameters),
        DatasetInfo::Location(location) => Some(location.location.clone()),
        DatasetInfo::Query(_) => None,
    }
}

fn single_table_name(
    table: &SingleTableDataset,
    parameter_names: &[String],
    run_parameters: &HashMap<String, String>,
) -> Option<String> {
    substitute(table, parameter_names, run_parameters).table_identifier()
}

/// Keep the last two dot segments of `table` and prefix them with `host_prefix`.
///
/// `srv.db` + `cat.dbo.t1` gives `srv.db.dbo.t1`.
pub fn add_host_prefix(table: &str, host_prefix: &str) -> String {
    let segments: Vec<&str> = table.split('.').collect();
    let tail = if segments.len() > 2 {
        segments[segments.len() - 2..].join(".")
    } else {
        table.to_string()
    };
    format!("{host_prefix}.{tail}")
}

#[cfg(test)]
#[path = "lineage_test.rs"]
mod tests;
