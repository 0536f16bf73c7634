//! Extract command implementation

use adfl_core::{build_events, extract_lineage, write_edge_list, write_events, Config};
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use crate::cli::{ExtractArgs, GlobalArgs};
use crate::commands::common::{export_client, load_config};

/// Execute the extract command
pub async fn execute(args: &ExtractArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    apply_overrides(&mut config, args);
    config.validate().context("Invalid configuration")?;

    let client = export_client(&config);
    let report = extract_lineage(&client, &config, Utc::now())
        .await
        .context("Lineage extraction failed")?;

    if !report.skipped_pipelines.is_empty() {
        log::warn!(
            "{} pipeline(s) skipped: {}",
            report.skipped_pipelines.len(),
            report.skipped_pipelines.join(", ")
        );
    }

    let events = build_events(&report.lineages, &config.namespace, &config.producer);
    let events_path = Path::new(&config.openlineage_output);
    write_events(events_path, &events)
        .with_context(|| format!("Saving lineage (openlineage) to {}", events_path.display()))?;
    log::info!("Saved lineage (openlineage) to {}", events_path.display());

    let edges = report.edge_list(config.edge_list_scope);
    let edges_path = Path::new(&config.lineage_output);
    write_edge_list(edges_path, &edges)
        .with_context(|| format!("Saving lineage to {}", edges_path.display()))?;
    log::info!("Saved lineage to {}", edges_path.display());

    Ok(())
}

/// Command-line values win over the config file
fn apply_overrides(config: &mut Config, args: &ExtractArgs) {
    if let Some(days) = args.days {
        config.lookback_days = days;
    }
    if args.no_fqn {
        config.use_fqn = false;
    }
    if let Some(namespace) = &args.namespace {
        config.namespace = namespace.clone();
    }
    if let Some(producer) = &args.producer {
        config.producer = producer.clone();
    }
    if let Some(path) = &args.openlineage_output {
        config.openlineage_output = path.clone();
    }
    if let Some(path) = &args.lineage_output {
        config.lineage_output = path.clone();
    }
    if let Some(scope) = args.edge_list_scope {
        config.edge_list_scope = scope.into();
    }
    if let Some(dialect) = &args.sql_dialect {
        config.sql_dialect = Some(dialect.clone());
    }
    if args.only_triggered {
        config.only_triggered = true;
    }
    if args.transitive {
        config.transitive = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScopeArg;
    use adfl_core::EdgeListScope;

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = Config::default();
        apply_overrides(&mut config, &ExtractArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = Config::default();
        let args = ExtractArgs {
            days: Some(5),
            no_fqn: true,
            namespace: Some("analytics".to_string()),
            edge_list_scope: Some(ScopeArg::All),
            sql_dialect: Some("tsql".to_string()),
            only_triggered: true,
            transitive: true,
            ..ExtractArgs::default()
        };
        apply_overrides(&mut config, &args);

        assert_eq!(config.lookback_days, 5);
        assert!(!config.use_fqn);
        assert_eq!(config.namespace, "analytics");
        assert_eq!(config.producer, "azure-lineage");
        assert_eq!(config.edge_list_scope, EdgeListScope::All);
        assert_eq!(config.sql_dialect.as_deref(), Some("tsql"));
        assert!(config.only_triggered);
        assert!(config.transitive);
    }
}
