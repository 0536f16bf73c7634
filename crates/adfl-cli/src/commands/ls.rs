//! Ls command implementation

use adfl_client::MetadataClient;
use adfl_core::{build_pipelines, resolve_datasets, CopyActivity};
use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, LsArgs};
use crate::commands::common::{export_client, load_config};

/// Execute the ls command
pub async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let client = export_client(&config);

    let datasets = client.list_datasets().await.context("Failed to list datasets")?;
    let pipelines = client.list_pipelines().await.context("Failed to list pipelines")?;
    let datasets = resolve_datasets(&datasets);

    for pipeline in build_pipelines(&pipelines, &datasets) {
        if args.copy_only && pipeline.copy_activities.is_empty() {
            continue;
        }
        println!("{} ({} copy activities)", pipeline.name, pipeline.copy_activities.len());
        for activity in &pipeline.copy_activities {
            println!("  {}", describe(activity));
        }
    }
    Ok(())
}

fn describe(activity: &CopyActivity) -> String {
    let endpoint = |dataset: Option<&adfl_core::Dataset>| {
        dataset.map_or_else(
            || "<unsupported>".to_string(),
            |d| format!("{} [{}]", d.name, d.kind),
        )
    };
    format!(
        "{}: {} -> {}",
        activity.name,
        endpoint(activity.input.as_ref()),
        endpoint(activity.output.as_ref())
    )
}
