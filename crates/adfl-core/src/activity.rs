//! Static copy-activity discovery over pipeline activity trees

use crate::dataset::{find_dataset, Dataset};
use adfl_client::{Activity, CopyActivityDefinition, DatasetReference, PipelineResource};

/// A Copy activity with its endpoints resolved against the dataset catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyActivity {
    pub name: String,
    /// `None` when the referenced dataset is missing or unsupported
    pub input: Option<Dataset>,
    pub output: Option<Dataset>,
    pub input_parameter_names: Vec<String>,
    pub output_parameter_names: Vec<String>,
    pub is_input_supported: bool,
    pub is_output_supported: bool,
}

impl CopyActivity {
    /// Both endpoints resolved to supported datasets
    pub fn is_supported(&self) -> bool {
        self.is_input_supported && self.is_output_supported
    }
}

/// Static pipeline definition reduced to its copy activities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub name: String,
    pub copy_activities: Vec<CopyActivity>,
}

impl Pipeline {
    /// First copy activity with the given name
    pub fn copy_activity(&self, name: &str) -> Option<&CopyActivity> {
        self.copy_activities.iter().find(|a| a.name == name)
    }
}

/// Collect every Copy activity in the tree, depth first.
///
/// IfCondition true-branch activities come before false-branch ones; ForEach
/// bodies keep their order. Other activity types contribute nothing.
pub fn flatten_copy_activities(activities: &[Activity], datasets: &[Dataset]) -> Vec<CopyActivity> {
    let mut found = Vec::new();
    collect_copy_activities(activities, datasets, &mut found);
    found
}

fn collect_copy_activities(activities: &[Activity], datasets: &[Dataset], found: &mut Vec<CopyActivity>) {
    for activity in activities {
        match activity {
            Activity::Copy(copy) => found.push(resolve_copy_activity(copy, datasets)),
            Activity::IfCondition(branch) => {
                let props = &branch.type_properties;
                for inner in [&props.if_true_activities, &props.if_false_activities]
                    .into_iter()
                    .flatten()
                {
                    collect_copy_activities(inner, datasets, found);
                }
            }
            Activity::ForEach(each) => {
                collect_copy_activities(&each.type_properties.activities, datasets, found);
            }
            Activity::Other => {}
        }
    }
}

fn resolve_copy_activity(copy: &CopyActivityDefinition, datasets: &[Dataset]) -> CopyActivity {
    let (input, input_parameter_names) = resolve_endpoint(copy.inputs.first(), datasets);
    let (output, output_parameter_names) = resolve_endpoint(copy.outputs.first(), datasets);

    if input.is_none() || output.is_none() {
        log::debug!(
            "Copy activity '{}' references a missing or unsupported dataset",
            copy.name
        );
    }

    CopyActivity {
        name: copy.name.clone(),
        is_input_supported: input.is_some(),
        is_output_supported: output.is_some(),
        input,
        output,
        input_parameter_names,
        output_parameter_names,
    }
}

fn resolve_endpoint(
    reference: Option<&DatasetReference>,
    datasets: &[Dataset],
) -> (Option<Dataset>, Vec<String>) {
    let Some(reference) = reference else {
        return (None, Vec::new());
    };
    let dataset = find_dataset(datasets, &reference.reference_name)
        .filter(|d| d.kind.is_supported())
        .cloned();
    (dataset, reference.parameter_names())
}

/// Reduce every pipeline definition to its copy activities
pub fn build_pipelines(raw_pipelines: &[PipelineResource], datasets: &[Dataset]) -> Vec<Pipeline> {
    raw_pipelines
        .iter()
        .map(|raw| Pipeline {
            name: raw.name.clone(),
            copy_activities: flatten_copy_activities(&raw.properties.activities, datasets),
        })
        .collect()
}

#[cfg(test)]
#[path = "activity_test.rs"]
mod tests;
