//! Dataset semantic model and resolution from provider records

use crate::kind::DatasetKind;
use crate::parameter::Parameter;
use adfl_client::DatasetResource;

/// Source defined by an arbitrary query; tables are only known at run time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDataset {
    pub name: String,
    pub kind: DatasetKind,
}

/// One table, addressed by (possibly templated) schema and table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleTableDataset {
    pub name: String,
    pub kind: DatasetKind,
    pub schema: Option<Parameter>,
    pub table: Option<Parameter>,
}

impl SingleTableDataset {
    /// `schema.table`, or `table` when no schema is declared.
    ///
    /// `None` when there is no table, or when a part is still an
    /// unsubstituted expression.
    pub fn table_identifier(&self) -> Option<String> {
        let table = self.table.as_ref().filter(|t| t.is_static())?;
        match &self.schema {
            None => Some(table.value.clone()),
            Some(schema) if schema.is_static() => Some(format!("{}.{}", schema.value, table.value)),
            Some(_) => None,
        }
    }
}

/// Non-relational addressable location (blob, data lake file)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDataset {
    pub name: String,
    pub kind: DatasetKind,
    pub location: String,
}

/// What a supported dataset points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetInfo {
    Query(QueryDataset),
    SingleTable(SingleTableDataset),
    Location(LocationDataset),
}

/// A resolved dataset definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    pub kind: DatasetKind,
    pub linked_service_name: String,
    /// `None` exactly when `kind` is unsupported
    pub info: Option<DatasetInfo>,
}

/// Build the semantic info for a dataset of the given kind
pub fn resolve_dataset_info(raw: &DatasetResource, kind: DatasetKind) -> Option<DatasetInfo> {
    let name = raw.name.clone();

    if kind.is_relational() {
        let props = &raw.properties.type_properties;
        let schema = props.schema.as_ref().and_then(Parameter::from_json);
        let table = props
            .table
            .as_ref()
            .or(props.table_name.as_ref())
            .and_then(Parameter::from_json);

        if schema.is_none() && table.is_none() {
            return Some(DatasetInfo::Query(QueryDataset { name, kind }));
        }
        return Some(DatasetInfo::SingleTable(SingleTableDataset {
            name,
            kind,
            schema,
            table,
        }));
    }

    match kind {
        DatasetKind::Blob => Some(DatasetInfo::Location(LocationDataset {
            location: name.clone(),
            name,
            kind,
        })),
        _ => None,
    }
}

/// Resolve one provider dataset record
pub fn resolve_dataset(raw: &DatasetResource) -> Dataset {
    let kind = DatasetKind::from_provider_type(&raw.properties.provider_type);
    let info = resolve_dataset_info(raw, kind);
    if info.is_none() {
        log::debug!(
            "Dataset '{}' has unsupported type '{}'",
            raw.name,
            raw.properties.provider_type
        );
    }

    Dataset {
        name: raw.name.clone(),
        kind,
        linked_service_name: raw.linked_service_name().to_string(),
        info,
    }
}

/// Resolve every provider dataset record, preserving order
pub fn resolve_datasets(raws: &[DatasetResource]) -> Vec<Dataset> {
    raws.iter().map(resolve_dataset).collect()
}

/// First dataset with the given name
pub fn find_dataset<'a>(datasets: &'a [Dataset], name: &str) -> Option<&'a Dataset> {
    datasets.iter().find(|d| d.name == name)
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
