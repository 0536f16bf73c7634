//! Integration tests for the JSON export client

use adfl_client::{ClientError, JsonExportClient, MetadataClient, TimeWindow};
use chrono::{TimeZone, Utc};
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, file: &str, content: &str) {
    let path = dir.path().join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn export_with_core_files() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "datasets.json",
        r#"[{"name": "Src", "properties": {"type": "AzureSqlTable",
             "linkedServiceName": {"referenceName": "Sql"},
             "typeProperties": {"schema": "dbo", "table": "t1"}}}]"#,
    );
    write(
        &dir,
        "linkedServices.json",
        r#"[{"name": "Sql", "properties": {"type": "AzureSqlDatabase",
             "typeProperties": {"connectionString": "Data Source=tcp:srv.database.windows.net,1433;Initial Catalog=db"}}}]"#,
    );
    write(&dir, "pipelines.json", r#"[{"name": "P1", "properties": {"activities": []}}]"#);
    dir
}

#[tokio::test]
async fn test_lists_core_resources() {
    let dir = export_with_core_files();
    let client = JsonExportClient::new(dir.path());

    let datasets = client.list_datasets().await.unwrap();
    assert_eq!(datasets.len(), 1);
    assert_eq!(datasets[0].name, "Src");

    let services = client.list_linked_services().await.unwrap();
    assert_eq!(services[0].name, "Sql");

    let pipelines = client.list_pipelines().await.unwrap();
    assert_eq!(pipelines[0].name, "P1");
    assert_eq!(client.client_type(), "json-export");
}

#[tokio::test]
async fn test_missing_required_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let client = JsonExportClient::new(dir.path());

    let err = client.list_datasets().await.unwrap_err();
    assert!(matches!(err, ClientError::Unavailable { ref resource, .. } if resource == "datasets"));
}

#[tokio::test]
async fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    write(&dir, "pipelines.json", "{ not json");
    let client = JsonExportClient::new(dir.path());

    let err = client.list_pipelines().await.unwrap_err();
    assert!(matches!(err, ClientError::Parse { .. }));
    assert!(err.to_string().starts_with("[C003]"));
}

#[tokio::test]
async fn test_optional_files_default_to_empty() {
    let dir = export_with_core_files();
    let client = JsonExportClient::new(dir.path());
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    let window = TimeWindow::lookback(1, now).unwrap();

    assert!(client.list_triggers().await.unwrap().is_empty());
    assert!(client.query_pipeline_runs("P1", &window).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pipeline_runs_filtered_by_name_and_window() {
    let dir = export_with_core_files();
    write(
        &dir,
        "pipelineRuns.json",
        r#"[
            {"runId": "in", "pipelineName": "P1", "runStart": "2024-03-10T08:00:00Z",
             "runEnd": "2024-03-10T08:05:00Z", "isLatest": true, "parameters": {}},
            {"runId": "old", "pipelineName": "P1", "runStart": "2024-03-01T08:00:00Z",
             "isLatest": false},
            {"runId": "other", "pipelineName": "P2", "runStart": "2024-03-10T09:00:00Z",
             "isLatest": true}
        ]"#,
    );
    let client = JsonExportClient::new(dir.path());
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    let window = TimeWindow::lookback(1, now).unwrap();

    let runs = client.query_pipeline_runs("P1", &window).await.unwrap();
    let ids: Vec<_> = runs.iter().map(|r| r.run_id.as_str()).collect();
    assert_eq!(ids, vec!["in"]);
}

#[tokio::test]
async fn test_activity_runs_read_per_run_id() {
    let dir = export_with_core_files();
    write(
        &dir,
        "pipelineRuns.json",
        r#"[{"runId": "r-1", "pipelineName": "P1", "runStart": "2024-03-10T08:00:00Z", "isLatest": true}]"#,
    );
    write(
        &dir,
        "activityRuns/r-1.json",
        r#"[{"activityName": "CopyA", "activityType": "Copy",
             "input": {"source": {"sqlReaderQuery": "SELECT * FROM dbo.t1"}}}]"#,
    );
    let client = JsonExportClient::new(dir.path());
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    let window = TimeWindow::lookback(1, now).unwrap();
    let run = client
        .query_pipeline_runs("P1", &window)
        .await
        .unwrap()
        .remove(0);

    let activities = client.query_activity_runs(&run).await.unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(
        activities[0].source_field("sqlReaderQuery"),
        Some("SELECT * FROM dbo.t1")
    );
}
