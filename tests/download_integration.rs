use std::io::Write;
use std::path::Path;

use httpmock::prelude::*;
use tempfile::TempDir;

use geolight::{AnalysisEngine, CityPipeline, CliConfig, LocalStorage};

fn geonames_row(id: u64, name: &str, lat: f64, lon: f64, country: &str, pop: &str) -> String {
    format!(
        "{id}\t{name}\t{name}\t\t{lat}\t{lon}\tP\tPPL\t{country}\t\t\t\t\t\t{pop}\t\t42\tEurope/Oslo\t2024-01-01",
    )
}

fn zipped_dataset() -> Vec<u8> {
    let rows = [
        geonames_row(3143244, "Oslo", 59.91273, 10.74609, "NO", "580000"),
        geonames_row(1850144, "Tokyo", 35.6895, 139.69171, "JP", "8336599"),
    ]
    .join("\n");

    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file::<_, ()>("cities1000.txt", zip::write::FileOptions::default())
        .unwrap();
    zip.write_all(rows.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

#[tokio::test]
async fn test_missing_dataset_is_downloaded_and_unpacked() {
    let temp_dir = TempDir::new().unwrap();
    let dataset_path = temp_dir.path().join("downloaded").join("cities1000.txt");
    let output_path = temp_dir.path().join("charts").display().to_string();

    let server = MockServer::start();
    let archive_mock = server.mock(|when, then| {
        when.method(GET).path("/export/dump/cities1000.zip");
        then.status(200)
            .header("Content-Type", "application/zip")
            .body(zipped_dataset());
    });

    let config = CliConfig {
        dataset: dataset_path.display().to_string(),
        dataset_url: server.url("/export/dump/cities1000.zip"),
        no_download: false,
        output_path: output_path.clone(),
        top_cities: 10,
        min_population: 1,
        chart_config: None,
        verbose: false,
    };

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = CityPipeline::new(storage, config);
    let engine = AnalysisEngine::new(pipeline);

    engine.run().await.unwrap();
    archive_mock.assert();

    // The unpacked dataset landed at the configured path.
    let cached = std::fs::read_to_string(&dataset_path).unwrap();
    assert!(cached.contains("Oslo"));
    assert!(cached.contains("Tokyo"));

    let summary = std::fs::read(Path::new(&output_path).join("summary.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&summary).unwrap();
    assert_eq!(parsed["total_cities"], 2);
}

#[tokio::test]
async fn test_server_error_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("charts").display().to_string();

    let server = MockServer::start();
    let archive_mock = server.mock(|when, then| {
        when.method(GET).path("/export/dump/cities1000.zip");
        then.status(500);
    });

    let config = CliConfig {
        dataset: temp_dir.path().join("cities1000.txt").display().to_string(),
        dataset_url: server.url("/export/dump/cities1000.zip"),
        no_download: false,
        output_path: output_path.clone(),
        top_cities: 10,
        min_population: 1,
        chart_config: None,
        verbose: false,
    };

    let storage = LocalStorage::new(output_path);
    let pipeline = CityPipeline::new(storage, config);
    let engine = AnalysisEngine::new(pipeline);

    assert!(engine.run().await.is_err());
    archive_mock.assert();
}
