use httpmock::prelude::*;
use small_learn::core::ExperimentReport;
use small_learn::{CliConfig, ExperimentEngine, HoldoutExperiment, LearnError, LocalStorage};
use tempfile::TempDir;

// Two classes cleanly separated on the first feature.
const REMOTE_CSV: &str = "\
x,y,label
1.0,0.5,low
1.1,0.9,low
1.2,0.4,low
1.3,0.8,low
1.4,0.6,low
1.5,0.2,low
1.6,0.7,low
1.7,0.3,low
5.0,0.5,high
5.1,0.9,high
5.2,0.4,high
5.3,0.8,high
5.4,0.6,high
5.5,0.2,high
5.6,0.7,high
5.7,0.3,high
";

fn remote_config(url: String, output_path: String) -> CliConfig {
    CliConfig {
        dataset: "iris".to_string(),
        dataset_path: None,
        dataset_url: Some(url),
        test_size: 0.25,
        seed: 42,
        max_depth: None,
        min_samples_leaf: 1,
        output_path,
        verbose: false,
        monitor: false,
    }
}

#[tokio::test]
async fn test_end_to_end_with_remote_csv() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/levels.csv");
        then.status(200)
            .header("Content-Type", "text/csv")
            .body(REMOTE_CSV);
    });

    let config = remote_config(server.url("/levels.csv"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let engine = ExperimentEngine::new(HoldoutExperiment::new(storage, config));

    let result = engine.run().await;
    assert!(result.is_ok());
    api_mock.assert();

    let full_path = std::path::Path::new(&output_path).join("experiment_output.zip");
    let zip_data = std::fs::read(&full_path).unwrap();
    let cursor = std::io::Cursor::new(zip_data);
    let mut archive = zip::ZipArchive::new(cursor).unwrap();
    let mut file = archive.by_name("report.json").unwrap();
    let mut content = String::new();
    std::io::Read::read_to_string(&mut file, &mut content).unwrap();
    let report: ExperimentReport = serde_json::from_str(&content).unwrap();

    // The dataset takes its name from the URL's file name.
    assert_eq!(report.dataset, "levels");
    assert_eq!(report.eda.n_samples, 16);
    assert_eq!(report.eda.n_features, 2);

    // Perfectly separable, so even the honest evaluation is perfect.
    assert!((report.outcome.holdout.accuracy - 1.0).abs() < 1e-6);
    assert_eq!(report.outcome.split.n_test, 4);
}

#[tokio::test]
async fn test_remote_server_error_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/broken.csv");
        then.status(500);
    });

    let config = remote_config(server.url("/broken.csv"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let engine = ExperimentEngine::new(HoldoutExperiment::new(storage, config));

    let result = engine.run().await;
    api_mock.assert();

    match result {
        Err(e) => {
            assert!(matches!(e, LearnError::HttpError(_)));
            assert_eq!(
                e.severity(),
                small_learn::utils::error::ErrorSeverity::Medium
            );
        }
        Ok(_) => panic!("expected the run to fail on a 500 response"),
    }

    // No bundle is written on failure.
    let full_path = std::path::Path::new(&output_path).join("experiment_output.zip");
    assert!(!full_path.exists());
}

#[tokio::test]
async fn test_remote_body_that_is_not_csv_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/garbage.csv");
        then.status(200).body("x,label\nnot-a-number,cat\n");
    });

    let config = remote_config(server.url("/garbage.csv"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let engine = ExperimentEngine::new(HoldoutExperiment::new(storage, config));

    let result = engine.run().await;
    assert!(matches!(result, Err(LearnError::DataError { .. })));
}
