use csign_domain::config::{LogRotation, LoggingConfig};
use csign_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_logging_writes_structured_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let config = LoggingConfig {
        name: "integration-file-logging".to_owned(),
        console: false,
        directory: Some(log_dir.clone()),
        rotation: LogRotation::Never,
        json: true,
        ..LoggingConfig::default()
    };
    let logger = Logger::init(&config)?;
    assert!(logger.guard().is_some());

    tracing::info!(activation_id = "a1", "hello from integration test");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let line = contents.lines().next().expect("log file should not be empty");
    assert!(line.starts_with('{'), "json output expected, got: {line}");
    assert!(line.contains("\"activation_id\":\"a1\""));

    Ok(())
}
