use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use wsb_logger::{LevelFilter, Logger};

#[test]
fn file_logging_creates_prefixed_log_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("tester-wmstatusbar")
        .console(false)
        .dir(&log_dir)
        .level(LevelFilter::INFO)
        .init()?;
    assert!(logger.has_file());

    tracing::warn!(feature = "weather", "round failed");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let file_name = log_file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(file_name.starts_with("tester-wmstatusbar"), "unexpected file name {file_name}");

    let content = fs::read_to_string(&log_file)?;
    assert!(content.contains("round failed"), "log file should contain the event");

    Ok(())
}
