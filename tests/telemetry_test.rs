//! Global subscriber installation. Kept in its own test binary because the
//! subscriber can only be installed once per process.

use tracksmartin::observability::telemetry::LOG_FILE_PREFIX;
use tracksmartin::observability::{SubscriberConfig, init_subscriber};

#[test]
fn test_init_subscriber_creates_log_dir_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("nested");
    let config = SubscriberConfig::builder()
        .enable_console(false)
        .log_dir(log_dir.clone())
        .build();

    let guard = init_subscriber(config).unwrap();
    assert!(guard.is_some());
    assert!(log_dir.is_dir());

    let names: Vec<String> = std::fs::read_dir(&log_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(
        names
            .iter()
            .any(|name| name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log")),
        "{names:?}"
    );

    let again = SubscriberConfig::builder().enable_console(false).without_log_file().build();
    assert!(init_subscriber(again).unwrap().is_none());
}
