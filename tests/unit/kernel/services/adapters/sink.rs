use super::*;
use crate::kernel::services::ports::SessionConfig;
use crate::kernel::AppState;
use tempfile::tempdir;

fn payload() -> SavePayload {
    SavePayload::from_state(&AppState::new(SessionConfig::default()))
}

#[test]
fn json_file_sink_writes_pretty_payload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("template.json");
    let mut sink = JsonFileSink::new(&path);

    sink.submit(&payload()).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains('\n'));
    let back: SavePayload = serde_json::from_str(&written).unwrap();
    assert_eq!(back, payload());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn json_file_sink_overwrites_previous_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("template.json");
    std::fs::write(&path, "stale").unwrap();

    JsonFileSink::new(&path).submit(&payload()).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with('{'));
}

#[test]
fn json_file_sink_reports_io_errors() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    // 父路径是普通文件
    let mut sink = JsonFileSink::new(blocker.join("template.json"));
    assert!(matches!(sink.submit(&payload()), Err(SinkError::Io(_))));
}

#[test]
fn memory_sink_collects_submissions() {
    let sink = MemorySink::new();
    let mut handle = sink.clone();

    handle.submit(&payload()).unwrap();
    handle.submit(&payload()).unwrap();
    assert_eq!(sink.submitted().len(), 2);
}

#[test]
fn failing_memory_sink_returns_unavailable() {
    let mut sink = MemorySink::failing("offline");
    let err = sink.submit(&payload()).unwrap_err();
    assert_eq!(err.to_string(), "sink unavailable: offline");
    assert!(sink.submitted().is_empty());
}
