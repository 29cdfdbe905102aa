use analyzer_dispatch::host::SnapshotFormat;
use analyzer_dispatch::{
    AnalyzerContext, AnalyzerFactory, AnalyzerRegistry, BitWidth, DetectionPathway, HostSnapshot,
    MemorySink,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn write_snapshot(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_json_snapshot_from_file() {
    let file = write_snapshot(
        ".json",
        r#"{
            "legacy": { "is_64bit": true, "is_32bit": true, "proc_name": "metapc" },
            "modern": { "is_32bit_or_higher": true, "is_32bit_exactly": true, "processor_name": "ARM" }
        }"#,
    );

    let snapshot = HostSnapshot::from_path(file.path()).unwrap();
    let detected = analyzer_dispatch::detect_with_fallback(&snapshot).unwrap();

    assert_eq!(detected.pathway, DetectionPathway::Legacy);
    assert_eq!(detected.architecture.as_str(), "metapc");
    assert_eq!(detected.bit_width, BitWidth::Bits64);
}

#[test]
fn test_load_yaml_snapshot_and_create() {
    let file = write_snapshot(
        ".yml",
        "modern:\n  is_32bit_or_higher: true\n  is_32bit_exactly: true\n  processor_name: ARM\n",
    );
    let snapshot = HostSnapshot::from_path(file.path()).unwrap();

    let mut registry = AnalyzerRegistry::new();
    registry.register_fn("ARM", |_, bits, _| bits);

    let factory = AnalyzerFactory::new(&registry);
    let sink = Arc::new(MemorySink::new());
    let ctx = AnalyzerContext::new(sink.clone(), true);

    assert_eq!(
        factory.create_analyzer(&snapshot, &ctx),
        Some(BitWidth::Bits32)
    );
    assert_eq!(sink.infos(), vec!["Processor: ARM, 32bit"]);
}

#[test]
fn test_missing_snapshot_file_has_context() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("host.json");

    let err = HostSnapshot::from_path(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to read host snapshot"));
}

#[test]
fn test_malformed_snapshot_file_has_context() {
    let file = write_snapshot(".json", "{\"legacy\": ");

    let err = HostSnapshot::from_path(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse host snapshot"));
}

#[test]
fn test_snapshot_round_trips_through_yaml() {
    let snapshot = HostSnapshot::parse(
        r#"{"legacy": {"is_32bit": true, "proc_name": "mipsl"}}"#,
        SnapshotFormat::Json,
    )
    .unwrap();

    let yaml = serde_yaml::to_string(&snapshot).unwrap();
    let reparsed = HostSnapshot::parse(&yaml, SnapshotFormat::Yaml).unwrap();
    assert_eq!(snapshot, reparsed);
}
