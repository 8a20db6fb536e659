//! Integration tests for extractor module

#[path = "common/mod.rs"]
mod common;

use common::*;
use tzkml2json::document::Document;
use tzkml2json::errors::AppError;
use tzkml2json::models::Point;
use tzkml2json::progress::ProgressEvent;
use tempfile::TempDir;

#[test]
fn test_extract_sample_document() {
    let document = Document::from(sample_document());
    let records = document
        .extractor()
        .extract_all(&mut |_: ProgressEvent| {})
        .unwrap();

    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "America/New_York",
            "Europe/Rome",
            "America/Anchorage",
            "America/Anchorage"
        ]
    );

    assert!(records[0].excludes.is_empty());
    assert_eq!(records[0].include[0], Point::new(-74.25, 40.49));

    assert_eq!(records[1].include.len(), 5);
    assert_eq!(records[1].excludes.len(), 2);
    assert_eq!(records[1].excludes[0][0], Point::new(12.445, 41.900));
    assert_eq!(records[1].excludes[1][0], Point::new(12.40, 43.89));

    assert!(records[2].excludes.is_empty());
    assert_eq!(records[3].include[0], Point::new(-170.5, 57.1));
}

#[test]
fn test_single_geometries_count_matches_markers() {
    let placemarks: Vec<String> = (0..25)
        .map(|i| placemark(&format!("Etc/Zone{i}"), &[NEW_YORK_RING], false))
        .collect();
    let document = Document::from(kml_document(&placemarks));

    let records = document
        .extractor()
        .extract_all(&mut |_: ProgressEvent| {})
        .unwrap();

    assert_eq!(records.len(), 25);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.name, format!("Etc/Zone{i}"));
        assert!(!record.include.is_empty());
        assert!(record.excludes.is_empty());
    }
}

#[test]
fn test_read_and_extract_reports_checkpoints() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("data/tz_world.kml");
    let content = sample_document();
    create_test_kml_file(&input, &content);

    let mut events = Vec::new();
    let mut sink = |e: ProgressEvent| events.push(e);
    let document = Document::read(&input, &mut sink).unwrap();
    let records = document.extractor().extract_all(&mut sink).unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(
        events,
        vec![
            ProgressEvent::ReadStarted {
                path: input.clone()
            },
            ProgressEvent::ReadCompleted {
                path: input.clone(),
                bytes: content.len()
            },
            ProgressEvent::RegionsLoaded {
                includes: 4,
                excludes: 2
            },
        ]
    );
}

#[test]
fn test_malformed_coordinate_aborts_extraction() {
    let document = Document::from(kml_document(&[
        placemark("America/New_York", &[NEW_YORK_RING], false),
        placemark("Europe/Rome", &["1.0,abc 2.0,3.0"], false),
    ]));

    let result = document.extractor().extract_all(&mut |_: ProgressEvent| {});

    match result {
        Err(AppError::MalformedCoordinate { token, .. }) => assert_eq!(token, "1.0,abc"),
        other => panic!("Expected MalformedCoordinate, got {other:?}"),
    }
}

#[test]
fn test_truncated_file_keeps_complete_records() {
    let mut content = sample_document();
    let cut = content.rfind("</Document>").unwrap();
    content.truncate(cut);
    content.push_str(
        "  <Placemark>\n    <description><![CDATA[<table><tr><td>TZID</td><td><font COLOR=\"#000000\">Etc/Cut</font>",
    );
    let document = Document::from(content);

    let records = document
        .extractor()
        .extract_all(&mut |_: ProgressEvent| {})
        .unwrap();

    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.name != "Etc/Cut"));
}
