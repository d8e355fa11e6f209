//! End-to-end rehydration tests over real files and streams.

use std::fs;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rehydrate_elements::{
    elements_to_json, CheckBoxElement, Element, ElementKind, ElementMetadata, ImageElement,
    TableElement, TextElement,
};
use rehydrate_partition::{
    format_system_time, partition_json, DocumentStream, JsonInput, PartitionJsonOptions,
    RehydrateError,
};
use tempfile::TempDir;

const DECODED_TS: &str = "2001-01-01T00:00:00";
const EXPLICIT_TS: &str = "2030-06-15T12:00:00";

fn sample_json() -> String {
    format!(
        r#"[
  {{"type": "Title", "element_id": "e1", "text": "Annual Review",
    "metadata": {{"last_modified": "{ts}", "page_number": 1}}}},
  {{"type": "NarrativeText", "element_id": "e2", "text": "Revenue grew.",
    "metadata": {{"last_modified": "{ts}", "page_number": 1}}}},
  {{"type": "Table", "element_id": "e3", "text": "Q1 10 Q2 12",
    "metadata": {{"last_modified": "{ts}", "text_as_html": "<table></table>"}}}}
]"#,
        ts = DECODED_TS
    )
}

fn write_sample(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("elements.json");
    fs::write(&path, sample_json()).unwrap();
    path
}

fn file_timestamp(path: &Path) -> String {
    let modified = fs::metadata(path).unwrap().modified().unwrap();
    format_system_time(modified).unwrap()
}

fn last_modified(elements: &[Element]) -> Vec<Option<&str>> {
    elements
        .iter()
        .map(|e| e.metadata().last_modified.as_deref())
        .collect()
}

// ──────────────────────────────────────────────
// Input source exclusivity
// ──────────────────────────────────────────────

#[test]
fn no_source_is_invalid_arguments() {
    let result = partition_json(JsonInput::default(), &Default::default());
    assert!(matches!(result, Err(RehydrateError::InvalidArguments(_))));
}

#[test]
fn every_pair_of_sources_is_invalid_arguments() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir);
    let text = sample_json();

    let mut cursor = Cursor::new(text.clone().into_bytes());
    let path_and_stream = JsonInput {
        path: Some(path.as_path()),
        stream: Some(&mut cursor),
        text: None,
    };
    assert!(matches!(
        partition_json(path_and_stream, &Default::default()),
        Err(RehydrateError::InvalidArguments(_))
    ));

    let path_and_text = JsonInput {
        path: Some(path.as_path()),
        stream: None,
        text: Some(text.as_str()),
    };
    assert!(matches!(
        partition_json(path_and_text, &Default::default()),
        Err(RehydrateError::InvalidArguments(_))
    ));

    let mut cursor = Cursor::new(text.clone().into_bytes());
    let stream_and_text = JsonInput {
        path: None,
        stream: Some(&mut cursor),
        text: Some(text.as_str()),
    };
    assert!(matches!(
        partition_json(stream_and_text, &Default::default()),
        Err(RehydrateError::InvalidArguments(_))
    ));

    let mut cursor = Cursor::new(text.clone().into_bytes());
    let all_three = JsonInput {
        path: Some(path.as_path()),
        stream: Some(&mut cursor),
        text: Some(text.as_str()),
    };
    assert!(matches!(
        partition_json(all_three, &Default::default()),
        Err(RehydrateError::InvalidArguments(_))
    ));
}

#[test]
fn blank_text_with_another_source_is_still_invalid() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir);
    let input = JsonInput {
        path: Some(path.as_path()),
        stream: None,
        text: Some("   "),
    };
    assert!(matches!(
        partition_json(input, &Default::default()),
        Err(RehydrateError::InvalidArguments(_))
    ));
}

// ──────────────────────────────────────────────
// Gate and parse errors
// ──────────────────────────────────────────────

#[test]
fn non_element_json_file_is_schema_mismatch() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"name": "not elements", "items": [1, 2]}"#).unwrap();
    assert!(matches!(
        partition_json(JsonInput::path(&path), &Default::default()),
        Err(RehydrateError::SchemaMismatch)
    ));
}

#[test]
fn truncated_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cut.json");
    let text = sample_json();
    fs::write(&path, &text[..text.len() / 2]).unwrap();
    assert!(matches!(
        partition_json(JsonInput::path(&path), &Default::default()),
        Err(RehydrateError::Parse(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(
        partition_json(JsonInput::path(&path), &Default::default()),
        Err(RehydrateError::Io { .. })
    ));
}

#[test]
fn non_utf8_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.json");
    fs::write(&path, [b'[', 0xff, b']']).unwrap();
    match partition_json(JsonInput::path(&path), &Default::default()) {
        Err(RehydrateError::Io { source, .. }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData)
        }
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn non_utf8_stream_is_encoding_error() {
    let mut cursor = Cursor::new(vec![b'[', b'{', 0xc3, 0x28, b'}', b']']);
    assert!(matches!(
        partition_json(JsonInput::stream(&mut cursor), &Default::default()),
        Err(RehydrateError::Encoding { .. })
    ));
}

// ──────────────────────────────────────────────
// Timestamp precedence
// ──────────────────────────────────────────────

#[test]
fn explicit_timestamp_beats_file_and_decoded() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir);
    let options = PartitionJsonOptions {
        metadata_last_modified: Some(EXPLICIT_TS.to_string()),
        ..Default::default()
    };
    let elements = partition_json(JsonInput::path(&path), &options).unwrap();
    assert_eq!(last_modified(&elements), vec![Some(EXPLICIT_TS); 3]);
}

#[test]
fn file_timestamp_beats_decoded() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir);
    let file_ts = file_timestamp(&path);
    assert_ne!(file_ts, DECODED_TS);

    let elements = partition_json(JsonInput::path(&path), &Default::default()).unwrap();
    assert_eq!(last_modified(&elements), vec![Some(file_ts.as_str()); 3]);
}

#[test]
fn decoded_timestamp_survives_without_overrides() {
    let text = sample_json();
    let elements = partition_json(JsonInput::text(&text), &Default::default()).unwrap();
    assert_eq!(last_modified(&elements), vec![Some(DECODED_TS); 3]);
}

#[test]
fn metadata_excluded_ignores_every_timestamp() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir);
    let options = PartitionJsonOptions {
        include_metadata: false,
        metadata_last_modified: Some(EXPLICIT_TS.to_string()),
        ..Default::default()
    };
    let elements = partition_json(JsonInput::path(&path), &options).unwrap();
    assert_eq!(last_modified(&elements), vec![Some(DECODED_TS); 3]);
}

#[test]
fn file_stream_timestamp_requires_opt_in() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir);
    let file_ts = file_timestamp(&path);
    let mut file = fs::File::open(&path).unwrap();

    let elements = partition_json(JsonInput::stream(&mut file), &Default::default()).unwrap();
    assert_eq!(last_modified(&elements), vec![Some(DECODED_TS); 3]);

    let options = PartitionJsonOptions {
        infer_timestamp_from_stream: true,
        ..Default::default()
    };
    let elements = partition_json(JsonInput::stream(&mut file), &options).unwrap();
    assert_eq!(last_modified(&elements), vec![Some(file_ts.as_str()); 3]);
}

/// In-memory stream that reports a fixed modification time.
struct StampedCursor {
    inner: Cursor<Vec<u8>>,
    modified: SystemTime,
}

impl Read for StampedCursor {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for StampedCursor {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl DocumentStream for StampedCursor {
    fn last_modified(&self) -> Option<SystemTime> {
        Some(self.modified)
    }
}

#[test]
fn custom_stream_timestamp_is_applied() {
    let mut stream = StampedCursor {
        inner: Cursor::new(sample_json().into_bytes()),
        modified: UNIX_EPOCH + Duration::from_secs(1_700_000_000),
    };
    let options = PartitionJsonOptions {
        infer_timestamp_from_stream: true,
        ..Default::default()
    };
    let elements = partition_json(JsonInput::stream(&mut stream), &options).unwrap();
    assert_eq!(last_modified(&elements), vec![Some("2023-11-14T22:13:20"); 3]);
}

#[test]
fn unrepresentable_stream_timestamp_is_no_candidate() {
    let mut stream = StampedCursor {
        inner: Cursor::new(sample_json().into_bytes()),
        modified: UNIX_EPOCH + Duration::from_secs(400_000_000_000),
    };
    let options = PartitionJsonOptions {
        infer_timestamp_from_stream: true,
        ..Default::default()
    };
    let elements = partition_json(JsonInput::stream(&mut stream), &options).unwrap();
    assert_eq!(last_modified(&elements), vec![Some(DECODED_TS); 3]);
}

// ──────────────────────────────────────────────
// Streams
// ──────────────────────────────────────────────

#[test]
fn stream_is_left_where_it_was() {
    let text = sample_json();
    let mut cursor = Cursor::new(text.clone().into_bytes());

    let first = partition_json(JsonInput::stream(&mut cursor), &Default::default()).unwrap();
    assert_eq!(cursor.position(), 0);

    let mut again = String::new();
    cursor.read_to_string(&mut again).unwrap();
    assert_eq!(again, text);

    cursor.seek(SeekFrom::Start(0)).unwrap();
    let second = partition_json(JsonInput::stream(&mut cursor), &Default::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn file_stream_can_be_reused() {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(sample_json().as_bytes()).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let first = partition_json(JsonInput::stream(&mut file), &Default::default()).unwrap();
    let second = partition_json(JsonInput::stream(&mut file), &Default::default()).unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

// ──────────────────────────────────────────────
// Round trip
// ──────────────────────────────────────────────

#[test]
fn serialized_elements_rehydrate_to_equivalent_sequence() {
    let original = vec![
        Element::Text(TextElement {
            kind: ElementKind::Title,
            element_id: "a".to_string(),
            text: "Chapter 1".to_string(),
            metadata: ElementMetadata {
                page_number: Some(1),
                languages: Some(vec!["eng".to_string()]),
                ..Default::default()
            },
        }),
        Element::Text(TextElement {
            kind: ElementKind::ListItem,
            element_id: "b".to_string(),
            text: "First point".to_string(),
            metadata: ElementMetadata::default(),
        }),
        Element::Table(TableElement {
            kind: ElementKind::Table,
            element_id: "c".to_string(),
            text: "x 1".to_string(),
            metadata: ElementMetadata {
                text_as_html: Some("<table><tr><td>x</td><td>1</td></tr></table>".to_string()),
                ..Default::default()
            },
        }),
        Element::Image(ImageElement {
            element_id: "d".to_string(),
            text: "diagram".to_string(),
            metadata: ElementMetadata::default(),
        }),
        Element::CheckBox(CheckBoxElement {
            element_id: "e".to_string(),
            checked: false,
            metadata: ElementMetadata::default(),
        }),
    ];

    let json = elements_to_json(&original);
    let options = PartitionJsonOptions {
        include_metadata: false,
        ..Default::default()
    };
    let rehydrated = partition_json(JsonInput::text(&json), &options).unwrap();

    assert_eq!(rehydrated.len(), original.len());
    for (a, b) in original.iter().zip(&rehydrated) {
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.text(), b.text());
        assert_eq!(a.id(), b.id());
    }
    assert_eq!(rehydrated, original);
}
