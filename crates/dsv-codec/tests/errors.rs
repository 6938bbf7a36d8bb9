//! Failure-path tests: preconditions, malformed data, line diagnostics.

use std::fs;

use tempfile::tempdir;

use dsv_codec::{DsvError, DsvReader, DsvWriter, FormatConfig, read_table};

#[test]
fn reading_missing_path_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let err = DsvReader::open(&path, FormatConfig::default()).unwrap_err();
    assert!(matches!(err, DsvError::NotAFile { .. }));
    assert!(format!("{err}").contains("path is not a file"));
    assert!(!err.is_config_error());
}

#[test]
fn reading_directory_fails() {
    let dir = tempdir().unwrap();

    let err = DsvReader::open(dir.path(), FormatConfig::default()).unwrap_err();
    assert!(matches!(err, DsvError::NotAFile { .. }));
}

#[test]
fn empty_path_is_a_config_error() {
    let err = DsvReader::open("", FormatConfig::default()).unwrap_err();
    assert!(matches!(err, DsvError::EmptyPath));
    assert!(err.is_config_error());

    let err = DsvWriter::create("", FormatConfig::default()).unwrap_err();
    assert!(matches!(err, DsvError::EmptyPath));
}

#[test]
fn writing_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.csv");

    let err = DsvWriter::create(&path, FormatConfig::default()).unwrap_err();
    assert!(matches!(err, DsvError::NotWritable { .. }));
    assert!(format!("{err}").contains("path is not writable"));
}

#[test]
fn header_flag_on_empty_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();

    let config = FormatConfig::default().with_header(true);
    let err = DsvReader::open(&path, config).unwrap_err();
    assert!(matches!(err, DsvError::HeaderNotFound));
    assert_eq!(format!("{err}"), "header not found on line 1");
    assert_eq!(err.line(), Some(1));
}

#[test]
fn header_flag_on_blank_first_line_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blank.csv");
    fs::write(&path, "\na,b\n").unwrap();

    let config = FormatConfig::default().with_header(true);
    let err = DsvReader::open(&path, config).unwrap_err();
    assert!(matches!(err, DsvError::HeaderNotFound));
}

#[test]
fn malformed_header_reports_line_one() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("badheader.csv");
    fs::write(&path, "\"open,mood\nx,y\n").unwrap();

    let config = FormatConfig::default().with_header(true);
    let err = DsvReader::open(&path, config).unwrap_err();
    assert!(matches!(err, DsvError::MalformedRecord { line: 1, .. }));
    assert!(format!("{err}").contains("malformed record on line 1"));
}

#[test]
fn unterminated_enclosure_reports_its_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unterminated.csv");
    fs::write(&path, "a,b\n\"open,c\n").unwrap();

    let mut reader = DsvReader::open(&path, FormatConfig::default()).unwrap();
    assert!(reader.next().unwrap().is_ok());

    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, DsvError::MalformedRecord { line: 2, .. }));
    assert!(format!("{err}").contains("unterminated enclosure"));

    // The error fuses the sequence and releases the handle.
    assert!(reader.next().is_none());
}

#[test]
fn field_count_mismatch_reports_its_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ragged.csv");
    fs::write(&path, "name,mood\nx,y\na,b,c\n").unwrap();

    let config = FormatConfig::default().with_header(true);
    let mut reader = DsvReader::open(&path, config).unwrap();
    assert!(reader.next().unwrap().is_ok());

    let err = reader.next().unwrap().unwrap_err();
    match err {
        DsvError::FieldCountMismatch {
            line,
            expected,
            actual,
        } => {
            assert_eq!(line, 3);
            assert_eq!(expected, 2);
            assert_eq!(actual, 3);
        }
        other => panic!("expected FieldCountMismatch, got {other:?}"),
    }
    assert!(reader.next().is_none());
}

#[test]
fn empty_line_advances_the_counter_for_diagnostics() {
    // The blank line is skipped but still counts as a physical line, so
    // the malformed record after it reports line 3, not line 2.
    let dir = tempdir().unwrap();
    let path = dir.path().join("counted.csv");
    fs::write(&path, "a,b\n\n\"open\n").unwrap();

    let mut reader = DsvReader::open(&path, FormatConfig::default()).unwrap();
    assert!(reader.next().unwrap().is_ok());

    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, DsvError::MalformedRecord { line: 3, .. }));
}

#[test]
fn partial_output_stands_after_a_failure() {
    // No rollback: rows written before an error remain on disk.
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.csv");
    let config = FormatConfig::default();

    let mut writer = DsvWriter::create(&path, config).unwrap();
    writer.write_row(&["kept"]).unwrap();
    writer.finish().unwrap();

    let records = read_table(&path, &config).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].fields().unwrap(), ["kept"]);
}

#[test]
fn text_after_closing_enclosure_is_malformed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stray.csv");
    fs::write(&path, "\"a\"x,b\n").unwrap();

    let mut reader = DsvReader::open(&path, FormatConfig::default()).unwrap();
    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, DsvError::MalformedRecord { line: 1, .. }));
}
