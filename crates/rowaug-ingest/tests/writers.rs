//! Tests for line and CSV writers.

use rowaug_ingest::{CsvReader, CsvWriter, LineWriter, ReadMode};

#[test]
fn test_line_writer_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let mut writer = LineWriter::create(&path).unwrap();
    writer.write_line("first").unwrap();
    writer.write_line("second").unwrap();
    assert_eq!(writer.line_number(), 2);
    writer.close().unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "first\nsecond\n");
}

#[test]
fn test_csv_writer_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let mut writer = CsvWriter::create(&path, b'\t').unwrap();
    writer.write_record(["id", "name"]).unwrap();
    writer.write_record(["1", "anna"]).unwrap();
    writer.write_record(["2", "value\twith delimiter"]).unwrap();
    writer.close().unwrap();

    let mut reader = CsvReader::open(&path, b'\t').unwrap();
    assert_eq!(
        reader.header(),
        Some(&["id".to_string(), "name".to_string()][..])
    );
    assert_eq!(
        reader.next_record(ReadMode::ReturnEveryLine).unwrap(),
        Some(vec!["1".to_string(), "anna".to_string()])
    );
    assert_eq!(
        reader.next_record(ReadMode::ReturnEveryLine).unwrap(),
        Some(vec!["2".to_string(), "value\twith delimiter".to_string()])
    );
}
