use data_sweeper::export::csv::write_csv_bytes;
use data_sweeper::export::{export_table, ExportFormat, ExportRequest, CSV_MIME};
use data_sweeper::ingestion::csv::parse_csv_bytes;
use data_sweeper::types::{Column, Table};

#[test]
fn csv_round_trip_keeps_names_and_values() {
    let input = b"id,name,score\n1,Ada,98.5\n2,\"Lovelace, Ada\",\n";
    let t = parse_csv_bytes(input).unwrap();

    let artifact = export_table(&t, &ExportRequest::new(ExportFormat::Csv), "people.csv").unwrap();
    assert_eq!(artifact.file_name, "people.csv");
    assert_eq!(artifact.mime_type, CSV_MIME);
    assert_eq!(parse_csv_bytes(&artifact.bytes).unwrap(), t);
}

#[test]
fn csv_output_has_header_and_no_index() {
    let t = Table::new(vec![
        Column::numeric("x", vec![Some(1.5), Some(-2.0)]),
        Column::text("y", vec![Some("a"), None]),
    ])
    .unwrap();
    assert_eq!(write_csv_bytes(&t).unwrap(), b"x,y\n1.5,a\n-2,\n");
}

#[test]
fn export_size_is_reported() {
    let t = parse_csv_bytes(b"a\n1\n").unwrap();
    let artifact = export_table(&t, &ExportRequest::new(ExportFormat::Csv), "a.CSV").unwrap();
    assert_eq!(artifact.size_bytes(), artifact.bytes.len());
    assert_eq!(artifact.file_name, "a.csv");
}

#[cfg(feature = "excel")]
#[test]
fn xlsx_export_rejects_infinite_numbers() {
    let t = Table::new(vec![Column::numeric("x", vec![Some(f64::INFINITY)])]).unwrap();
    let err = export_table(&t, &ExportRequest::new(ExportFormat::Xlsx), "x.csv").unwrap_err();
    assert_eq!(err.category(), data_sweeper::ErrorCategory::Export);
}

#[cfg(not(feature = "excel"))]
#[test]
fn xlsx_export_needs_the_excel_feature() {
    let t = Table::new(vec![Column::numeric("x", vec![Some(1.0)])]).unwrap();
    let err = export_table(&t, &ExportRequest::new(ExportFormat::Xlsx), "x.csv").unwrap_err();
    assert_eq!(err.category(), data_sweeper::ErrorCategory::Export);
}
