use data_sweeper::config::SweepOptions;
use data_sweeper::export::{ExportFormat, CSV_MIME};
use data_sweeper::ingestion::{FileKind, UploadedFile};
use data_sweeper::processing::CleaningRequest;
use data_sweeper::session::{
    EventOutcome, FileContent, RenderCommand, ScopedEvent, Sweeper, Transcript, UserEvent,
};
use data_sweeper::types::Value;

fn sweeper_with(files: Vec<UploadedFile>) -> (Sweeper, Transcript) {
    let mut sweeper = Sweeper::new(SweepOptions::default());
    let mut out = Transcript::new();
    sweeper.upload(files, &mut out);
    (sweeper, out)
}

fn send(sweeper: &mut Sweeper, out: &mut Transcript, file: &str, event: UserEvent) -> EventOutcome {
    sweeper.handle(ScopedEvent::new(file, event), out)
}

fn key_value<'a>(out: &'a Transcript, file: &'a str, key: &str) -> Vec<&'a str> {
    out.commands_for(file)
        .filter_map(|c| match c {
            RenderCommand::KeyValue { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn csv_upload_is_previewed_with_file_details() {
    let (sweeper, out) = sweeper_with(vec![UploadedFile::new("report.csv", "a,b\n1,2\n3,4\n")]);

    assert_eq!(sweeper.session("report.csv").unwrap().kind(), FileKind::TabularCsv);
    assert_eq!(key_value(&out, "report.csv", "File Name"), vec!["report.csv"]);
    assert_eq!(key_value(&out, "report.csv", "File Size"), vec!["0.01 KB"]);
    assert_eq!(key_value(&out, "report.csv", "File Type"), vec![".csv"]);
    assert_eq!(key_value(&out, "report.csv", "Selected Columns"), vec!["a, b"]);
    assert_eq!(key_value(&out, "report.csv", "Convert To"), vec!["CSV"]);

    let preview = out
        .commands_for("report.csv")
        .find_map(|c| match c {
            RenderCommand::TablePreview { columns, rows, total_rows, version } => {
                Some((columns.clone(), rows.clone(), *total_rows, *version))
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(preview.0, vec!["a", "b"]);
    assert_eq!(preview.1[1], vec![Value::Number(3.0), Value::Number(4.0)]);
    assert_eq!(preview.2, 2);
    assert_eq!(preview.3, 0);
}

#[test]
fn preview_is_limited_to_preview_rows() {
    let body: String = (0..12).map(|i| format!("{i}\n")).collect();
    let (_, out) = sweeper_with(vec![UploadedFile::new("n.csv", format!("n\n{body}"))]);

    let (shown, total) = out
        .commands_for("n.csv")
        .find_map(|c| match c {
            RenderCommand::TablePreview { rows, total_rows, .. } => Some((rows.len(), *total_rows)),
            _ => None,
        })
        .unwrap();
    assert_eq!(shown, 5);
    assert_eq!(total, 12);
}

#[test]
fn csv_converts_to_xlsx_download() {
    let (mut sweeper, mut out) = sweeper_with(vec![UploadedFile::new("report.csv", "a,b\n1,2\n")]);

    let choose = UserEvent::ChooseExportFormat(ExportFormat::Xlsx);
    let _ = send(&mut sweeper, &mut out, "report.csv", choose);
    let outcome = send(&mut sweeper, &mut out, "report.csv", UserEvent::Convert);

    if cfg!(feature = "excel") {
        assert_eq!(outcome, EventOutcome::Applied);
        let offer = &out.downloads[0];
        assert_eq!(offer.file, "report.csv");
        assert_eq!(offer.label, "Download report.csv as Excel");
        assert_eq!(offer.artifact.file_name, "report.xlsx");
        assert_eq!(
            offer.artifact.mime_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    } else {
        assert_eq!(outcome, EventOutcome::Rejected);
        assert!(out.downloads.is_empty());
        assert!(out.errors()[0].starts_with("Conversion failed"));
    }
}

#[test]
fn unsupported_upload_warns_and_is_not_parsed() {
    let (mut sweeper, mut out) = sweeper_with(vec![UploadedFile::new("notes.pdf", "%PDF-1.7")]);

    assert_eq!(
        out.warnings(),
        vec!["Uploaded .pdf file is accepted, but not directly previewable."]
    );
    assert_eq!(
        sweeper.session("notes.pdf").unwrap().content(),
        &FileContent::Unsupported
    );

    let outcome = send(&mut sweeper, &mut out, "notes.pdf", UserEvent::Convert);
    assert_eq!(outcome, EventOutcome::Rejected);
    assert!(out.downloads.is_empty());
}

#[test]
fn fill_missing_updates_the_working_table() {
    let (mut sweeper, mut out) =
        sweeper_with(vec![UploadedFile::new("report.csv", "a,b\n1,\n2,4\n")]);

    let enabled = send(&mut sweeper, &mut out, "report.csv", UserEvent::SetCleaningEnabled(true));
    assert_eq!(enabled, EventOutcome::Applied);
    let outcome = send(
        &mut sweeper,
        &mut out,
        "report.csv",
        UserEvent::Clean(CleaningRequest::FillMissingNumeric),
    );
    assert_eq!(outcome, EventOutcome::Applied);
    assert!(out.successes().contains(&"Missing values have been filled!"));

    let state = sweeper.session("report.csv").unwrap().tabular().unwrap();
    assert_eq!(state.working.version(), 1);
    assert_eq!(
        state.working.table().row(0).unwrap(),
        vec![Value::Number(1.0), Value::Number(4.0)]
    );
}

#[test]
fn dedup_then_convert_exports_cleaned_rows() {
    let (mut sweeper, mut out) =
        sweeper_with(vec![UploadedFile::new("dup.csv", "n,s\n1,x\n1,x\n2,y\n")]);

    for event in [
        UserEvent::SetCleaningEnabled(true),
        UserEvent::Clean(CleaningRequest::RemoveDuplicates),
        UserEvent::Convert,
    ] {
        assert_eq!(send(&mut sweeper, &mut out, "dup.csv", event), EventOutcome::Applied);
    }

    assert!(out.successes().contains(&"Duplicates removed!"));
    let offer = &out.downloads[0];
    assert_eq!(offer.artifact.file_name, "dup.csv");
    assert_eq!(offer.artifact.mime_type, CSV_MIME);
    assert_eq!(offer.artifact.bytes, b"n,s\n1,x\n2,y\n");
}

#[test]
fn cleaning_requires_the_toggle() {
    let (mut sweeper, mut out) = sweeper_with(vec![UploadedFile::new("dup.csv", "n\n1\n1\n")]);

    let outcome = send(
        &mut sweeper,
        &mut out,
        "dup.csv",
        UserEvent::Clean(CleaningRequest::RemoveDuplicates),
    );
    assert_eq!(outcome, EventOutcome::Rejected);
    let state = sweeper.session("dup.csv").unwrap().tabular().unwrap();
    assert_eq!(state.working.version(), 0);
    assert_eq!(state.working.table().row_count(), 2);
}

#[test]
fn rejected_selection_keeps_the_previous_one() {
    let (mut sweeper, mut out) = sweeper_with(vec![UploadedFile::new("t.csv", "a,b,c\n1,2,3\n")]);

    let select = UserEvent::SelectColumns(vec!["c".into(), "a".into()]);
    let ok = send(&mut sweeper, &mut out, "t.csv", select);
    assert_eq!(ok, EventOutcome::Applied);

    let bad = send(&mut sweeper, &mut out, "t.csv", UserEvent::SelectColumns(vec!["zzz".into()]));
    assert_eq!(bad, EventOutcome::Rejected);
    assert!(out
        .warnings()
        .iter()
        .any(|w| w.starts_with("Selection not applied") && w.contains("zzz")));

    let state = sweeper.session("t.csv").unwrap().tabular().unwrap();
    assert_eq!(state.selection.names(), ["c", "a"]);

    let _ = send(&mut sweeper, &mut out, "t.csv", UserEvent::Convert);
    assert_eq!(out.downloads[0].artifact.bytes, b"c,a\n3,1\n");
}

#[test]
fn chart_without_numeric_columns_warns() {
    let (mut sweeper, mut out) = sweeper_with(vec![UploadedFile::new("names.csv", "name\nAda\n")]);

    let _ = send(&mut sweeper, &mut out, "names.csv", UserEvent::SetVisualization(true));
    assert!(out
        .warnings()
        .contains(&"No numeric columns found in names.csv for visualization."));
    assert!(!out
        .commands_for("names.csv")
        .any(|c| matches!(c, RenderCommand::BarChart { .. })));
}

#[test]
fn chart_shows_first_two_numeric_columns_of_the_selection() {
    let (mut sweeper, mut out) =
        sweeper_with(vec![UploadedFile::new("m.csv", "name,x,y,z\nAda,1,2,3\nGrace,4,5,6\n")]);

    let select = UserEvent::SelectColumns(vec!["z".into(), "name".into(), "y".into()]);
    let _ = send(&mut sweeper, &mut out, "m.csv", select);
    out.clear();
    let _ = send(&mut sweeper, &mut out, "m.csv", UserEvent::SetVisualization(true));

    let series = out
        .commands_for("m.csv")
        .find_map(|c| match c {
            RenderCommand::BarChart { series } => Some(series.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        series.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["z", "y"]
    );
    assert_eq!(series[0].values, vec![Some(3.0), Some(6.0)]);
}

#[test]
fn text_upload_shows_bounded_excerpt() {
    let long = "x".repeat(1500);
    let (_, out) = sweeper_with(vec![
        UploadedFile::new("short.txt", "hello"),
        UploadedFile::new("long.json", long.clone()),
    ]);

    let code = |file: &str| {
        out.commands_for(file)
            .find_map(|c| match c {
                RenderCommand::Code { content, truncated } => Some((content.clone(), *truncated)),
                _ => None,
            })
            .unwrap()
    };
    assert_eq!(code("short.txt"), ("hello".to_string(), false));
    let (content, truncated) = code("long.json");
    assert_eq!(content.len(), 1000);
    assert!(truncated);
}

#[test]
fn invalid_utf8_text_warns_without_content() {
    let (_, out) = sweeper_with(vec![UploadedFile::new("bad.txt", b"\xff\xfe".to_vec())]);

    assert!(out
        .warnings()
        .iter()
        .any(|w| w.starts_with("bad.txt is not valid UTF-8 text")));
    assert!(!out
        .commands_for("bad.txt")
        .any(|c| matches!(c, RenderCommand::Code { .. })));
    assert_eq!(key_value(&out, "bad.txt", "File Type"), vec![".txt"]);
}

#[test]
fn image_upload_is_shown_with_caption() {
    let (_, out) = sweeper_with(vec![UploadedFile::new("Cat.PNG", vec![0x89, b'P', b'N', b'G'])]);
    let caption = out
        .commands_for("Cat.PNG")
        .find_map(|c| match c {
            RenderCommand::Image {
                caption,
                size_bytes,
                ..
            } => Some((caption.clone(), *size_bytes)),
            _ => None,
        })
        .unwrap();
    assert_eq!(caption, ("Uploaded Image: Cat.PNG".to_string(), 4));
}

#[test]
fn parse_failure_is_local_to_its_file() {
    let (mut sweeper, mut out) = sweeper_with(vec![
        UploadedFile::new("broken.csv", ""),
        UploadedFile::new("fine.csv", "a\n1\n"),
    ]);

    assert!(matches!(
        sweeper.session("broken.csv").unwrap().content(),
        FileContent::ParseFailed(_)
    ));
    assert!(out.errors()[0].starts_with("Could not read broken.csv"));
    assert!(sweeper.session("fine.csv").unwrap().tabular().is_some());

    let fine = send(&mut sweeper, &mut out, "fine.csv", UserEvent::Convert);
    let broken = send(&mut sweeper, &mut out, "broken.csv", UserEvent::Convert);
    assert_eq!(fine, EventOutcome::Applied);
    assert_eq!(broken, EventOutcome::Rejected);
    assert_eq!(out.downloads.len(), 1);
}

#[test]
fn events_are_scoped_to_their_file() {
    let (mut sweeper, mut out) = sweeper_with(vec![
        UploadedFile::new("one.csv", "a\n1\n1\n"),
        UploadedFile::new("two.csv", "a\n1\n1\n"),
    ]);

    let _ = send(&mut sweeper, &mut out, "one.csv", UserEvent::SetCleaningEnabled(true));
    let dedup = UserEvent::Clean(CleaningRequest::RemoveDuplicates);
    let _ = send(&mut sweeper, &mut out, "one.csv", dedup);

    let rows = |name: &str| {
        sweeper
            .session(name)
            .unwrap()
            .tabular()
            .unwrap()
            .working
            .table()
            .row_count()
    };
    assert_eq!(rows("one.csv"), 1);
    assert_eq!(rows("two.csv"), 2);

    let missing = send(&mut sweeper, &mut out, "three.csv", UserEvent::Convert);
    assert_eq!(missing, EventOutcome::Rejected);
    assert!(out.warnings().contains(&"No uploaded file named three.csv."));
}

#[test]
fn duplicate_upload_names_are_skipped() {
    let (sweeper, out) = sweeper_with(vec![
        UploadedFile::new("a.csv", "x\n1\n"),
        UploadedFile::new("a.csv", "x\n2\n"),
    ]);
    assert_eq!(sweeper.sessions().len(), 1);
    assert_eq!(
        out.warnings(),
        vec!["A file named a.csv is already loaded; skipping this upload."]
    );
}

#[test]
fn finish_reports_success() {
    let (sweeper, mut out) = sweeper_with(vec![UploadedFile::new("a.txt", "hi")]);
    sweeper.finish(&mut out);
    assert_eq!(out.successes(), vec!["All files processed successfully!"]);
}

#[test]
fn text_fixture_is_previewed_from_disk() {
    let file = UploadedFile::from_path("tests/fixtures/notes.txt").unwrap();
    let (_, out) = sweeper_with(vec![file]);

    assert_eq!(key_value(&out, "notes.txt", "File Type"), vec![".txt"]);
    assert!(out
        .commands_for("notes.txt")
        .any(|c| matches!(c, RenderCommand::Subheader { text } if text == "File Content:")));
    assert!(out.commands_for("notes.txt").any(|c| matches!(
        c,
        RenderCommand::Code {
            content,
            truncated: false,
        } if content.starts_with("Plain text notes.")
    )));
}
