//! End-to-end runs of the icsdoc binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_icsdoc"))
}

fn calendar(events: &[&str]) -> String {
    let mut ics = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//icsdoc//test//EN\r\n");
    for event in events {
        ics.push_str("BEGIN:VEVENT\r\n");
        for line in event.lines() {
            ics.push_str(line);
            ics.push_str("\r\n");
        }
        ics.push_str("END:VEVENT\r\n");
    }
    ics.push_str("END:VCALENDAR\r\n");
    ics
}

const STANDUP: &str = "UID:standup-1\nSUMMARY:Standup\nDTSTART:20240101T090000Z\nDTEND:20240101T093000Z";

const PER_EVENT: &str =
    "{% for event in events %}{{ event.summary }}: {{ event.start }}-{{ event.end }}{% endfor %}";

/// Write the calendar and template into a fresh directory using the default names.
fn workspace(events: &[&str], template: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ics.ics"), calendar(events)).unwrap();
    fs::write(dir.path().join("mk.tmpl"), template).unwrap();
    dir
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--ics-file"))
        .stdout(predicate::str::contains("--pdf-file"));
}

#[test]
fn test_default_file_names() {
    let dir = workspace(&[STANDUP], PER_EVENT);

    cli().current_dir(dir.path()).assert().success();

    assert_eq!(
        read(dir.path().join("ics.md")),
        "Standup: 20240101T090000Z-20240101T093000Z"
    );
    assert!(!dir.path().join("ics.pdf").exists());
}

#[test]
fn test_explicit_paths() {
    let dir = workspace(&[STANDUP], PER_EVENT);
    fs::rename(dir.path().join("ics.ics"), dir.path().join("work.ics")).unwrap();
    fs::rename(dir.path().join("mk.tmpl"), dir.path().join("agenda.tmpl")).unwrap();

    cli()
        .current_dir(dir.path())
        .args(["--ics-file", "work.ics", "--md-template", "agenda.tmpl", "--md-file", "agenda.md"])
        .assert()
        .success();

    assert_eq!(
        read(dir.path().join("agenda.md")),
        "Standup: 20240101T090000Z-20240101T093000Z"
    );
    assert!(!dir.path().join("ics.md").exists());
}

#[test]
fn test_safe_html_description() {
    let event = "SUMMARY:Review\nDTSTART:20240102T100000Z\nDTEND:20240102T110000Z\nDESCRIPTION:<b>note</b>";
    let dir = workspace(
        &[event],
        "{% for event in events %}{{ event.description | safeHTML }}|{{ event.description }}{% endfor %}",
    );

    cli().current_dir(dir.path()).assert().success();

    let output = read(dir.path().join("ics.md"));
    let (raw, escaped) = output.split_once('|').unwrap();
    assert_eq!(raw, "<b>note</b>");
    assert_eq!(escaped, "&lt;b&gt;note&lt;&#x2F;b&gt;");
}

#[test]
fn test_empty_calendar_renders_header() {
    let dir = workspace(&[], "# Agenda\n{% for event in events %}- {{ event.summary }}\n{% endfor %}");

    cli().current_dir(dir.path()).assert().success();

    assert_eq!(read(dir.path().join("ics.md")), "# Agenda\n");
}

#[test]
fn test_events_keep_calendar_order() {
    let second = "SUMMARY:Second\nDTSTART:20240101T080000Z\nDTEND:20240101T083000Z";
    let dir = workspace(
        &[STANDUP, second, STANDUP],
        "{% for event in events %}{{ event.summary }};{% endfor %}",
    );

    cli().current_dir(dir.path()).assert().success();

    assert_eq!(read(dir.path().join("ics.md")), "Standup;Second;Standup;");
}

#[test]
fn test_pdf_output() {
    let dir = workspace(&[STANDUP], "# Agenda\n\n{% for event in events %}- {{ event.summary }}\n{% endfor %}");

    cli()
        .current_dir(dir.path())
        .args(["--pdf-file", "agenda.pdf"])
        .assert()
        .success();

    assert_eq!(read(dir.path().join("ics.md")), "# Agenda\n\n- Standup\n");
    let pdf = fs::read(dir.path().join("agenda.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn test_empty_pdf_file_disables_pdf() {
    let dir = workspace(&[STANDUP], PER_EVENT);

    cli()
        .current_dir(dir.path())
        .args(["--pdf-file", ""])
        .assert()
        .success();

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert!(entries.iter().all(|name| !name.ends_with(".pdf")), "got {entries:?}");
}

#[test]
fn test_missing_summary_fails_without_output() {
    let event = "UID:broken-1\nDTSTART:20240101T090000Z\nDTEND:20240101T093000Z";
    let dir = workspace(&[STANDUP, event], PER_EVENT);

    cli()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Event 'broken-1' is missing its summary"));

    assert!(!dir.path().join("ics.md").exists());
}

#[test]
fn test_missing_end_reported_by_position() {
    let event = "SUMMARY:Open ended\nDTSTART:20240101T090000Z";
    let dir = workspace(&[STANDUP, event], PER_EVENT);

    cli()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Event #2 is missing its end time"));
}

#[test]
fn test_missing_calendar_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("mk.tmpl"), PER_EVENT).unwrap();

    cli()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not read calendar"));
}

#[test]
fn test_template_error_fails_without_output() {
    let dir = workspace(&[STANDUP], "{% for event in events %}{{ event.location }}{% endfor %}");

    cli()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template error"));

    assert!(!dir.path().join("ics.md").exists());
}

#[test]
fn test_missing_template_fails() {
    let dir = workspace(&[STANDUP], PER_EVENT);
    fs::remove_file(dir.path().join("mk.tmpl")).unwrap();

    cli()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("mk.tmpl"));
}

#[test]
fn test_config_file_with_cli_override() {
    let dir = workspace(&[STANDUP], PER_EVENT);
    fs::write(
        dir.path().join("icsdoc.toml"),
        "md_file = \"from-config.md\"\npdf_file = \"from-config.pdf\"\n\n[pdf]\npage_size = \"letter\"\n",
    )
    .unwrap();

    cli()
        .current_dir(dir.path())
        .args(["--config", "icsdoc.toml", "--md-file", "from-cli.md"])
        .assert()
        .success();

    assert!(dir.path().join("from-cli.md").exists());
    assert!(!dir.path().join("from-config.md").exists());
    assert!(dir.path().join("from-config.pdf").exists());
}

#[test]
fn test_missing_config_file_fails() {
    let dir = workspace(&[STANDUP], PER_EVENT);

    cli()
        .current_dir(dir.path())
        .args(["--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
