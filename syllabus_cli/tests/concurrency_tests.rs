//! Concurrency tests for the syllabus binary.
//!
//! Several processes exporting into the same directory must each succeed
//! and leave a complete file behind, with no stray temp files.

use assert_cmd::Command;
use std::fs;
use std::thread;
use tempfile::TempDir;

fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("syllabus"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config-home"));
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn sample_result(events: usize) -> String {
    let events: Vec<String> = (0..events)
        .map(|i| format!(r#"{{ "title": "Lab {}", "date": "2025-10-{:02}" }}"#, i, i % 28 + 1))
        .collect();
    format!(r#"{{ "summary": "Labs", "events": [{}] }}"#, events.join(","))
}

#[test]
fn test_concurrent_exports_to_same_directory() {
    let temp_dir = setup_test_dir();
    let input = temp_dir.path().join("result.json");
    fs::write(&input, sample_result(40)).unwrap();
    let out_dir = temp_dir.path().join("out");

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let mut cmd = cli(&temp_dir);
            let input = input.clone();
            let out_dir = out_dir.clone();
            let format = if i % 2 == 0 { "ics" } else { "csv" };
            thread::spawn(move || {
                cmd.arg("export")
                    .arg("--input")
                    .arg(&input)
                    .arg("--format")
                    .arg(format)
                    .arg("--out-dir")
                    .arg(&out_dir)
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("export thread panicked");
    }

    let ics = fs::read_to_string(out_dir.join("syllabus-events.ics")).unwrap();
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 40);
    assert!(ics.ends_with("END:VCALENDAR\r\n"));

    let csv = fs::read_to_string(out_dir.join("syllabus-events.csv")).unwrap();
    assert_eq!(csv.lines().count(), 41);

    let mut names: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["syllabus-events.csv", "syllabus-events.ics"]);
}

#[test]
fn test_repeated_exports_differ_only_in_dtstamp() {
    let temp_dir = setup_test_dir();
    let input = temp_dir.path().join("result.json");
    fs::write(&input, sample_result(5)).unwrap();

    let export = |dir: &str| {
        let out_dir = temp_dir.path().join(dir);
        cli(&temp_dir)
            .arg("export")
            .arg("--input")
            .arg(&input)
            .arg("--format")
            .arg("ics")
            .arg("--out-dir")
            .arg(&out_dir)
            .assert()
            .success();
        fs::read_to_string(out_dir.join("syllabus-events.ics")).unwrap()
    };

    let strip_stamp = |ics: String| -> Vec<String> {
        ics.split("\r\n")
            .filter(|l| !l.starts_with("DTSTAMP:"))
            .map(str::to_string)
            .collect()
    };

    let first = strip_stamp(export("a"));
    let second = strip_stamp(export("b"));
    assert_eq!(first, second);
}
