//! CLI coverage for the generate command.

use assert_cmd::Command;
use predicates::prelude::*;

const FIXTURE: &str = r#"
[[courses]]
id = "course-1"
title = "World Geography"
description = "Physical geography fundamentals"
generation_prompt = "Focus on landforms"
subject_id = "subject-1"
grade_id = "grade-7"
system_prompt = "You teach geography."

[[categories]]
id = "cat-1"
title = "Essay"
subtitle = "Long-form writing"
sub_category_ids = ["sub-1", "sub-2"]

[[sub_categories]]
id = "sub-1"
title = "Format"
description = "Formatting rules"
system_prompt = "Require double spacing."

[[sub_categories]]
id = "sub-2"
title = "Grading"
system_prompt = "Grade out of 100."
"#;

fn fixture_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("records.toml");
    std::fs::write(&path, FIXTURE).unwrap();
    path
}

#[test]
fn dry_run_prints_composed_prompt_without_network() {
    let dir = tempfile::tempdir().unwrap();
    let records = fixture_file(&dir);

    Command::cargo_bin("eduforge")
        .unwrap()
        .args(["generate", "--records"])
        .arg(&records)
        .args([
            "--title",
            "Essay on Rivers",
            "--course-id",
            "course-1",
            "--category-id",
            "cat-1",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"- Title: "Essay on Rivers""#))
        .stdout(predicate::str::contains("Course Context:"))
        .stdout(predicate::str::contains(r#"Sub-Category: "Format""#));
}

#[test]
fn dry_run_without_course_renders_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let records = fixture_file(&dir);

    Command::cargo_bin("eduforge")
        .unwrap()
        .args(["generate", "--records"])
        .arg(&records)
        .args(["--title", "Essay on Rivers", "--category-id", "cat-1", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No course context provided"));
}

#[test]
fn mock_backend_prints_stored_payload() {
    let dir = tempfile::tempdir().unwrap();
    let records = fixture_file(&dir);

    Command::cargo_bin("eduforge")
        .unwrap()
        .args(["generate", "--records"])
        .arg(&records)
        .args(["--title", "Essay on Rivers", "--category-id", "cat-1", "--mock"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""instructions":"#))
        .stdout(predicate::str::contains(r#""rubric":"#));
}

#[test]
fn unknown_model_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let records = fixture_file(&dir);

    Command::cargo_bin("eduforge")
        .unwrap()
        .args(["generate", "--records"])
        .arg(&records)
        .args([
            "--title",
            "Essay on Rivers",
            "--category-id",
            "cat-1",
            "--model",
            "gpt-4",
            "--dry-run",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported model type: gpt-4"));
}

#[test]
fn missing_category_reports_typed_error() {
    let dir = tempfile::tempdir().unwrap();
    let records = fixture_file(&dir);

    Command::cargo_bin("eduforge")
        .unwrap()
        .args(["generate", "--records"])
        .arg(&records)
        .args(["--title", "Essay on Rivers", "--category-id", "cat-9", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Assignment category 'cat-9' not found"));
}
