//! Integration tests for the CLI interface

mod common;

use assert_cmd::Command;
use common::TestContextBuilder;
use predicates::prelude::*;
use std::fs;

fn article_export() -> Command {
    let mut cmd = Command::cargo_bin("article-export").unwrap();
    for var in [
        "ARTICLE_EXPORT_INPUT",
        "ARTICLE_EXPORT_OUTPUT_DIR",
        "ARTICLE_EXPORT_MAX_PARALLEL",
        "ARTICLE_EXPORT_ON_DUPLICATE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_help() {
    article_export()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--on-duplicate"));
}

#[test]
fn test_default_paths_in_working_directory() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_input(
            r##"[{"slug":"hello-world","body_markdown":"# Hello"},{"slug":"","body_markdown":"x"},{"slug":"foo"}]"##,
        )
        .build()
        .unwrap();

    article_export()
        .current_dir(ctx.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Markdown file created:"))
        .stdout(predicate::str::contains("Record skipped").count(2));

    assert_eq!(ctx.output_files(), vec!["hello-world.md"]);
}

#[test]
fn test_explicit_paths() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_file("data/posts.json", r#"[{"slug":"a","body_markdown":"A"}]"#)
        .build()
        .unwrap();

    article_export()
        .current_dir(ctx.path())
        .args(["-i", "data/posts.json", "-o", "site", "-j", "2"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(ctx.path().join("site").join("a.md")).unwrap(),
        "A"
    );
}

#[test]
fn test_missing_input_exits_zero_by_default() {
    let ctx = TestContextBuilder::new().unwrap().build().unwrap();

    article_export()
        .current_dir(ctx.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Error reading input file"));

    assert!(ctx.output_dir().is_dir());
    assert!(ctx.output_files().is_empty());
}

#[test]
fn test_strict_mode_fails_on_bad_json() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_input("not json")
        .build()
        .unwrap();

    article_export()
        .current_dir(ctx.path())
        .arg("--strict")
        .assert()
        .code(4)
        .stdout(predicate::str::contains("Error parsing JSON data"));
}

#[test]
fn test_strict_mode_fails_on_skips() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_input(r#"[{"slug":"a","body_markdown":"A"},{"slug":"b"}]"#)
        .build()
        .unwrap();

    article_export()
        .current_dir(ctx.path())
        .arg("--strict")
        .assert()
        .code(1);

    assert_eq!(ctx.output_files(), vec!["a.md"]);
}

#[test]
fn test_config_file_and_flag_precedence() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_input(r#"[{"slug":"dup","body_markdown":"one"},{"slug":"dup","body_markdown":"two"}]"#)
        .with_file(
            "export.toml",
            "output_dir = \"from_config\"\non_duplicate = \"first-wins\"\n",
        )
        .build()
        .unwrap();

    article_export()
        .current_dir(ctx.path())
        .args(["--config", "export.toml", "--on-duplicate", "last-wins"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicate slug \"dup\""));

    assert_eq!(
        fs::read_to_string(ctx.path().join("from_config").join("dup.md")).unwrap(),
        "two"
    );
}

#[test]
fn test_env_overrides_output_dir() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_input(r#"[{"slug":"a","body_markdown":"A"}]"#)
        .build()
        .unwrap();

    article_export()
        .current_dir(ctx.path())
        .env("ARTICLE_EXPORT_OUTPUT_DIR", "env_out")
        .assert()
        .success();

    assert!(ctx.path().join("env_out").join("a.md").exists());
}

#[test]
fn test_invalid_duplicate_flag() {
    article_export()
        .args(["--on-duplicate", "random"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
