//! Integration tests that run the commentcov binary

use std::path::Path;
use std::process::{Command, Output};

fn commentcov_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_commentcov"))
}

const HOGE: &str = "// hoge Header
package hoge // hoge Inline

// MyFunc Header
func MyFunc() bool { // MyFunc Inline
    return true
}

// nolint:funlen
func myFunc() {}
";

/// A project directory with one Go package and a stray non-Go file
fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::create_dir_all(dir.path().join("hoge")).unwrap();
    std::fs::write(dir.path().join("hoge/hoge.go"), HOGE).unwrap();
    std::fs::write(dir.path().join("hoge/README.md"), "# hoge\n").unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    commentcov_bin()
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to run commentcov")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_text_output_for_current_directory() {
    let dir = project();
    let output = run(dir.path(), &[]);

    assert!(output.status.success(), "Command should succeed: {}", stderr(&output));

    let stdout = stdout(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "One line per item: {}", stdout);
    assert!(lines[0].contains("FILE") && lines[0].contains("hoge"));
    assert!(lines[1].contains("PUBLIC_FUNCTION") && lines[1].contains("MyFunc"));
    assert!(lines[1].contains("(1 header, 1 inline)"), "{}", lines[1]);
    assert!(lines[2].contains("PRIVATE_FUNCTION") && lines[2].contains("myFunc"));
    assert!(lines[2].contains("(0 header, 0 inline)"), "{}", lines[2]);

    // Progress goes to stderr (note: output contains ANSI codes)
    assert!(stderr(&output).contains("Measuring"), "{}", stderr(&output));
}

#[test]
fn test_json_output() {
    let dir = project();
    let output = run(dir.path(), &["--format", "json", "hoge/hoge.go"]);

    assert!(output.status.success(), "Command should succeed: {}", stderr(&output));

    let stdout = stdout(&output);
    assert!(stdout.trim_start().starts_with('['), "Should output a JSON array: {}", stdout);
    assert!(stdout.contains("PUBLIC_FUNCTION"));
    assert!(stdout.contains("PRIVATE_FUNCTION"));
    assert!(stdout.contains("targetBlock"));
    assert!(stdout.contains("headerComments"));
    assert!(stdout.contains("inlineComments"));
    assert!(stdout.contains("MyFunc Header"));
    assert!(stdout.contains(".go"));
}

#[test]
fn test_keep_lint_annotations_flag() {
    let dir = project();
    let output = run(
        dir.path(),
        &["--keep-lint-annotations", "--verbose", "hoge/hoge.go"],
    );

    assert!(output.status.success(), "Command should succeed: {}", stderr(&output));

    let stdout = stdout(&output);
    assert!(stdout.contains("nolint:funlen"), "{}", stdout);
}

#[test]
fn test_config_file() {
    let dir = project();
    std::fs::create_dir_all(dir.path().join(".config/commentcov")).unwrap();
    std::fs::write(
        dir.path().join(".config/commentcov/config.yaml"),
        "keep_lint_annotations: true\nformat: json\n",
    )
    .unwrap();

    let output = run(dir.path(), &["hoge"]);
    assert!(output.status.success(), "Command should succeed: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("headerComments"), "Config should select JSON: {}", stdout);
    assert!(stdout.contains("nolint:funlen"), "Config should keep annotations: {}", stdout);

    // Flags win over the config
    let output = run(dir.path(), &["--format", "text", "hoge"]);
    assert!(output.status.success(), "Command should succeed: {}", stderr(&output));
    assert!(!crate::stdout(&output).contains("headerComments"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = project();
    let output = run(dir.path(), &["--config", "missing.yaml"]);

    assert!(!output.status.success(), "Command should fail");
    assert!(stderr(&output).contains("Config file not found"), "{}", stderr(&output));
}

#[test]
fn test_unknown_format() {
    let dir = project();
    let output = run(dir.path(), &["--format", "html"]);

    assert!(!output.status.success(), "Command should fail");
    assert!(stderr(&output).contains("Unknown output format"), "{}", stderr(&output));
}

#[test]
fn test_parse_error_names_file() {
    let dir = project();
    std::fs::write(dir.path().join("hoge/broken.go"), "func main() {}\n").unwrap();

    let output = run(dir.path(), &["hoge"]);

    assert!(!output.status.success(), "Command should fail");
    assert!(stdout(&output).is_empty(), "No partial output: {}", stdout(&output));
    assert!(stderr(&output).contains("broken.go"), "{}", stderr(&output));
}

#[test]
fn test_missing_path() {
    let dir = project();
    let output = run(dir.path(), &["nowhere"]);

    assert!(!output.status.success(), "Command should fail");
    assert!(stderr(&output).contains("nowhere"), "{}", stderr(&output));
}

#[test]
fn test_overlapping_paths_measured_once() {
    let dir = project();
    let output = run(dir.path(), &[".", "hoge", "hoge/hoge.go"]);

    assert!(output.status.success(), "Command should succeed: {}", stderr(&output));
    assert_eq!(stdout(&output).lines().count(), 3, "{}", stdout(&output));
}
