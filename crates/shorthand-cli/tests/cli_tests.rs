//! Integration tests for the shorthand CLI
//!
//! These tests invoke the actual shorthand-cli binary and verify:
//! - Exit codes (0 = success, 1 = grammar rejected, 2 = error)
//! - stdout/stderr output
//! - JSON output format
//! - All commands work end-to-end

use std::path::PathBuf;
use std::process::Command;

// ── Helpers ───────────────────────────────────────────────

fn shorthand_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_shorthand-cli"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn run_shorthand(args: &[&str]) -> std::process::Output {
    Command::new(shorthand_bin())
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("RUST_LOG")
        .env_remove("SHORTHAND_EXPANSION_LIMIT")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to execute shorthand-cli")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let output = run_shorthand(&["version"]);
    assert!(output.status.success(), "version should exit 0");
    let stdout = stdout_of(&output);
    assert!(stdout.contains("shorthand"), "should contain 'shorthand'");
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "should contain version"
    );
}

#[test]
fn test_version_flag() {
    let output = run_shorthand(&["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    assert!(stdout_of(&output).contains(env!("CARGO_PKG_VERSION")));
}

// ── Check ─────────────────────────────────────────────────

#[test]
fn test_check_valid_grammar() {
    let output = run_shorthand(&["check", "ray ( <angle> )"]);
    assert!(output.status.success(), "valid grammar should exit 0");
    let stdout = stdout_of(&output);
    assert!(stdout.contains("ray ( <angle> )"));
    assert!(stdout.contains("valid"));
}

#[test]
fn test_check_lists_sorted_expansions() {
    let output = run_shorthand(&["check", "top || <angle>"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().take(4).collect();
    assert_eq!(lines, vec!["<angle>", "<angle> top", "top", "top <angle>"]);
}

#[test]
fn test_check_empty_accepting_grammar() {
    let output = run_shorthand(&["check", "<angle>?"]);
    assert_eq!(output.status.code(), Some(1), "empty-accepting should exit 1");
    assert!(stderr_of(&output).contains("Empty string should not be accepted."));
}

#[test]
fn test_check_ambiguous_grammar() {
    let output = run_shorthand(&["check", "--file", fixture("ambiguous.grammar").to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1), "ambiguous should exit 1");
    assert!(stderr_of(&output).contains("error"));
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["0px", "0px 0px", "auto"]);
}

#[test]
fn test_check_explain_names_expansions() {
    let output = run_shorthand(&["check", "--explain", "<offset-rotation> | <angle>"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("0deg"));
    assert!(stdout.contains("    <offset-rotation>"));
    assert!(stdout.contains("    <angle>"));
}

#[test]
fn test_check_parse_error() {
    let output = run_shorthand(&["check", "--file", fixture("unclosed.grammar").to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2), "parse error should exit 2");
    assert!(stderr_of(&output).contains("Expected ]"));
}

#[test]
fn test_check_unknown_token() {
    let output = run_shorthand(&["check", "<angle> <color>"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Unknown token at \"<color>\""));
}

#[test]
fn test_check_nonexistent_file() {
    let output = run_shorthand(&["check", "--file", "nonexistent.grammar"]);
    assert_eq!(output.status.code(), Some(2), "missing file should exit 2");
    assert!(stderr_of(&output).contains("cannot read"));
}

#[test]
fn test_check_requires_grammar() {
    let output = run_shorthand(&["check"]);
    assert!(!output.status.success(), "missing grammar is a usage error");
}

#[test]
fn test_check_json_valid() {
    let output = run_shorthand(&["check", "--json", "--file", fixture("ray.grammar").to_str().unwrap()]);
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("should be valid JSON");
    assert_eq!(json["valid"], true);
    assert_eq!(json["error"], serde_json::Value::Null);
    assert_eq!(json["report"]["rejects_empty"], false);
    assert_eq!(json["report"]["expansions"].as_array().unwrap().len(), 11);
    assert!(json["report"]["atoms_used"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("contain")));
}

#[test]
fn test_check_json_rejected() {
    let output = run_shorthand(&["check", "--json", "--file", fixture("offset.grammar").to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("should be valid JSON");
    assert_eq!(json["valid"], false);
    assert_eq!(json["report"]["rejects_empty"], true);
    assert_eq!(json["error"], "Empty string should not be accepted.");
}

#[test]
fn test_check_json_parse_error() {
    let output = run_shorthand(&["check", "--json", "[ / ] ]"]);
    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("should be valid JSON");
    assert_eq!(json["valid"], false);
    assert_eq!(json["error"], "Unexpected input at \"]\"");
}

#[test]
fn test_check_quiet_valid() {
    let output = run_shorthand(&["--quiet", "check", "<url> | none"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).is_empty(), "quiet mode should produce no stdout");
}

// ── Limits ────────────────────────────────────────────────

#[test]
fn test_limit_flag() {
    let output = run_shorthand(&["--limit", "3", "check", "top || left"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("more than 3 expansions"));
}

#[test]
fn test_limit_caps_sample_renderings() {
    // One expansion, 4^3 sample renderings
    let output = run_shorthand(&[
        "--limit",
        "10",
        "check",
        "<offset-rotation> <offset-rotation> <offset-rotation>",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("more than 10 sample renderings"));
}

#[test]
fn test_limit_from_environment() {
    let output = Command::new(shorthand_bin())
        .args(["expand", "top || left"])
        .env("SHORTHAND_EXPANSION_LIMIT", "2")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to execute shorthand-cli");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_limit_zero_disables_ceiling() {
    let output = run_shorthand(&["--limit", "0", "expand", "top || left"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).lines().count(), 4);
}

// ── Expand ────────────────────────────────────────────────

#[test]
fn test_expand_includes_empty() {
    let output = run_shorthand(&["expand", "<angle>?"]);
    assert!(output.status.success(), "expand does not judge the grammar");
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["", "<angle>"]);
}

#[test]
fn test_expand_json() {
    let output = run_shorthand(&["expand", "--json", "<url> && none"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(
        json["expansions"],
        serde_json::json!([["<url>", "none"], ["none", "<url>"]])
    );
}

// ── Tokens ────────────────────────────────────────────────

#[test]
fn test_tokens_json() {
    let output = run_shorthand(&["tokens", "--json", "[<angle>]!||ray"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(
        json["tokens"],
        serde_json::json!(["[", "<angle>", "]", "!", "||", "ray"])
    );
}

#[test]
fn test_tokens_human() {
    let output = run_shorthand(&["tokens", "<size> contain"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("longhand"));
    assert!(stdout.contains("separator"));
}

// ── Fmt ───────────────────────────────────────────────────

#[test]
fn test_fmt_canonical_spacing() {
    let output = run_shorthand(&["fmt", "[<url>|none]!<size>?"]);
    assert!(output.status.success(), "fmt should exit 0");
    assert_eq!(stdout_of(&output).trim_end(), "[ <url> | none ]! <size>?");
}

#[test]
fn test_fmt_idempotent() {
    let output1 = run_shorthand(&["fmt", "--file", fixture("offset.grammar").to_str().unwrap()]);
    assert!(output1.status.success());
    let canonical1 = stdout_of(&output1);

    let output2 = run_shorthand(&["fmt", canonical1.trim_end()]);
    assert!(output2.status.success());
    assert_eq!(canonical1, stdout_of(&output2), "fmt must be idempotent");
}

#[test]
fn test_fmt_tree() {
    let output = run_shorthand(&["fmt", "--tree", "<url> | ray"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "single-bar\n  atom <url>\n  atom ray\n"
    );
}

// ── Vocabulary ────────────────────────────────────────────

#[test]
fn test_vocabulary_json() {
    let output = run_shorthand(&["vocabulary", "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 30);
    assert_eq!(entries[0]["token"], "<angle>");
    assert_eq!(entries[0]["kind"], "longhand");
    assert_eq!(entries[0]["samples"], serde_json::json!(["0deg"]));
    assert_eq!(entries[29]["token"], "!");
    assert_eq!(entries[29]["kind"], "symbol");
}

// ── Logging ───────────────────────────────────────────────

#[test]
fn test_verbose_logs_to_stderr() {
    let output = run_shorthand(&["--verbose", "check", "<angle>"]);
    assert!(output.status.success());
    assert!(stderr_of(&output).contains("analyzed grammar"));
    assert!(!stdout_of(&output).contains("analyzed grammar"));
}

// ── Determinism ───────────────────────────────────────────

#[test]
fn test_check_json_determinism() {
    let path = fixture("offset.grammar");
    let args = ["check", "--json", "--file", path.to_str().unwrap()];
    let first = stdout_of(&run_shorthand(&args));
    for _ in 0..10 {
        assert_eq!(first, stdout_of(&run_shorthand(&args)), "output must be deterministic");
    }
}
