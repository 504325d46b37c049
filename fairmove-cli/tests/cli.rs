//! Exit statuses and output of the `fairmove` binary, driven over pipes.

use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

/// Empty config so the user's own config file never leaks into a run.
fn empty_config() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{}").unwrap();
    file
}

fn fairmove(args: &[&str], stdin: &str) -> Output {
    let config = empty_config();
    let mut child = Command::new(env!("CARGO_BIN_EXE_fairmove"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// The JSON document follows the HMAC line and the menu.
fn json_outcome(output: &Output) -> Value {
    let text = stdout(output);
    let start = text.find('{').expect("no JSON in output");
    serde_json::from_str(&text[start..]).unwrap()
}

#[test]
fn test_too_few_moves_fails() {
    let output = fairmove(&["play", "a", "b"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid input"));
    assert!(!stdout(&output).contains("HMAC"));
}

#[test]
fn test_duplicate_moves_fail() {
    let output = fairmove(&["play", "a", "b", "a"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid input"));
}

#[test]
fn test_even_count_fails() {
    let output = fairmove(&["play", "a", "b", "c", "d"], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_exit_choice_succeeds() {
    let output = fairmove(&["play", "rock", "paper", "scissors"], "0\n");
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("HMAC: "));
    assert!(stdout(&output).contains("Goodbye"));
}

#[test]
fn test_help_and_invalid_input_then_move_succeeds() {
    let output = fairmove(&["play", "rock", "paper", "scissors"], "?\nx\n2\n");
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Incorrect input"));
    assert!(text.contains("Your move: paper"));
    assert!(["You win!", "You lose!", "Draw!"]
        .iter()
        .any(|verdict| text.contains(verdict)));
}

#[test]
fn test_closed_stdin_fails() {
    let output = fairmove(&["play", "rock", "paper", "scissors"], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_malformed_verify_fails() {
    let output = fairmove(
        &["verify", "--key", "zz", "--move", "rock", "--hmac", "00"],
        "",
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("hex"));
}

#[test]
fn test_played_reveal_verifies() {
    let output = fairmove(&["play", "--json", "rock", "paper", "scissors"], "1\n");
    assert!(output.status.success(), "{}", stderr(&output));

    let outcome = json_outcome(&output);
    assert_eq!(outcome["status"], "resolved");
    assert_eq!(outcome["user_move"], "rock");

    let key = outcome["reveal"]["key"].as_str().unwrap();
    let opponent = outcome["reveal"]["move"].as_str().unwrap();
    let hmac = outcome["commitment"].as_str().unwrap();
    assert_eq!(opponent, outcome["opponent_move"].as_str().unwrap());

    let genuine = fairmove(&["verify", "--key", key, "--move", opponent, "--hmac", hmac], "");
    assert!(genuine.status.success(), "{}", stdout(&genuine));
    assert!(stdout(&genuine).contains("HMAC verified"));

    let tampered = if opponent == "rock" { "paper" } else { "rock" };
    let forged = fairmove(&["verify", "--key", key, "--move", tampered, "--hmac", hmac], "");
    assert_eq!(forged.status.code(), Some(1));
    assert!(stdout(&forged).contains("HMAC mismatch"));
}

#[test]
fn test_exit_with_reveal_flag_discloses_verifiable_move() {
    let output = fairmove(
        &["play", "--json", "--reveal-on-exit", "rock", "paper", "scissors"],
        "0\n",
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let outcome = json_outcome(&output);
    assert_eq!(outcome["status"], "exited");

    let key = outcome["reveal"]["key"].as_str().unwrap();
    let opponent = outcome["reveal"]["move"].as_str().unwrap();
    let hmac = outcome["commitment"].as_str().unwrap();
    let verified = fairmove(&["verify", "--key", key, "--move", opponent, "--hmac", hmac], "");
    assert!(verified.status.success());
}
