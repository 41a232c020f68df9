//! CLI smoke tests: run the binary with scripted stdin.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn cli_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_novo"));
    cmd.env_remove("RUST_LOG")
        .env_remove("NOVO_BACKEND")
        .env_remove("NOVO_DATA_DIR")
        .env_remove("NOVO_HISTORY_LIMIT")
        .env_remove("NOVO_STORAGE_KEY")
        .env_remove("NOVO_CONFIG");
    cmd
}

/// Run a session with the given stdin script.
fn session(args: &[&str], script: &str) -> Output {
    let mut child = cli_bin()
        .args(args)
        .arg("--config")
        .arg("/tmp/nonexistent_novo_config_12345.toml")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(script.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait")
}

fn file_session(dir: &Path, script: &str) -> String {
    let output = session(
        &["--backend", "file", "--data-dir", dir.to_str().unwrap(), "--seed", "5"],
        script,
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "Expected usage info in --help output");
    assert!(stdout.contains("--backend"));
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("novo"), "Expected binary name in --version output");
}

#[test]
fn test_unknown_backend_is_rejected() {
    let output = cli_bin().args(["--backend", "redis"]).output().expect("failed to run");
    assert!(!output.status.success());
}

#[test]
fn test_scripted_session_in_memory() {
    let output = session(
        &["--backend", "memory", "--seed", "1"],
        "/good\nI love music\n/good\n/stats json\n/why happy joy\n/quit\nnever sent\n",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.starts_with("Novo: Hello! I'm Novo"));
    assert!(stdout.contains("Nothing to rate yet."));
    assert!(stdout.contains("usic"), "Expected a music reply:\n{stdout}");
    assert!(stdout.contains("Thanks for the feedback!"));
    assert!(stdout.contains("\"conversation_count\": 1"));
    assert!(stdout.contains("\"music\": 0.1"));
    assert!(stdout.contains("emotion: happy (confidence 1.00)"));
    assert!(!stdout.contains("never sent"));
}

#[test]
fn test_file_backend_survives_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    file_session(dir.path(), "Tell me about space\n/bad\n");
    assert!(dir.path().join("novo_chatbot_data.json").exists());

    let stdout = file_session(dir.path(), "/history\n/stats\n");
    assert!(stdout.contains("you: Tell me about space"));
    assert!(stdout.contains("[-]"));
    assert!(stdout.contains("Total Conversations: 1"));
}

#[test]
fn test_reset_clears_stored_history() {
    let dir = tempfile::TempDir::new().unwrap();
    file_session(dir.path(), "hello\nhow are you\n/reset\n");
    let stdout = file_session(dir.path(), "/history\n");
    assert!(stdout.contains("No conversations yet."));
}
