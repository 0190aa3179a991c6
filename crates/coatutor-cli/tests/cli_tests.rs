//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `coatutor` command isolated from any user config: it runs inside `dir`
/// with `HOME` pointing there too.
fn coatutor(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("coatutor").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("COATUTOR_BACKEND_URL")
        .env_remove("COATUTOR_STUDENT_ID")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("custom.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Computer organization & architecture study companion",
        ));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("coatutor"));
}

#[test]
fn topics_lists_builtins() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .arg("topics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Instruction Cycle"))
        .stdout(predicate::str::contains("Cache Memory"))
        .stdout(predicate::str::contains("5 topic(s)"));
}

#[test]
fn evaluate_complete_answer() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .args([
            "evaluate",
            "--topic",
            "Instruction Cycle",
            "--text",
            "I will explain Fetch, Decode, and Execute phases, using Program Counter and IR",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 100/100"))
        .stdout(predicate::str::contains("Perfect!"))
        .stdout(predicate::str::contains("Missing").not());
}

#[test]
fn evaluate_empty_answer_lists_everything() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .args(["evaluate", "--topic", "instruction cycle", "--text", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0/100"))
        .stdout(predicate::str::contains("Missing steps:"))
        .stdout(predicate::str::contains("Include Program Counter"));
}

#[test]
fn evaluate_unknown_topic_uses_generic_checklist() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .args(["evaluate", "--topic", "Virtual Memory", "--text", "nothing relevant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Define the main idea"))
        .stderr(predicate::str::contains("unknown topic 'Virtual Memory'"));
}

#[test]
fn sequence_out_of_order_names_step() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .args([
            "sequence",
            "--topic",
            "Instruction Cycle",
            "--steps",
            "Execute, Fetch, Decode, Store",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 'Fetch' appears out of order."))
        .stdout(predicate::str::contains("Expected: Fetch -> Decode -> Execute -> Store"));
}

#[test]
fn sequence_json_output() {
    let dir = TempDir::new().unwrap();
    let output = coatutor(dir.path())
        .args([
            "sequence",
            "--topic",
            "Instruction Cycle",
            "--steps",
            "Fetch,Decode,Execute,Store",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["valid"], true);
    assert_eq!(outcome["missing"], serde_json::json!([]));
}

#[test]
fn sequence_rejects_component_topic() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .args(["sequence", "--topic", "Cache Memory", "--steps", "a,b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no process flow"));
}

#[test]
fn chat_greets_with_local_tutor() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .args(["chat", "--topic", "Instruction Cycle", "--seed", "1"])
        .write_stdin("hi\nquit\nnever read\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "tutor (local): Hi! Let's explore the Instruction Cycle.",
        ))
        .stdout(predicate::str::contains("never read").not());
}

#[test]
fn scripted_quiz_prints_report() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .args([
            "quiz",
            "--topic",
            "Instruction Cycle",
            "--answers",
            "1,0,0",
            "--offline",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 3/3"))
        .stdout(predicate::str::contains("1/3 (33.3%)"))
        .stdout(predicate::str::contains("Predicted level: —"));
}

#[test]
fn quiz_with_too_few_answers_fails() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .args(["quiz", "--topic", "Instruction Cycle", "--answers", "1", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no answer given for question 2"));
}

#[test]
fn reminders_round_trip_through_config_path() {
    let dir = TempDir::new().unwrap();
    let reminders = dir.path().join("state").join("reminders.json");
    let config = write_config(
        dir.path(),
        &format!("reminders_path = {:?}\n", reminders.to_string_lossy()),
    );

    coatutor(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["remind", "set", "--task", "cache", "--note", "review write-back"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reminder set: cache"));
    assert!(reminders.exists());

    coatutor(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["remind", "due"])
        .assert()
        .success()
        .stdout(predicate::str::contains("review write-back"));

    coatutor(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["remind", "remove", "--task", "cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed reminder cache"));

    coatutor(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["remind", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reminders."));
}

#[test]
fn out_of_range_reminder_offset_is_an_error() {
    let dir = TempDir::new().unwrap();
    let reminders = dir.path().join("reminders.json");
    let config = write_config(
        dir.path(),
        &format!("reminders_path = {:?}\n", reminders.to_string_lossy()),
    );

    coatutor(dir.path())
        .arg("--config")
        .arg(&config)
        .args([
            "remind",
            "set",
            "--task",
            "t",
            "--note",
            "n",
            "--in-minutes",
            "9223372036854775",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: due time out of range"))
        .stderr(predicate::str::contains("panicked").not());
    assert!(!reminders.exists());
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .args(["topics", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    coatutor(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created coatutor.toml"))
        .stdout(predicate::str::contains("Created topics/example.toml"));

    assert!(dir.path().join("coatutor.toml").exists());
    assert!(dir.path().join("topics/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    coatutor(dir.path()).arg("init").assert().success();

    coatutor(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_output_validates_and_loads() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path()).arg("init").assert().success();

    coatutor(dir.path())
        .args(["validate", "--knowledge", "topics/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Topic: Interrupts"))
        .stdout(predicate::str::contains("All topics valid."));

    // The generated config adds the example topic directory.
    coatutor(dir.path())
        .arg("topics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interrupts"))
        .stdout(predicate::str::contains("6 topic(s)"));
}

#[test]
fn init_writes_config_to_given_path() {
    let dir = TempDir::new().unwrap();

    coatutor(dir.path())
        .args(["init", "--config", "conf/custom.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created conf/custom.toml"));

    assert!(dir.path().join("conf/custom.toml").exists());
    assert!(!dir.path().join("coatutor.toml").exists());

    // Without --knowledge, validate checks the configured knowledge_paths.
    coatutor(dir.path())
        .args(["validate", "--config", "conf/custom.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Topic: Interrupts"))
        .stdout(predicate::str::contains("All topics valid."));
}

#[test]
fn validate_without_paths_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "student_id = \"s\"\n");

    coatutor(dir.path())
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no knowledge_paths configured"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bad.toml"),
        r#"
[[topics]]
name = "Half Done"
kind = "sequence"
"#,
    )
    .unwrap();

    coatutor(dir.path())
        .args(["validate", "--knowledge", "bad.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Half Done] WARNING"))
        .stdout(predicate::str::contains("sequence topic has no flow_steps"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    coatutor(dir.path())
        .args(["validate", "--knowledge", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
