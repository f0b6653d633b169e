//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn realform(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("realform").unwrap();
    cmd.current_dir(dir.path()).env("HOME", dir.path());
    cmd
}

fn shipped_questions() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../questions")
}

const DETAILS: &str = r#"
child_first_name = "Ava"
child_last_name = "Stone"
completed_by = "Jo Stone"
relationship = "Mother"
therapist = "Dr. Lee"
sex = "female"
"#;

fn write_inputs(dir: &TempDir, responses: &str) {
    std::fs::write(dir.path().join("details.toml"), DETAILS).unwrap();
    std::fs::write(dir.path().join("responses.csv"), responses).unwrap();
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    realform(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created realform.toml"))
        .stdout(predicate::str::contains("Created details.toml"))
        .stdout(predicate::str::contains("Dressing.csv"));

    assert!(dir.path().join("realform.toml").exists());
    assert!(dir.path().join("questions/School-Related_Skills.csv").exists());
}

#[test]
fn init_skips_existing_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("realform.toml"), "show_scores = true\n").unwrap();

    realform(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("realform.toml already exists, skipping."));

    let content = std::fs::read_to_string(dir.path().join("realform.toml")).unwrap();
    assert_eq!(content, "show_scores = true\n");
}

#[test]
fn validate_after_init() {
    let dir = TempDir::new().unwrap();
    realform(&dir).arg("init").assert().success();

    realform(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("11 categories, 132 questions"))
        .stdout(predicate::str::contains("All question files valid."));
}

#[test]
fn validate_reports_missing_files() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("empty")).unwrap();

    realform(&dir)
        .arg("validate")
        .arg("--questions-dir")
        .arg("empty")
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("warning(s) found."));
}

#[test]
fn report_from_saved_responses() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        &dir,
        "Domain,Category,Question No,Response\n\
         ADL,Dressing,1,3: Frequently (75%)\n\
         ADL,Dressing,2,0: Unable\n\
         IADL,Travelling,1,2: Occasionally (50%)\n",
    );

    realform(&dir)
        .args(["report", "--responses", "responses.csv", "--details", "details.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Child: Ava Stone"))
        .stdout(predicate::str::contains("3/60"))
        .stdout(predicate::str::contains("ADL Total: 3/60 (5.0%)"))
        .stdout(predicate::str::contains("IADL Total: 2/21 (9.5%)"))
        .stdout(predicate::str::contains("Evaluating therapist: Dr. Lee"));
}

#[test]
fn report_writes_all_formats() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        &dir,
        "Domain,Category,Question No,Response\n\
         ADL,Feeding,1,1: Seldom (25%)\n\
         IADL,Meal Preparation,1,1: Seldom (25%)\n",
    );

    realform(&dir)
        .args(["report", "--responses", "responses.csv", "--details", "details.toml"])
        .args(["--format", "all", "--output", "out"])
        .assert()
        .success();

    let mut extensions: Vec<String> = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| {
            e.unwrap()
                .path()
                .extension()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    extensions.sort();
    assert_eq!(extensions, ["html", "json", "md", "txt"]);
}

#[test]
fn report_fails_for_empty_domain() {
    let dir = TempDir::new().unwrap();
    write_inputs(
        &dir,
        "Domain,Category,Question No,Response\nADL,Dressing,1,3: Frequently (75%)\n",
    );

    realform(&dir)
        .args(["report", "--responses", "responses.csv", "--details", "details.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data for domain IADL"));
}

#[test]
fn report_nonexistent_file() {
    let dir = TempDir::new().unwrap();

    realform(&dir)
        .args(["report", "--responses", "nonexistent.csv", "--details", "details.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn full_survey_from_stdin() {
    let dir = TempDir::new().unwrap();
    let mut input = String::from("Ava\nStone\nJo Stone\nMother\nDr. Lee\nfemale\n");
    for _ in 0..132 {
        input.push_str("3\n");
    }

    realform(&dir)
        .arg("survey")
        .arg("--questions-dir")
        .arg(shipped_questions())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("You have completed the Dressing category!"))
        .stdout(predicate::str::contains("You have completed the entire survey!"))
        .stdout(predicate::str::contains("ADL Total: 222/222 (100.0%)"))
        .stdout(predicate::str::contains("IADL Total: 174/174 (100.0%)"))
        .stdout(predicate::str::contains("Ava is already independent in both"));

    let responses = std::fs::read_to_string(dir.path().join("responses.csv")).unwrap();
    assert!(responses.starts_with("Domain,Category,Question No,Response"));
    assert_eq!(responses.lines().count(), 133);
    assert!(dir.path().join("realform-results").is_dir());
}

#[test]
fn survey_fails_when_input_ends_early() {
    let dir = TempDir::new().unwrap();

    realform(&dir)
        .arg("survey")
        .arg("--questions-dir")
        .arg(shipped_questions())
        .write_stdin("Ava\n\n\n\n\n\n3\n3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "input ended before the survey was complete",
        ));

    let responses = std::fs::read_to_string(dir.path().join("responses.csv")).unwrap();
    assert_eq!(responses.lines().count(), 3);
}

#[test]
fn survey_fails_when_responses_cannot_be_saved() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("responses_dir")).unwrap();

    realform(&dir)
        .arg("survey")
        .arg("--questions-dir")
        .arg(shipped_questions())
        .args(["--responses", "responses_dir"])
        .write_stdin("Ava\n\n\n\n\n\n3\n3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to save responses"));

    assert!(!dir.path().join("realform-results").exists());
}
