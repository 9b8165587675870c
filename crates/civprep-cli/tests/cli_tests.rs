//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn civprep() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("civprep").unwrap();
    cmd.env_remove("CIVPREP_CONTENT")
        .env_remove("CIVPREP_LEDGER")
        .env_remove("RUST_LOG");
    cmd
}

/// A temp directory with `civprep init` already run in it.
fn initialized_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    civprep()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

/// `initialized_dir` plus the 5-day, 3-hour plan from 2024-01-01.
fn planned_dir() -> TempDir {
    let dir = initialized_dir();
    civprep()
        .current_dir(dir.path())
        .args(["plan", "--goal", "Prelims 2025", "--start", "2024-01-01"])
        .args(["--days", "5", "--hours", "3"])
        .assert()
        .success();
    dir
}

fn read_ledger(dir: &TempDir) -> serde_json::Value {
    let content = std::fs::read_to_string(dir.path().join(".civprep/ledger.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn validate_starter_content() {
    civprep()
        .arg("validate")
        .arg("--content")
        .arg("../../content/upsc-core.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("7 topics, 14 questions"))
        .stdout(predicate::str::contains("All content banks valid"));
}

#[test]
fn validate_directory() {
    civprep()
        .arg("validate")
        .arg("--content")
        .arg("../../content")
        .assert()
        .success()
        .stdout(predicate::str::contains("UPSC Core"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(
        &path,
        r#"
[bank]
id = "broken"
name = "Broken"

[[topics]]
id = "polity"
name = "Polity"

[[questions]]
topic = "polity"
stem = "Pick one"
options = ["a", "b"]
correct_index = 5
"#,
    )
    .unwrap();

    civprep()
        .arg("validate")
        .arg("--content")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[question 0] WARNING"))
        .stdout(predicate::str::contains("out of range"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    civprep()
        .arg("validate")
        .arg("--content")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    civprep()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created civprep.toml"))
        .stdout(predicate::str::contains("Created content/upsc-core.toml"));

    assert!(dir.path().join("civprep.toml").exists());
    assert!(dir.path().join("content/upsc-core.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = initialized_dir();

    civprep()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn plan_five_day_scenario() {
    let dir = initialized_dir();

    civprep()
        .current_dir(dir.path())
        .args(["plan", "--goal", "Prelims 2025", "--start", "2024-01-01"])
        .args(["--days", "5", "--hours", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01"))
        .stdout(predicate::str::contains("2024-01-05"))
        .stdout(predicate::str::contains("Polity – Preamble"))
        .stderr(predicate::str::contains("Ledger saved"));

    let ledger = read_ledger(&dir);
    let plan = ledger["plan"].as_array().unwrap();
    assert_eq!(plan.len(), 5);
    for (i, day) in plan.iter().enumerate() {
        assert_eq!(day["day"], i as u64 + 1);
        assert_eq!(day["date"], format!("2024-01-0{}", i + 1));
        let minutes: u64 = day["tasks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["duration_mins"].as_u64().unwrap())
            .sum();
        assert!(minutes <= 180);
    }
}

#[test]
fn plan_rejects_zero_and_negative_days() {
    let dir = initialized_dir();

    for days in ["0", "-2"] {
        civprep()
            .current_dir(dir.path())
            .args(["plan", "--goal", "Prelims", "--days", days, "--hours", "3"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid study configuration"));
    }
    assert!(!dir.path().join(".civprep/ledger.json").exists());
}

#[test]
fn plan_rejects_days_past_the_calendar() {
    let dir = initialized_dir();

    civprep()
        .current_dir(dir.path())
        .args(["plan", "--goal", "Prelims", "--days", "2147483647", "--hours", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the calendar range"));
}

#[test]
fn plan_json_dry_run() {
    let dir = initialized_dir();

    let output = civprep()
        .current_dir(dir.path())
        .args(["plan", "--goal", "Mains", "--start", "2024-03-01"])
        .args(["--days", "3", "--hours", "1", "--format", "json", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let days = plan.as_array().unwrap();
    assert_eq!(days.len(), 3);
    // One hour fits only the 60-minute Read task.
    for day in days {
        assert_eq!(day["tasks"].as_array().unwrap().len(), 1);
        assert_eq!(day["tasks"][0]["kind"], "read");
    }
    assert!(!dir.path().join(".civprep/ledger.json").exists());
}

#[test]
fn score_records_result() {
    let dir = planned_dir();

    civprep()
        .current_dir(dir.path())
        .args(["score", "--topic", "polity-preamble", "--answers", "0=1,1=0"])
        .args(["--negative-marking", "--time-taken", "4", "--date", "2024-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0.67 / 2"))
        .stdout(predicate::str::contains("Correct: 1  Wrong: 1  Unattempted: 0"))
        .stdout(predicate::str::contains("Accuracy: 50% (Average)"));

    let ledger = read_ledger(&dir);
    let history = ledger["history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["topic"], "polity-preamble");
    assert_eq!(history[0]["uses_negative_marking"], true);
    assert_eq!(history[0]["time_taken_mins"], 4);
}

#[test]
fn score_without_negative_marking() {
    let dir = planned_dir();

    civprep()
        .current_dir(dir.path())
        .args(["score", "--topic", "polity-preamble", "--answers", "0=1,1=0"])
        .arg("--no-negative-marking")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1.00 / 2"))
        .stdout(predicate::str::contains("negative marking off"));
}

#[test]
fn score_unattempted_is_zero() {
    let dir = planned_dir();

    civprep()
        .current_dir(dir.path())
        .args(["score", "--topic", "science-space", "--answers", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0.00 / 2"))
        .stdout(predicate::str::contains("Accuracy: 0% (Poor)"));
}

#[test]
fn score_unknown_topic() {
    let dir = planned_dir();

    civprep()
        .current_dir(dir.path())
        .args(["score", "--topic", "astrology", "--answers", "0=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown topic 'astrology'"));
}

#[test]
fn done_marks_and_clears_tasks() {
    let dir = planned_dir();

    civprep()
        .current_dir(dir.path())
        .args(["done", "--day", "1", "--task", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked done"));
    assert_eq!(read_ledger(&dir)["plan"][0]["tasks"][1]["is_done"], true);

    civprep()
        .current_dir(dir.path())
        .args(["done", "--day", "1", "--task", "2", "--undo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked not done"));
    assert_eq!(read_ledger(&dir)["plan"][0]["tasks"][1]["is_done"], false);
}

#[test]
fn done_rejects_unknown_day() {
    let dir = planned_dir();

    civprep()
        .current_dir(dir.path())
        .args(["done", "--day", "9", "--task", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("plan has no day 9"));
}

#[test]
fn done_without_ledger() {
    let dir = initialized_dir();

    civprep()
        .current_dir(dir.path())
        .args(["done", "--day", "1", "--task", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Run `civprep plan` first"));
}

#[test]
fn progress_shows_stats_and_recommendations() {
    let dir = planned_dir();

    civprep()
        .current_dir(dir.path())
        .args(["done", "--day", "1", "--task", "1"])
        .assert()
        .success();
    civprep()
        .current_dir(dir.path())
        .args(["score", "--topic", "history-modern", "--answers", "0=1,1=1"])
        .assert()
        .success();

    civprep()
        .current_dir(dir.path())
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("5% done (1/20 tasks"))
        .stdout(predicate::str::contains("History – Modern India"))
        .stdout(predicate::str::contains("Excellent"))
        .stdout(predicate::str::contains("Focus next:"))
        .stdout(predicate::str::contains("1. Polity – Preamble (not tested yet)"));
}

#[test]
fn new_plan_keeps_history() {
    let dir = planned_dir();

    civprep()
        .current_dir(dir.path())
        .args(["score", "--topic", "polity-preamble", "--answers", "0=1"])
        .assert()
        .success();
    civprep()
        .current_dir(dir.path())
        .args(["plan", "--goal", "Mains", "--start", "2024-02-01", "--days", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Keeping 1 mock-test result(s)"));

    let ledger = read_ledger(&dir);
    assert_eq!(ledger["configuration"]["goal"], "Mains");
    assert_eq!(ledger["history"].as_array().unwrap().len(), 1);
}

#[test]
fn report_writes_html() {
    let dir = planned_dir();

    civprep()
        .current_dir(dir.path())
        .args(["report", "--output", "out/report.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML report"));

    let html = std::fs::read_to_string(dir.path().join("out/report.html")).unwrap();
    assert!(html.contains("Prelims 2025"));
    assert!(html.contains("2024-01-05"));
}

#[test]
fn help_output() {
    civprep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("UPSC study planner and mock-test scorer"));
}

#[test]
fn version_output() {
    civprep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("civprep"));
}
