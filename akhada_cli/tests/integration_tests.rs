//! Integration tests for the akhada binary.
//!
//! These tests verify end-to-end behavior including:
//! - Readiness evaluation and recommendations
//! - Ring sync and record persistence
//! - Periodic refresh
//! - Workout, nutrition and progress tracking

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("akhada"))
}

fn read_record(data_dir: &Path, key: &str) -> Value {
    let path = data_dir.join("store").join(format!("{}.json", key));
    let content = fs::read_to_string(&path).expect("Failed to read record");
    serde_json::from_str(&content).expect("Record is not valid JSON")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Health Akhada body intelligence and training tracker",
        ));
}

#[test]
fn test_evaluate_peak_day() {
    cli()
        .args([
            "evaluate",
            "--hrv",
            "55",
            "--resting-hr",
            "55",
            "--body-temp",
            "36.9",
            "--sleep-quality",
            "88",
            "--recovery",
            "82",
            "--stress",
            "low",
            "--load",
            "medium",
            "--trend",
            "stable",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Metabolic score: 106.0"))
        .stdout(predicate::str::contains("NADI   PUSH"))
        .stdout(predicate::str::contains("AGNI   HIGH"))
        .stdout(predicate::str::contains("SHAKTI PUSH"))
        .stdout(predicate::str::contains("High-Intensity Strength Training"));
}

#[test]
fn test_evaluate_unlisted_triple_uses_fallback() {
    // PUSH / LOW / NORMAL has no dedicated entry
    cli()
        .args([
            "evaluate",
            "--hrv",
            "55",
            "--resting-hr",
            "70",
            "--body-temp",
            "36.0",
            "--sleep-quality",
            "88",
            "--recovery",
            "55",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("AGNI   LOW"))
        .stdout(predicate::str::contains("SHAKTI NORMAL"))
        .stdout(predicate::str::contains(
            "Listen to your body and train at a comfortable intensity.",
        ));
}

#[test]
fn test_evaluate_rejects_unknown_stress() {
    cli()
        .args([
            "evaluate",
            "--hrv",
            "40",
            "--resting-hr",
            "60",
            "--body-temp",
            "36.6",
            "--sleep-quality",
            "80",
            "--recovery",
            "70",
            "--stress",
            "extreme",
        ])
        .assert()
        .failure();
}

#[test]
fn test_sync_persists_records() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("sync")
        .arg("--seed")
        .arg("7")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("BODY INTELLIGENCE"));

    let ring = read_record(data_dir, "gabbitRingData");
    assert!(ring.get("restingHR").is_some());
    assert!(ring.get("lastSync").is_some());
    assert_eq!(ring["stressLevel"], "Low");

    let hrv = ring["hrv"].as_f64().unwrap();
    assert!((37.0..=46.0).contains(&hrv));

    let intelligence = read_record(data_dir, "bodyIntelligence");
    assert_eq!(intelligence["nadi"], "NORMAL");
    assert!(intelligence["recommendation"]["workout"].is_string());
    assert!(intelligence["timestamp"].is_string());
}

#[test]
fn test_sync_is_default_command() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli().arg("--data-dir").arg(data_dir).assert().success();

    assert!(data_dir.join("store/gabbitRingData.json").exists());
    assert!(data_dir.join("store/bodyIntelligence.json").exists());
}

#[test]
fn test_same_seed_same_readings() {
    let first = setup_test_dir();
    let second = setup_test_dir();

    for dir in [first.path(), second.path()] {
        cli()
            .args(["sync", "--seed", "42", "--data-dir"])
            .arg(dir)
            .assert()
            .success();
    }

    let a = read_record(first.path(), "gabbitRingData");
    let b = read_record(second.path(), "gabbitRingData");
    for field in ["hrv", "restingHR", "bodyTemp", "sleepQuality", "recoveryScore"] {
        assert_eq!(a[field], b[field], "field {}", field);
    }
}

#[test]
fn test_dry_run_does_not_save() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["sync", "--dry-run", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!data_dir.join("store").exists());
}

#[test]
fn test_status_before_and_after_sync() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No assessment yet"));

    cli()
        .arg("sync")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("NADI   NORMAL"));
}

#[test]
fn test_watch_runs_requested_ticks() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let output = cli()
        .args(["watch", "--ticks", "3", "--interval-secs", "0", "--data-dir"])
        .arg(data_dir)
        .output()
        .expect("Failed to run watch");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("BODY INTELLIGENCE").count(), 3);
}

#[test]
fn test_workout_updates_profile_and_history() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args([
            "workout",
            "--exercise",
            "Squat",
            "--set",
            "8x100",
            "--set",
            "6x110",
            "--minutes",
            "30",
            "--form-score",
            "85",
            "--data-dir",
        ])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout logged"))
        .stdout(predicate::str::contains("2 sets, 14 reps"))
        .stdout(predicate::str::contains("~360 kcal"));

    let profile = read_record(data_dir, "healthAkhadaUser");
    assert_eq!(profile["totalWorkouts"], 128);
    assert_eq!(profile["caloriesBurned"], 42800 + 360);

    let workouts = read_record(data_dir, "healthAkhadaWorkouts");
    let history = workouts["workoutHistory"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["totalReps"], 14);
    assert_eq!(history[0]["isActive"], false);
    assert_eq!(workouts["personalRecords"]["deadlift"], 140.0);
}

#[test]
fn test_workout_rejects_bad_set() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["workout", "--exercise", "Squat", "--set", "8-100", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_meal_and_nutrition_summary() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args([
            "meal",
            "--name",
            "Dal & rice",
            "--calories",
            "650",
            "--protein",
            "25",
            "--carbs",
            "90",
            "--fat",
            "15",
            "--data-dir",
        ])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining today: 1850 kcal"));

    cli()
        .args(["water", "--liters", "0.5", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .args(["nutrition", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("650 / 2500 kcal"))
        .stdout(predicate::str::contains("Water: 0.50 L"))
        .stdout(predicate::str::contains("Dal & rice"));
}

#[test]
fn test_weight_and_progress() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["progress", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No weights recorded yet"));

    for kg in ["82.5", "81.9"] {
        cli()
            .args(["weight", kg, "--data-dir"])
            .arg(data_dir)
            .assert()
            .success();
    }

    cli()
        .args(["progress", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Current weight: 81.9 kg"));
}

#[test]
fn test_achievements_unlock_once() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["achievements", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("100 Workouts - Complete 100 workouts  (new!)"));

    cli()
        .args(["achievements", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("(new!)").not());

    let progress = read_record(data_dir, "progressTracker");
    assert_eq!(progress["achievements"].as_array().unwrap().len(), 4);
}

#[test]
fn test_profile_energy_update() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["profile", "--energy", "92", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Energy score: 92"));

    let profile = read_record(data_dir, "healthAkhadaUser");
    assert_eq!(profile["energyScore"], 92);
    assert_eq!(profile["name"], "Warrior");
}

#[test]
fn test_export_creates_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let csv_path = data_dir.join("exports/workouts.csv");

    for _ in 0..2 {
        cli()
            .args(["workout", "--exercise", "Deadlift", "--set", "5x140", "--data-dir"])
            .arg(data_dir)
            .assert()
            .success();
    }

    cli()
        .args(["export", "--out"])
        .arg(&csv_path)
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 workouts"));

    let content = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("Deadlift"));
}

#[test]
fn test_workout_rep_overflow_fails_cleanly() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args([
            "workout",
            "--exercise",
            "Squat",
            "--set",
            "4294967295x1",
            "--set",
            "1x1",
            "--data-dir",
        ])
        .arg(data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("too many reps"))
        .stderr(predicate::str::contains("panicked").not());

    assert!(!data_dir.join("store/healthAkhadaWorkouts.json").exists());
}

#[test]
fn test_workout_rejects_out_of_range_minutes() {
    let temp_dir = setup_test_dir();

    for minutes in ["9223372036854775807", "1441", "0", "-5"] {
        cli()
            .args(["workout", "--exercise", "Squat", "--data-dir"])
            .arg(temp_dir.path())
            .arg(format!("--minutes={}", minutes))
            .assert()
            .failure()
            .stderr(predicate::str::contains("panicked").not());
    }

    cli()
        .args(["workout", "--exercise", "Squat", "--minutes", "1440", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Duration: 24:00:00"));
}

#[test]
fn test_repeat_export_adds_only_new_workouts() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let csv_path = data_dir.join("workouts.csv");

    let log_workout = || {
        cli()
            .args(["workout", "--exercise", "Squat", "--set", "5x100", "--data-dir"])
            .arg(data_dir)
            .assert()
            .success();
    };
    let export = || {
        cli()
            .args(["export", "--out"])
            .arg(&csv_path)
            .arg("--data-dir")
            .arg(data_dir)
            .assert()
            .success()
    };

    log_workout();
    export().stdout(predicate::str::contains("Exported 1 workouts"));
    export().stdout(predicate::str::contains("Exported 0 workouts"));

    log_workout();
    export().stdout(predicate::str::contains("Exported 1 workouts"));

    let content = fs::read_to_string(&csv_path).unwrap();
    let ids: Vec<_> = content
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}
