use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn audioforge(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("audioforge").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("AUDIOFORGE_BASE_PATH");
    cmd
}

#[test]
fn name_prints_generated_file_name() {
    let home = tempfile::tempdir().unwrap();
    audioforge(home.path())
        .args(["name", "--tag", "tts", "--text", "Hello world", "--ext", "mp3"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^tts_Hello_\d{8}_\d{6}\.mp3\n$").unwrap());
}

#[test]
fn resolve_creates_absolute_directory() {
    let home = tempfile::tempdir().unwrap();
    let target = home.path().join("out").join("clips");
    audioforge(home.path())
        .args(["resolve", target.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(target.to_str().unwrap()));
    assert!(target.is_dir());
}

#[test]
fn relative_dir_without_base_fails_with_message() {
    let home = tempfile::tempdir().unwrap();
    audioforge(home.path())
        .args(["resolve", "relative"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Output directory (relative) is relative; set AUDIOFORGE_BASE_PATH",
        ));
}

#[test]
fn json_mode_reports_structured_failure() {
    let home = tempfile::tempdir().unwrap();
    let output = audioforge(home.path())
        .args(["--json", "resolve", "relative"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["is_error"], true);
    assert!(response["text"]
        .as_str()
        .unwrap()
        .starts_with("Output directory (relative) is relative"));
}

#[test]
fn base_path_env_anchors_relative_output() {
    let home = tempfile::tempdir().unwrap();
    let base = home.path().join("base");
    audioforge(home.path())
        .env("AUDIOFORGE_BASE_PATH", &base)
        .args(["output", "--tool", "sfx", "--text", "door slam", "--dir", "fx"])
        .assert()
        .success()
        .stdout(predicate::str::contains(base.join("fx").join("sfx_door__").to_str().unwrap()));
    assert!(base.join("fx").is_dir());
}

#[test]
fn project_config_supplies_base_path() {
    let home = tempfile::tempdir().unwrap();
    let base = home.path().join("from-config");
    std::fs::write(
        home.path().join("audioforge.json"),
        serde_json::json!({ "base_path": base }).to_string(),
    )
    .unwrap();

    audioforge(home.path())
        .args(["resolve", "nested"])
        .assert()
        .success()
        .stdout(predicate::str::contains(base.join("nested").to_str().unwrap()));
}

#[test]
fn check_input_reports_missing_file() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("missing.wav");
    audioforge(home.path())
        .args(["check-input", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn cleanup_rejects_zero_max_age() {
    let home = tempfile::tempdir().unwrap();
    let old = home.path().join("keep.mp3");
    std::fs::write(&old, b"x").unwrap();
    audioforge(home.path())
        .args(["cleanup", home.path().to_str().unwrap(), "--max-age-hours", "0"])
        .assert()
        .failure();
    assert!(old.exists());
}

#[test]
fn cleanup_with_huge_max_age_deletes_nothing() {
    let home = tempfile::tempdir().unwrap();
    let fresh = home.path().join("fresh.mp3");
    std::fs::write(&fresh, b"x").unwrap();
    audioforge(home.path())
        .args([
            "cleanup",
            home.path().to_str().unwrap(),
            "--max-age-hours",
            &u64::MAX.to_string(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 0 file(s)"));
    assert!(fresh.exists());
}

#[test]
fn name_does_not_need_a_home_directory() {
    let home = tempfile::tempdir().unwrap();
    audioforge(home.path())
        .env_remove("HOME")
        .args(["name", "--tag", "sfx", "--text", "rain", "--ext", "mp3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("sfx_rain_"));
}
