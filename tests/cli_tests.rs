use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `trimkit` isolated from any config in the environment or working directory
fn trimkit(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("trimkit").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("TRIMKIT_CONFIG")
        .env_remove("RUST_LOG")
        .env("TRIMKIT_LOG_LEVEL", "warn");
    cmd
}

fn source(workdir: &TempDir, name: &str) -> String {
    let path = workdir.path().join(name);
    std::fs::write(&path, b"not really a video").unwrap();
    path.display().to_string()
}

#[test]
fn test_help_lists_subcommands() {
    let workdir = TempDir::new().unwrap();
    trimkit(&workdir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("trim"))
        .stdout(predicate::str::contains("transcode"))
        .stdout(predicate::str::contains("hls-multi"));
}

#[test]
fn test_dry_run_trim_prints_command() {
    let workdir = TempDir::new().unwrap();
    let input = source(&workdir, "talk.mp4");

    trimkit(&workdir)
        .args(["trim", "-i", &input, "-s", "1", "-e", "00:00:04.5", "--name", "intro"])
        .arg("--storage-dir")
        .arg(workdir.path().join("out"))
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trim Result"))
        .stdout(predicate::str::contains("ffmpeg -hide_banner -y -ss 00:00:01.000"))
        .stdout(predicate::str::contains("-t 00:00:03.500"))
        .stdout(predicate::str::contains("intro.mp4"));

    assert!(workdir.path().join("out").join("Trimmer").is_dir());
}

#[test]
fn test_dry_run_hls_multi_json() {
    let workdir = TempDir::new().unwrap();
    let input = source(&workdir, "concert.mp4");

    let output = trimkit(&workdir)
        .args(["--dry-run", "--output", "json", "hls-multi", "-i", &input])
        .args(["--variant", "1.0:5350k:5000k", "--variant", "0.5:1498k:1400k"])
        .args(["--name", "concert"])
        .arg("--storage-dir")
        .arg(workdir.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["has_variants"], true);
    assert_eq!(value["variants"].as_array().unwrap().len(), 2);
    assert!(value["master_playlist"]
        .as_str()
        .unwrap()
        .ends_with("master.m3u8"));
    assert!(workdir.path().join("Hls").join("concert").join("v1").is_dir());
}

#[test]
fn test_config_file_in_working_directory_is_used() {
    let workdir = TempDir::new().unwrap();
    std::fs::write(workdir.path().join("trimkit.toml"), "[encoding]\ncrf = 31\n").unwrap();
    let input = source(&workdir, "lecture.mov");

    trimkit(&workdir)
        .args(["--dry-run", "transcode", "-i", &input])
        .arg("--storage-dir")
        .arg(workdir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("-crf 31"));
}

#[test]
fn test_inverted_range_fails() {
    let workdir = TempDir::new().unwrap();
    let input = source(&workdir, "talk.mp4");

    trimkit(&workdir)
        .args(["--dry-run", "trim", "-i", &input, "-s", "10", "-e", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid trim arguments"));
}

#[test]
fn test_missing_input_fails() {
    let workdir = TempDir::new().unwrap();

    trimkit(&workdir)
        .args(["--dry-run", "trim", "-i", "nowhere.mp4", "-s", "0", "-e", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found").or(predicate::str::contains("nowhere.mp4")));
}

#[test]
fn test_missing_config_file_fails() {
    let workdir = TempDir::new().unwrap();

    trimkit(&workdir)
        .args(["--config", "absent.toml", "--dry-run", "convert", "-u", "https://example.com/a.m3u8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_malformed_variant_is_rejected() {
    let workdir = TempDir::new().unwrap();

    trimkit(&workdir)
        .args(["hls-multi", "-i", "in.mp4", "--variant", "big"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--variant"));
}
