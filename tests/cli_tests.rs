use assert_cmd::Command;
use std::fs;
use tempfile::tempdir;
use cnest::manifest::ProjectManifest;

#[test]
fn test_execute_init_creates_cnest_toml() {
    let dir = tempdir().unwrap();
    let dir_path = dir.path();

    // Accept every prompt default.
    let mut cmd = Command::cargo_bin("cnest").unwrap();
    cmd.current_dir(dir_path)
        .arg("init")
        .write_stdin("\n\n\n\n\n")
        .assert()
        .success();

    let toml_path = dir_path.join("cnest.toml");
    assert!(toml_path.exists());
    let content = fs::read_to_string(toml_path).unwrap();
    assert!(content.contains("[project]"));
    assert!(content.contains("version = \"1.0.0\""));
    assert!(dir_path.join("src").join("main.cpp").exists());
    assert!(dir_path.join("CMakeLists.txt").exists());
    assert!(dir_path.join("include").exists());
}

#[test]
fn test_commands_require_manifest() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("cnest").unwrap()
        .current_dir(dir.path())
        .args(["install", "widgets"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("cnest.toml not found"));
}

#[test]
fn test_execute_list() {
    let dir = tempdir().unwrap();
    let dir_path = dir.path();
    let mut manifest = ProjectManifest::new("tests", "1.0.0", "", "MIT", "");
    manifest.record("widgets", "v1.2");
    manifest.save(dir_path.join("cnest.toml")).unwrap();

    let output = Command::cargo_bin("cnest").unwrap()
        .current_dir(dir_path)
        .arg("list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let output_str = String::from_utf8_lossy(&output);
    assert!(output_str.contains("widgets: v1.2"));
}

#[cfg(unix)]
#[test]
fn test_execute_run_tolerates_non_utf8_output() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let dir_path = dir.path();
    let manifest = ProjectManifest::new("app", "1.0.0", "", "MIT", "");
    manifest.save(dir_path.join("cnest.toml")).unwrap();

    // Stand-in for a built binary that writes raw bytes to stdout.
    fs::create_dir_all(dir_path.join("build")).unwrap();
    let binary = dir_path.join("build").join("app");
    fs::write(&binary, "#!/bin/sh\nprintf 'ok\\377\\376\\n'\n").unwrap();
    fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();

    let output = Command::cargo_bin("cnest").unwrap()
        .current_dir(dir_path)
        .arg("run")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert!(String::from_utf8_lossy(&output).contains("ok"));
}

#[test]
fn test_execute_install_already_installed() {
    let dir = tempdir().unwrap();
    let dir_path = dir.path();
    let mut manifest = ProjectManifest::new("tests", "1.0.0", "", "MIT", "");
    manifest.record("widgets", "main-linux");
    manifest.save(dir_path.join("cnest.toml")).unwrap();

    // Short-circuits before any git invocation, so this runs offline.
    let output = Command::cargo_bin("cnest").unwrap()
        .current_dir(dir_path)
        .args(["install", "widgets"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let output_str = String::from_utf8_lossy(&output);
    assert!(output_str.contains("already installed"));
    assert!(output_str.contains("main-linux"));
}
