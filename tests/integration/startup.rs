// Startup behavior of the binary

use serial_test::serial;
use std::process::Command;
use tempfile::TempDir;

#[test]
#[serial]
fn test_missing_tools_exit_nonzero_before_touching_files() {
    let work = TempDir::new().unwrap();
    let root = work.path().join("videos");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("clip.mp4"), b"source").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_vidrotate"))
        .current_dir(work.path())
        .env("PATH", "")
        .arg("--config")
        .arg(work.path().join("absent.toml"))
        .arg("-i")
        .arg(&root)
        .arg("--rotate")
        .arg("dir")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tool not found"), "stderr: {}", stderr);
    assert!(!root.join("rotated").exists());
}

#[test]
#[serial]
fn test_missing_input_root_exits_nonzero() {
    let work = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_vidrotate"))
        .current_dir(work.path())
        .arg("--config")
        .arg(work.path().join("absent.toml"))
        .arg("-i")
        .arg(work.path().join("nowhere"))
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
#[serial]
fn test_init_config_writes_file() {
    let work = TempDir::new().unwrap();
    let path = work.path().join("conf").join("config.toml");

    let status = Command::new(env!("CARGO_BIN_EXE_vidrotate"))
        .arg("--init-config")
        .arg("--config")
        .arg(&path)
        .status()
        .unwrap();

    assert!(status.success());
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[codecs]"));
    assert!(written.contains("libx264"));
}
