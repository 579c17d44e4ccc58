// Subprocess supervision: exit handling, cleanup and pipe draining

use crate::common::fake_tools::write_script;
use serial_test::serial;
use std::fs;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use vidrotate::Error;
use vidrotate::engine::{build_encode_cmd, convert, run_encode};

#[test]
#[serial]
fn test_success_keeps_output() {
    let dir = TempDir::new().unwrap();
    let ffmpeg = write_script(
        dir.path(),
        "ffmpeg",
        "#!/bin/sh\nfor last; do :; done\necho done > \"$last\"\n",
    );
    let input = dir.path().join("in.mp4");
    let output = dir.path().join("in-rotated.mp4");

    convert(&ffmpeg, &input, &output, None, &[], None).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "done\n");
}

#[test]
#[serial]
fn test_nonzero_exit_removes_output() {
    let dir = TempDir::new().unwrap();
    let ffmpeg = write_script(
        dir.path(),
        "ffmpeg",
        "#!/bin/sh\nfor last; do :; done\necho partial > \"$last\"\nexit 3\n",
    );
    let input = dir.path().join("in.mp4");
    let output = dir.path().join("in-rotated.mp4");

    let cmd = build_encode_cmd(&ffmpeg, &input, &output, None, &[]);
    let err = run_encode(cmd, &input, &output, None).unwrap_err();

    match err {
        Error::RuntimeFailure { input: failed, reason } => {
            assert_eq!(failed, input);
            assert!(reason.contains('3'), "unexpected reason: {}", reason);
        }
        other => panic!("expected RuntimeFailure, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
#[serial]
fn test_nonzero_exit_without_output() {
    let dir = TempDir::new().unwrap();
    let ffmpeg = write_script(dir.path(), "ffmpeg", "#!/bin/sh\nexit 1\n");
    let input = dir.path().join("in.mp4");
    let output = dir.path().join("in-rotated.mp4");

    let err = convert(&ffmpeg, &input, &output, None, &[], None).unwrap_err();
    assert!(matches!(err, Error::RuntimeFailure { .. }));
    assert!(!err.is_fatal());
}

#[test]
#[serial]
fn test_chatty_child_does_not_deadlock() {
    // Well past a pipe buffer on both streams
    let script = r#"#!/bin/sh
for last; do :; done
i=0
while [ $i -lt 5000 ]; do
  echo "frame=$i fps=25 q=28.0"
  echo "frame=$i speed=1.0x" >&2
  i=$((i+1))
done
echo ok > "$last"
"#;
    let dir = TempDir::new().unwrap();
    let ffmpeg = write_script(dir.path(), "ffmpeg", script);
    let input = dir.path().join("in.mp4");
    let output = dir.path().join("in-rotated.mp4");

    let started = Instant::now();
    convert(&ffmpeg, &input, &output, None, &[], Some(Duration::from_secs(60))).unwrap();
    assert!(output.exists());
    assert!(started.elapsed() < Duration::from_secs(60));
}

#[test]
#[serial]
fn test_timeout_kills_forked_children() {
    // sh stays the parent of sleep, and sleep inherits both pipes
    let dir = TempDir::new().unwrap();
    let ffmpeg = write_script(
        dir.path(),
        "ffmpeg",
        "#!/bin/sh\nfor last; do :; done\necho partial > \"$last\"\nsleep 6\necho late\n",
    );
    let input = dir.path().join("in.mp4");
    let output = dir.path().join("in-rotated.mp4");

    let started = Instant::now();
    let err = convert(&ffmpeg, &input, &output, None, &[], Some(Duration::from_millis(300)))
        .unwrap_err();

    assert!(matches!(err, Error::RuntimeFailure { .. }), "got {:?}", err);
    assert!(!output.exists());
    assert!(
        started.elapsed() < Duration::from_secs(3),
        "took {:?}",
        started.elapsed()
    );
}
