// Shell-script stand-ins for ffprobe and ffmpeg

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vidrotate::engine::ToolPaths;

/// Reports h264 for .mp4/.mkv, vp9 for .webm, no streams for .wav, fails otherwise
pub const FFPROBE: &str = r#"#!/bin/sh
for last; do :; done
case "$last" in
  *.mp4|*.mkv) printf '{"streams":[{"index":0,"codec_name":"h264","codec_type":"video"}]}\n' ;;
  *.webm) printf '{"streams":[{"index":0,"codec_name":"vp9","codec_type":"video"}]}\n' ;;
  *.wav) printf '{}\n' ;;
  *) exit 1 ;;
esac
"#;

/// Same answers as FFPROBE, with log chatter on stderr
pub const FFPROBE_NOISY: &str = r#"#!/bin/sh
for last; do :; done
echo "[mov,mp4] stream 0: unusual timebase" >&2
case "$last" in
  *.mp4|*.mkv) printf '{"streams":[{"index":0,"codec_name":"h264","codec_type":"video"}]}\n' ;;
  *) exit 1 ;;
esac
"#;

/// Writes its arguments, one per line, into the output file (the last argument)
pub const FFMPEG_OK: &str = r#"#!/bin/sh
for last; do :; done
echo "fake ffmpeg encoding"
echo "frame=1 fps=0.0" >&2
printf '%s\n' "$@" > "$last"
"#;

/// Like FFMPEG_OK, but leaves a partial file and fails for outputs containing "bad"
pub const FFMPEG_FAILS_ON_BAD: &str = r#"#!/bin/sh
for last; do :; done
case "$last" in
  *bad*) echo partial > "$last"; echo "conversion failed" >&2; exit 1 ;;
esac
printf '%s\n' "$@" > "$last"
"#;

/// Leaves a partial file and never finishes
pub const FFMPEG_HANGS: &str = r#"#!/bin/sh
for last; do :; done
echo partial > "$last"
exec sleep 30
"#;

pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A temp dir holding a fake ffprobe and the given ffmpeg script
pub struct FakeTools {
    _dir: TempDir,
    pub tools: ToolPaths,
}

impl FakeTools {
    pub fn new(ffmpeg_body: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let probe = write_script(dir.path(), "ffprobe", FFPROBE);
        let encode = write_script(dir.path(), "ffmpeg", ffmpeg_body);
        Self {
            _dir: dir,
            tools: ToolPaths { probe, encode },
        }
    }
}
