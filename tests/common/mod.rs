#![allow(dead_code)]

#[cfg(unix)]
pub mod fake_tools;

use std::fs;
use std::path::{Path, PathBuf};

/// Create `names` as small files under `dir`
pub fn touch_all(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, b"source").unwrap();
            path
        })
        .collect()
}

/// Arguments the fake ffmpeg recorded into its output file, one per line
pub fn recorded_args(output: &Path) -> Vec<String> {
    fs::read_to_string(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
