use super::types::SkipReason;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Literal used both as filename suffix and as output directory name
pub const ROTATION_MARKER: &str = "rotated";

/// Where rotated output is written relative to its source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Beside the source: `<stem>-rotated.<ext>`
    #[default]
    Here,
    /// In a sibling directory: `<parent>/rotated/<name>`
    #[serde(rename = "dir")]
    #[value(name = "dir")]
    InDirectory,
}

/// Destination for one input, and whether it should be left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    pub output: PathBuf,
    pub skip: Option<SkipReason>,
}

impl Placement {
    /// Compute the output path without touching the filesystem
    pub fn output_path(&self, input: &Path) -> PathBuf {
        match self {
            Placement::Here => here_output_path(input),
            Placement::InDirectory => {
                let name = input.file_name().unwrap_or(input.as_os_str());
                marker_dir(input).join(name)
            }
        }
    }

    /// Decide where `input` goes and whether it was already handled.
    ///
    /// Nothing is created here; see [`Placement::prepare`]. A stat error other than
    /// "not found" on the candidate output is fatal.
    pub fn derive(&self, input: &Path) -> Result<Derived> {
        let output = self.output_path(input);

        match self {
            Placement::Here => {
                if output == input {
                    info!(path = %input.display(), "file is a rotation result, skipping");
                    return Ok(Derived {
                        output,
                        skip: Some(SkipReason::RotationResult),
                    });
                }
            }
            Placement::InDirectory => {
                let dir = marker_dir(input);
                if fs::metadata(&dir).is_ok_and(|meta| !meta.is_dir()) {
                    return Err(Error::DirectoryCreateFailure {
                        path: dir,
                        source: io::Error::new(ErrorKind::AlreadyExists, "not a directory"),
                    });
                }
            }
        }

        match fs::metadata(&output) {
            Ok(_) => {
                info!(
                    path = %input.display(),
                    output = %output.display(),
                    "file is already rotated, skipping"
                );
                Ok(Derived {
                    output,
                    skip: Some(SkipReason::AlreadyConverted),
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Derived { output, skip: None }),
            Err(source) => Err(Error::StatFailure {
                path: output,
                source,
            }),
        }
    }

    /// Make the output location for `input` writable. Called right before encoding,
    /// so runs over non-media files leave no empty marker directory behind.
    pub fn prepare(&self, input: &Path) -> Result<()> {
        match self {
            Placement::Here => Ok(()),
            Placement::InDirectory => ensure_dir(&marker_dir(input)),
        }
    }
}

fn marker_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(ROTATION_MARKER)
}

#[cfg(unix)]
fn strip_marker<'a>(stem: &'a OsStr, suffix: &str) -> &'a OsStr {
    use std::os::unix::ffi::OsStrExt;

    let bytes = stem.as_bytes();
    OsStr::from_bytes(bytes.strip_suffix(suffix.as_bytes()).unwrap_or(bytes))
}

#[cfg(not(unix))]
fn strip_marker<'a>(stem: &'a OsStr, suffix: &str) -> &'a OsStr {
    stem.to_str()
        .and_then(|s| s.strip_suffix(suffix))
        .map(OsStr::new)
        .unwrap_or(stem)
}

// `clip.mp4` and `clip-rotated.mp4` both map to `clip-rotated.mp4`
fn here_output_path(input: &Path) -> PathBuf {
    let suffix = format!("-{}", ROTATION_MARKER);
    let stem = input.file_stem().unwrap_or_default();

    let mut name = strip_marker(stem, &suffix).to_os_string();
    name.push(&suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }

    input.with_file_name(name)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => {
            debug!(dir = %dir.display(), "created output directory");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(Error::DirectoryCreateFailure {
            path: dir.to_path_buf(),
            source,
        }),
    }
}
