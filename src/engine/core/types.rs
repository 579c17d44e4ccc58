use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::placement::Placement;

/// One stream as reported by ffprobe's `-show_streams`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    #[serde(default)]
    pub index: i64,
    #[serde(default)]
    pub codec_name: String,
    #[serde(default)]
    pub codec_type: String,
}

/// Full probe result for one input. Only the first stream is consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    #[serde(default)]
    pub streams: Vec<StreamInfo>,
}

impl ContainerInfo {
    pub fn first_stream(&self) -> Option<&StreamInfo> {
        self.streams.first()
    }
}

/// Options fixed for the lifetime of a run
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    pub input_root: PathBuf,
    pub video_filter: Option<String>,
    pub placement: Placement,
    /// Trailing user arguments; when non-empty they replace codec-based selection.
    pub extra_encode_args: Vec<String>,
    pub encode_timeout: Option<Duration>,
}

impl ConversionOptions {
    pub fn new(input_root: impl Into<PathBuf>, placement: Placement) -> Self {
        Self {
            input_root: input_root.into(),
            video_filter: None,
            placement,
            extra_encode_args: Vec::new(),
            encode_timeout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The input is itself the output of an earlier rotation.
    RotationResult,
    /// The output for this input already exists.
    AlreadyConverted,
}

/// What happened to a single candidate file
#[derive(Debug)]
pub enum FileOutcome {
    Converted { output: PathBuf },
    Skipped(SkipReason),
    /// ffprobe did not recognize the file (or found no video stream).
    Unrecognized,
    Failed(Error),
}
