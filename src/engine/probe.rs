// Input probing using ffprobe

use super::core::ContainerInfo;
use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Arguments placed before the input path: video streams only, quiet, JSON
pub const PROBE_ARGS: [&str; 7] = [
    "-loglevel",
    "quiet",
    "-show_streams",
    "-select_streams",
    "v",
    "-print_format",
    "json",
];

/// Probe `input` with ffprobe and return its video streams.
///
/// Any failure (tool not startable, non-zero exit, unparsable output) means the file is
/// not a media file we can handle.
pub fn probe(probe_binary: &Path, input: &Path) -> Result<ContainerInfo> {
    let output = Command::new(probe_binary)
        .args(PROBE_ARGS)
        .arg(input)
        .output()
        .map_err(|e| Error::probe_failure(input, format!("failed to run ffprobe: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = match stderr.trim() {
            "" => format!("ffprobe exited with {}", output.status),
            detail => format!("ffprobe exited with {}: {}", output.status, detail),
        };
        return Err(Error::probe_failure(input, message));
    }

    let json_str = String::from_utf8_lossy(&output.stdout);
    let container = parse_probe_output(&json_str).map_err(|e| Error::probe_failure(input, e))?;
    debug!(path = %input.display(), ?container, "probed");
    Ok(container)
}

/// Parse ffprobe's `-print_format json -show_streams` output
pub fn parse_probe_output(json: &str) -> Result<ContainerInfo, String> {
    serde_json::from_str(json).map_err(|e| format!("failed to parse ffprobe JSON: {}", e))
}
