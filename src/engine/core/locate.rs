use crate::config::ToolsConfig;
use crate::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROBE_TOOL: &str = "ffprobe";
pub const ENCODE_TOOL: &str = "ffmpeg";

/// Absolute paths to the two external tools, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub probe: PathBuf,
    pub encode: PathBuf,
}

impl ToolPaths {
    /// Resolve ffprobe and ffmpeg, honoring explicit paths from the config file
    pub fn resolve(tools: &ToolsConfig) -> Result<Self> {
        let probe = resolve_with_override(PROBE_TOOL, tools.ffprobe.as_deref())?;
        let encode = resolve_with_override(ENCODE_TOOL, tools.ffmpeg.as_deref())?;
        Ok(Self { probe, encode })
    }
}

fn resolve_with_override(name: &str, configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if is_executable(path) {
            return Ok(path.to_path_buf());
        }
        debug!(
            tool = name,
            path = %path.display(),
            "configured tool path is not executable, falling back to search"
        );
    }
    locate(name)
}

/// Find an executable by name: PATH first, then `.` and `./bin`
pub fn locate(name: &str) -> Result<PathBuf> {
    if let Ok(path) = which::which(name) {
        debug!(tool = name, path = %path.display(), "found on PATH");
        return Ok(path);
    }

    let Ok(cwd) = env::current_dir() else {
        return Err(Error::tool_not_found(name));
    };
    let bin = cwd.join("bin");
    locate_in(name, &[cwd, bin])
}

/// Try each directory in order; first executable match wins
pub fn locate_in(name: &str, dirs: &[PathBuf]) -> Result<PathBuf> {
    let file_name = format!("{}{}", name, env::consts::EXE_SUFFIX);
    dirs.iter()
        .map(|dir| dir.join(&file_name))
        .find(|candidate| is_executable(candidate))
        .inspect(|path| debug!(tool = name, path = %path.display(), "found in fallback directory"))
        .ok_or_else(|| Error::tool_not_found(name))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

// Executability on Windows comes from the extension, so existence is enough.
#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
