// Error taxonomy for the conversion pipeline

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required external tool could not be found on PATH or in the fallback directories.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("cannot read input root {}: {source}", path.display())]
    RootPathUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The probe tool did not recognize the file as media.
    #[error("probe failed for {}: {message}", path.display())]
    ProbeFailure { path: PathBuf, message: String },

    #[error("cannot create output directory {}: {source}", path.display())]
    DirectoryCreateFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start {}: {source}", program.display())]
    SpawnFailure {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The encoder ran but did not finish cleanly (non-zero exit or timeout).
    #[error("encode of {} failed: {reason}", input.display())]
    RuntimeFailure { input: PathBuf, reason: String },

    #[error("cannot stat {}: {source}", path.display())]
    StatFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    pub fn probe_failure(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ProbeFailure {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Fatal errors abort the whole run; everything else only costs the current file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ToolNotFound { .. }
                | Self::RootPathUnreadable { .. }
                | Self::StatFailure { .. }
                | Self::Config(_)
        )
    }
}
