// Drives one run: walk, derive, probe, select, encode. One file at a time.

use super::core::{
    CodecArgumentTable, ConversionOptions, FileOutcome, ToolPaths, convert, scan_streaming,
    select_args,
};
use super::probe::probe;
use crate::error::{Error, Result};
use crate::stats::RunStats;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Everything a run needs, borrowed from startup
pub struct Converter<'a> {
    tools: &'a ToolPaths,
    options: &'a ConversionOptions,
    codecs: &'a CodecArgumentTable,
}

impl<'a> Converter<'a> {
    pub fn new(
        tools: &'a ToolPaths,
        options: &'a ConversionOptions,
        codecs: &'a CodecArgumentTable,
    ) -> Self {
        Self {
            tools,
            options,
            codecs,
        }
    }

    /// Convert everything under the configured root.
    ///
    /// Only fatal errors are returned; per-file failures are logged and tallied.
    pub fn run(&self) -> Result<RunStats> {
        let root = &self.options.input_root;
        let meta = fs::metadata(root).map_err(|source| Error::RootPathUnreadable {
            path: root.clone(),
            source,
        })?;

        let mut stats = RunStats::new();
        if meta.is_dir() {
            info!(root = %root.display(), "rotating all files in directory");
            scan_streaming(root, |path| {
                let outcome = self.process_file(&path)?;
                stats.record(&outcome);
                Ok(())
            })?;
        } else {
            info!(path = %root.display(), "rotating single file");
            let outcome = self.process_file(root)?;
            stats.record(&outcome);
        }

        Ok(stats)
    }

    /// Handle one candidate. `Err` only for errors that must abort the run.
    pub fn process_file(&self, input: &Path) -> Result<FileOutcome> {
        match self.try_process_file(input) {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.is_fatal() => Err(e),
            Err(e @ Error::ProbeFailure { .. }) => {
                warn!(path = %input.display(), error = %e, "not a recognized video, skipping");
                Ok(FileOutcome::Unrecognized)
            }
            Err(e) => {
                error!(path = %input.display(), error = %e, "conversion failed, skipping");
                Ok(FileOutcome::Failed(e))
            }
        }
    }

    fn try_process_file(&self, input: &Path) -> Result<FileOutcome> {
        let derived = self.options.placement.derive(input)?;
        if let Some(reason) = derived.skip {
            return Ok(FileOutcome::Skipped(reason));
        }

        let container = probe(&self.tools.probe, input)?;
        let args = select_args(
            input,
            &container,
            &self.options.extra_encode_args,
            self.codecs,
        )?;

        self.options.placement.prepare(input)?;
        convert(
            &self.tools.encode,
            input,
            &derived.output,
            self.options.video_filter.as_deref(),
            &args,
            self.options.encode_timeout,
        )?;

        info!(output = %derived.output.display(), "converted");
        Ok(FileOutcome::Converted {
            output: derived.output,
        })
    }
}
