use super::types::ContainerInfo;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Key used when the probed codec has no entry of its own
pub const DEFAULT_CODEC_KEY: &str = "default";

/// Codec name -> encoder arguments. Always contains a `"default"` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecArgumentTable {
    entries: BTreeMap<String, Vec<String>>,
}

fn x264_fast() -> Vec<String> {
    ["-c:v", "libx264", "-preset", "ultrafast", "-crf", "30"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for CodecArgumentTable {
    fn default() -> Self {
        let entries = BTreeMap::from([
            ("h264".to_string(), x264_fast()),
            (DEFAULT_CODEC_KEY.to_string(), x264_fast()),
        ]);
        Self { entries }
    }
}

impl CodecArgumentTable {
    pub fn new(entries: BTreeMap<String, Vec<String>>) -> Result<Self> {
        if !entries.contains_key(DEFAULT_CODEC_KEY) {
            return Err(Error::Config(format!(
                "codec table has no \"{}\" entry",
                DEFAULT_CODEC_KEY
            )));
        }
        Ok(Self { entries })
    }

    /// Built-in table with `overrides` layered on top
    pub fn with_overrides(overrides: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut entries = Self::default().entries;
        entries.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self::new(entries)
    }

    pub fn lookup(&self, codec: &str) -> &[String] {
        self.entries
            .get(codec)
            .or_else(|| self.entries.get(DEFAULT_CODEC_KEY))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn codecs(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Pick encoder arguments for `input`.
///
/// Non-empty `user_override` wins outright and the streams are not inspected.
/// Otherwise the first stream's codec selects the table entry; a container with no
/// streams is a probe failure.
pub fn select_args(
    input: &Path,
    container: &ContainerInfo,
    user_override: &[String],
    table: &CodecArgumentTable,
) -> Result<Vec<String>> {
    if !user_override.is_empty() {
        return Ok(user_override.to_vec());
    }

    let stream = container
        .first_stream()
        .ok_or_else(|| Error::probe_failure(input, "no video stream found"))?;

    Ok(table.lookup(&stream.codec_name).to_vec())
}
