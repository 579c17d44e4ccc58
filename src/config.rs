// Configuration file management

use crate::engine::{CodecArgumentTable, Placement};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    /// Extra or replacement codec entries, layered over the built-in table
    #[serde(default)]
    pub codecs: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Where rotated files go when `--rotate` is not given
    #[serde(default)]
    pub placement: Placement,

    /// Video filter applied when `--vf` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_filter: Option<String>,

    /// Kill an encode that runs longer than this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encode_timeout_secs: Option<u64>,
}

/// Explicit tool locations; unset means search PATH, `.` and `./bin`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffprobe: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffmpeg: Option<PathBuf>,
}

impl Config {
    /// Get the path to the default config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("vidrotate");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location; built-in defaults if there is no file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; built-in defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// A config with the built-in codec table spelled out, for `--init-config`
    pub fn with_builtin_codecs() -> Self {
        let table = CodecArgumentTable::default();
        let codecs = table
            .codecs()
            .map(|codec| (codec.to_string(), table.lookup(codec).to_vec()))
            .collect();

        Config {
            codecs,
            ..Config::default()
        }
    }

    pub fn codec_table(&self) -> Result<CodecArgumentTable> {
        CodecArgumentTable::with_overrides(&self.codecs).context("Invalid [codecs] section")
    }
}
