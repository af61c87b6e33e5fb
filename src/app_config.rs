use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::textgrid::{DuplicateNamesMode, OutputFormat, ReadOptions, WriteOptions};
use crate::tier_remapper::TierNameMap;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Root directory scanned for TextGrid files
    pub base_directory: PathBuf,

    /// Root directory the renamed files are written under
    pub output_directory: PathBuf,

    /// Zero-based tier position to new tier name
    #[serde(default = "default_tier_index_mapping")]
    pub tier_index_mapping: TierNameMap,

    /// TextGrid read/write settings
    #[serde(default)]
    pub textgrid: TextGridConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// TextGrid codec settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TextGridConfig {
    // @field: Keep empty intervals when reading
    #[serde(default)]
    pub include_empty_intervals: bool,

    // @field: Duplicate tier name handling when reading
    #[serde(default)]
    pub duplicate_names_mode: DuplicateNamesMode,

    // @field: Layout written
    #[serde(default)]
    pub output_format: OutputFormat,

    // @field: Fill interval gaps with empty intervals when writing
    #[serde(default = "default_true")]
    pub include_blank_spaces: bool,
}

impl TextGridConfig {
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            include_empty_intervals: self.include_empty_intervals,
            duplicate_names: self.duplicate_names_mode,
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            format: self.output_format,
            include_blank_spaces: self.include_blank_spaces,
        }
    }
}

impl Default for TextGridConfig {
    fn default() -> Self {
        Self {
            include_empty_intervals: false,
            duplicate_names_mode: DuplicateNamesMode::Rename,
            output_format: OutputFormat::Long,
            include_blank_spaces: default_true(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_true() -> bool {
    true
}

fn default_base_directory() -> PathBuf {
    PathBuf::from("textgrids")
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("textgrids_renamed")
}

fn default_tier_index_mapping() -> TierNameMap {
    [
        (0, "sentence"),
        (1, "words"),
        (2, "syllables"),
        (3, "phonemes"),
        (4, "interesting"),
    ]
    .into_iter()
    .map(|(i, name)| (i, name.to_string()))
    .collect()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_directory.as_os_str().is_empty() {
            return Err(ConfigError::Missing("base_directory".to_string()));
        }
        if self.output_directory.as_os_str().is_empty() {
            return Err(ConfigError::Missing("output_directory".to_string()));
        }
        if self.base_directory == self.output_directory {
            return Err(ConfigError::Invalid(format!(
                "output_directory must differ from base_directory ({:?})",
                self.base_directory
            )));
        }
        if !self.base_directory.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "base_directory does not exist or is not a directory: {:?}",
                self.base_directory
            )));
        }

        for (index, name) in &self.tier_index_mapping {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "tier_index_mapping entry {} has a blank name",
                    index
                )));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            base_directory: default_base_directory(),
            output_directory: default_output_directory(),
            tier_index_mapping: default_tier_index_mapping(),
            textgrid: TextGridConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
