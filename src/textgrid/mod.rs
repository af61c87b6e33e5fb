/*!
 * Praat TextGrid support: data model, reader and writer.
 *
 * - `model`: `TextGrid`, the `Tier` enum and its entries
 * - `parser`: reads the long and short text layouts (UTF-8 or UTF-16)
 * - `writer`: renders the long or short layout
 */

pub mod model;
pub mod parser;
pub mod writer;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::TextGridError;

pub use model::{Interval, IntervalTier, Point, PointTier, TextGrid, Tier};

/// What to do when two tiers in one file share a name
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateNamesMode {
    /// Refuse the file
    Error,
    /// Append `_2`, `_3`, ... to later duplicates
    #[default]
    Rename,
}

/// Text layout written by `TextGrid::save`
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Praat's full layout with `key = value` lines
    #[default]
    Long,
    /// Bare values, one per line
    Short,
}

/// Options applied while reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Keep intervals whose label is empty or whitespace
    pub include_empty_intervals: bool,
    pub duplicate_names: DuplicateNamesMode,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            include_empty_intervals: false,
            duplicate_names: DuplicateNamesMode::Rename,
        }
    }
}

/// Options applied while writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub format: OutputFormat,
    /// Fill gaps in interval tiers with empty-label intervals
    pub include_blank_spaces: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Long,
            include_blank_spaces: true,
        }
    }
}

impl TextGrid {
    /// Read and parse a TextGrid file
    pub fn open<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Self, TextGridError> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes, options)
    }

    /// Parse raw file bytes, detecting UTF-16 from its byte order mark
    pub fn from_bytes(bytes: &[u8], options: &ReadOptions) -> Result<Self, TextGridError> {
        let content = parser::decode_text(bytes)?;
        parser::parse_textgrid(&content, options)
    }

    /// Parse TextGrid text in either layout
    pub fn parse(content: &str, options: &ReadOptions) -> Result<Self, TextGridError> {
        parser::parse_textgrid(content, options)
    }

    /// Render to text in the requested layout
    pub fn render(&self, options: &WriteOptions) -> String {
        writer::render(self, options)
    }

    /// Write to `path` as UTF-8, creating parent directories and replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P, options: &WriteOptions) -> Result<(), TextGridError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render(options))?;
        Ok(())
    }
}
