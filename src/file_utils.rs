use anyhow::{Result, Context, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// File name suffix of annotation files (case-sensitive)
pub const TEXTGRID_SUFFIX: &str = ".TextGrid";

/// Files found under a directory, split by whether they matched
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Matching files in walk order
    pub matches: Vec<PathBuf>,
    /// Number of files that did not match
    pub skipped: usize,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed, no-op when present
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {:?}", path))
    }

    /// Whether the file name ends with `suffix`, compared exactly
    pub fn has_suffix<P: AsRef<Path>>(path: P, suffix: &str) -> bool {
        path.as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(suffix))
            .unwrap_or(false)
    }

    /// Walk `dir` recursively and collect files whose name ends with `suffix`.
    /// Directories are not counted as skipped.
    pub fn scan_files<P: AsRef<Path>>(dir: P, suffix: &str) -> Result<ScanResult> {
        let mut result = ScanResult::default();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            if !entry.file_type().is_file() {
                continue;
            }

            if Self::has_suffix(entry.path(), suffix) {
                result.matches.push(entry.into_path());
            } else {
                result.skipped += 1;
            }
        }

        Ok(result)
    }

    /// Whether `path` lies under `root` once both are resolved to absolute,
    /// symlink-free form. Both must exist.
    pub fn is_within<P1: AsRef<Path>, P2: AsRef<Path>>(path: P1, root: P2) -> Result<bool> {
        let path = fs::canonicalize(path.as_ref())
            .with_context(|| format!("Failed to resolve path: {:?}", path.as_ref()))?;
        let root = fs::canonicalize(root.as_ref())
            .with_context(|| format!("Failed to resolve path: {:?}", root.as_ref()))?;
        Ok(path.starts_with(root))
    }

    // @generates: Path of `input_file` re-rooted from `base_dir` onto `output_dir`
    pub fn mirror_output_path<P1: AsRef<Path>, P2: AsRef<Path>, P3: AsRef<Path>>(
        input_file: P1,
        base_dir: P2,
        output_dir: P3,
    ) -> Result<PathBuf> {
        let input_file = input_file.as_ref();
        let base_dir = base_dir.as_ref();

        let relative = input_file.strip_prefix(base_dir).map_err(|_| {
            anyhow!("File {:?} is not inside base directory {:?}", input_file, base_dir)
        })?;

        Ok(output_dir.as_ref().join(relative))
    }
}
