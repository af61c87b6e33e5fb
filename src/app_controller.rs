use anyhow::{Result, Context, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, debug};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::{FileManager, TEXTGRID_SUFFIX};
use crate::textgrid::TextGrid;
use crate::tier_remapper::remap_tiers;

// @module: Application controller for batch tier renaming

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// TextGrid files rewritten
    pub processed: usize,
    /// Other files seen and ignored
    pub skipped: usize,
    /// Where the files were written
    pub output_directory: PathBuf,
}

/// Main application controller for tier renaming
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()
            .context("Configuration validation failed")?;

        Ok(Self { config })
    }

    /// Rename tiers in every TextGrid under the base directory.
    ///
    /// Stops at the first file that cannot be read, parsed or written.
    pub fn run(&self) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();
        let base_dir = &self.config.base_directory;
        let output_dir = &self.config.output_directory;

        if !FileManager::dir_exists(base_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", base_dir));
        }

        FileManager::ensure_dir(output_dir)?;

        let mut scan = FileManager::scan_files(base_dir, TEXTGRID_SUFFIX)?;
        // An output tree nested in the base directory holds earlier results
        let mut candidates = Vec::with_capacity(scan.matches.len());
        for path in scan.matches {
            if !FileManager::is_within(&path, output_dir)? {
                candidates.push(path);
            }
        }
        scan.matches = candidates;
        info!("Found {} TextGrid file(s) in {:?}", scan.matches.len(), base_dir);
        debug!("Ignoring {} other file(s)", scan.skipped);

        let progress = ProgressBar::new(scan.matches.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style.progress_chars("█▓▒░"));

        let mut processed = 0;
        for input_file in &scan.matches {
            let file_name = input_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress.set_message(format!("Processing: {}", file_name));

            let output_path = self.process_file(input_file)?;
            debug!("Wrote {:?}", output_path);

            processed += 1;
            progress.inc(1);
        }

        progress.finish_and_clear();

        info!(
            "Renamed tiers in {} file(s), ignored {} other file(s) in {:.2}s",
            processed,
            scan.skipped,
            start_time.elapsed().as_secs_f64()
        );

        Ok(RunSummary {
            processed,
            skipped: scan.skipped,
            output_directory: output_dir.clone(),
        })
    }

    /// Read one TextGrid, rename its tiers, and write it to the mirrored
    /// location. Returns the output path.
    pub fn process_file(&self, input_file: &Path) -> Result<PathBuf> {
        let output_path = FileManager::mirror_output_path(
            input_file,
            &self.config.base_directory,
            &self.config.output_directory,
        )?;

        if let Some(parent) = output_path.parent() {
            FileManager::ensure_dir(parent)?;
        }

        info!("Processing {:?}", input_file);

        let source = TextGrid::open(input_file, &self.config.textgrid.read_options())
            .with_context(|| format!("Failed to read TextGrid: {:?}", input_file))?;

        let renamed = remap_tiers(&source, &self.config.tier_index_mapping);

        renamed.save(&output_path, &self.config.textgrid.write_options())
            .with_context(|| format!("Failed to write TextGrid: {:?}", output_path))?;

        Ok(output_path)
    }
}
