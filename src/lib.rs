/*!
 * # tgrename - batch tier renaming for Praat TextGrids
 *
 * Walks a directory tree of per-speaker folders, reads every `.TextGrid`
 * file, renames its tiers by position, and writes the result to a mirrored
 * output tree.
 *
 * ## Features
 *
 * - Position-indexed tier name overrides
 * - Fallback `tier_<n>` names for blank tiers
 * - Reads Praat's long and short text layouts, UTF-8 or UTF-16
 * - Writes the long (default) or short layout, optionally filling gaps
 *   between intervals with blank intervals
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management
 * - `textgrid`: TextGrid model, reader and writer
 * - `tier_remapper`: Position-based renaming of tiers
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod textgrid;
pub mod tier_remapper;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use textgrid::{TextGrid, Tier, IntervalTier, PointTier, Interval, Point};
pub use tier_remapper::{remap_tiers, resolve_tier_name, TierNameMap};
pub use errors::{ConfigError, TextGridError};
