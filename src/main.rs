// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use tgrename::app_config::{self, Config};
use tgrename::app_controller::Controller;
use tgrename::tier_remapper::TierNameMap;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

/// Parse `INDEX=NAME` into a mapping entry
fn parse_mapping(value: &str) -> Result<(i64, String), String> {
    let (index, name) = value
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=NAME, got '{}'", value))?;
    let index = index
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid tier index '{}': {}", index, e))?;
    Ok((index, name.to_string()))
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rename tiers in every TextGrid under the base directory (default command)
    Rename(RenameArgs),

    /// Generate shell completions for tgrename
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct RenameArgs {
    /// Directory scanned for .TextGrid files (overrides base_directory)
    #[arg(short, long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Directory the renamed files are written to (overrides output_directory)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Tier name override as INDEX=NAME; repeat to build the whole table
    #[arg(short, long = "map", value_name = "INDEX=NAME", value_parser = parse_mapping)]
    mappings: Vec<(i64, String)>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// tgrename - rename Praat TextGrid tiers by position
#[derive(Parser, Debug)]
#[command(name = "tgrename")]
#[command(version)]
#[command(about = "Batch-rename tiers in Praat TextGrid files")]
#[command(long_about = "tgrename walks a directory of speaker folders, renames the tiers of every .TextGrid file by position, and writes the results to a mirrored output directory.

EXAMPLES:
    tgrename                                      # Use settings from conf.json
    tgrename -b corpus -o corpus_renamed          # Override directories
    tgrename -m 0=sentence -m 1=words             # Override the tier name table
    tgrename --log-level debug                    # Show per-tier naming decisions
    tgrename completions bash > tgrename.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    rename: RenameArgs,
}

// @struct: Custom logger implementation, filtered by log::max_level()
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tgrename", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Rename(args)) => run_rename(args),
        None => run_rename(cli.rename),
    }
}

fn load_config(options: &RenameArgs) -> Result<Config> {
    let config_path = Path::new(&options.config_path);

    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", options.config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    // Override config with CLI options if provided
    if let Some(base_dir) = &options.base_dir {
        config.base_directory = base_dir.clone();
    }
    if let Some(output_dir) = &options.output_dir {
        config.output_directory = output_dir.clone();
    }
    if !options.mappings.is_empty() {
        config.tier_index_mapping = options.mappings.iter().cloned().collect::<TierNameMap>();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

fn run_rename(options: RenameArgs) -> Result<()> {
    // If log level is set via command line, apply it before anything is logged
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = load_config(&options)?;
    log::set_max_level(level_filter(&config.log_level));

    let controller = Controller::with_config(config)
        .context("Failed to start tier renaming")?;

    let summary = controller.run()?;
    info!("{} file(s) written", summary.processed);

    println!(
        "Tier renaming completed. Updated files saved to: {}",
        summary.output_directory.display()
    );

    Ok(())
}
