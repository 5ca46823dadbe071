mod platform;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use fieldmap_logging::{fieldmap_info, LogDestination};
use log::LevelFilter;

use platform::config::{AppConfig, CONFIG_FILENAME};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

/// Plot field sites on a map and track visits, notes and photos.
#[derive(Debug, Parser)]
#[command(name = "fieldmap", version, about)]
struct Cli {
    /// Site list (.csv, .xlsx, .xls) to upload when no work log exists yet.
    upload: Option<PathBuf>,

    /// Path to the RON config file.
    #[arg(long, default_value = CONFIG_FILENAME)]
    config: PathBuf,

    /// Override the data directory from the config.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    log: Option<LogTarget>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(target) = cli.log {
        config.log_destination = target.into();
    }
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config.level_filter()
    };

    fieldmap_logging::initialize(config.log_destination, level);
    fieldmap_info!("Starting fieldmap with data dir {:?}", config.data_dir);

    platform::run_app(config, cli.upload)
}
