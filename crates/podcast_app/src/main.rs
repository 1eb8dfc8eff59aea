mod app;
mod config;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use podcast_logging::{podcast_error, LogDestination};

use crate::app::RunOptions;
use crate::config::ClientConfig;

/// Submit a podcast episode for processing and download the results.
#[derive(Debug, Parser)]
#[command(name = "podcast-client", version)]
struct Cli {
    /// Episode URL (http or https).
    url: String,

    /// RON config file. Defaults to ./podcast_client.ron when present.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, env = "PODCAST_API_BASE")]
    api_base: Option<String>,

    #[arg(long, env = "PODCAST_POLL_MS")]
    poll_interval_ms: Option<u64>,

    /// Directory the markdown artifacts are written to.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Only follow the job, do not write any files.
    #[arg(long)]
    no_export: bool,

    /// Also write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poll_interval_ms = ms;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    podcast_logging::initialize(destination, cli.log_level());

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let options = RunOptions {
        url: cli.url,
        output_dir: config.output_dir.clone(),
        export: !cli.no_export,
    };

    match app::run(&config, options).await {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(err) => {
            podcast_error!("{:#}", err);
            Err(err)
        }
    }
}
