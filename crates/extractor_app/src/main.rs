mod shell;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use extractor_logging::{extractor_info, extractor_warn};

use shell::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let loaded = shell::config::load(cli.config.as_deref())?;
    let mut config = loaded.config;
    config.apply_cli(&cli);

    extractor_logging::initialize(config.log_destination, config.level_filter());
    if let Some(warning) = &loaded.warning {
        extractor_warn!("{}", warning);
    }
    if let Some(origin) = &loaded.origin {
        extractor_info!("Loaded config from {:?}", origin);
    }

    let clean = shell::app::run(cli, config).await?;
    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
