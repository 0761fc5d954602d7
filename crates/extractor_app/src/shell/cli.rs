use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use extractor_logging::LogDestination;

#[derive(Debug, Parser, Clone, Default)]
#[command(
    name = "pdf-extractor",
    version,
    about = "Submit batches of PDFs to the extraction service and fetch the spreadsheet"
)]
pub struct Cli {
    /// Base URL of the extraction service
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory the downloaded spreadsheet is saved into
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (RON). Defaults to ./pdf_extractor.ron when present
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Give up on a request after this many seconds (waits forever by default)
    #[arg(long, value_name = "SECS")]
    pub request_timeout: Option<u64>,

    /// Give up connecting after this many seconds (waits forever by default)
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Where log output goes
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Submit FILES, wait for the result and exit instead of starting the shell
    #[arg(long)]
    pub run: bool,

    /// With --run: download the spreadsheet after a successful submission
    #[arg(long, requires = "run")]
    pub download: bool,

    /// Files to select at startup
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_shot_invocation() {
        let cli = Cli::try_parse_from([
            "pdf-extractor",
            "--run",
            "--download",
            "--base-url",
            "http://host:8080",
            "a.pdf",
            "b.pdf",
        ])
        .unwrap();
        assert!(cli.run);
        assert!(cli.download);
        assert_eq!(cli.base_url.as_deref(), Some("http://host:8080"));
        assert_eq!(cli.files, vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]);
    }

    #[test]
    fn download_requires_run() {
        assert!(Cli::try_parse_from(["pdf-extractor", "--download"]).is_err());
    }

    #[test]
    fn log_target_maps_to_destination() {
        let cli = Cli::try_parse_from(["pdf-extractor", "--log", "both"]).unwrap();
        assert_eq!(cli.log.map(LogDestination::from), Some(LogDestination::Both));
    }
}
