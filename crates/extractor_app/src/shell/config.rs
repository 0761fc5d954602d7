use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use extractor_engine::ServiceSettings;
use extractor_logging::LogDestination;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use super::cli::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "pdf_extractor.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: ServiceSettings::default().base_url,
            output_dir: PathBuf::from("."),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Command-line flags win over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(output_dir) = &cli.output_dir {
            self.output_dir = output_dir.clone();
        }
        if cli.connect_timeout.is_some() {
            self.connect_timeout_secs = cli.connect_timeout;
        }
        if cli.request_timeout.is_some() {
            self.request_timeout_secs = cli.request_timeout;
        }
        if let Some(target) = cli.log {
            self.log_destination = target.into();
        }
        if cli.verbose {
            self.log_level = "debug".to_string();
        }
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            base_url: self.base_url.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        extractor_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

/// Result of looking for a configuration file.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: ClientConfig,
    pub origin: Option<PathBuf>,
    /// Problem with the default file, to be logged once logging is up.
    pub warning: Option<String>,
}

/// Loads `explicit` if given (failures are errors), otherwise the default
/// file in the working directory (failures fall back to defaults).
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = ron::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        return Ok(LoadedConfig {
            config,
            origin: Some(path.to_path_buf()),
            warning: None,
        });
    }

    Ok(load_default(Path::new(DEFAULT_CONFIG_FILE)))
}

fn load_default(path: &Path) -> LoadedConfig {
    let fallback = |warning: Option<String>| LoadedConfig {
        config: ClientConfig::default(),
        origin: None,
        warning,
    };

    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return fallback(None),
        Err(err) => {
            return fallback(Some(format!(
                "Failed to read config from {:?}: {}",
                path, err
            )))
        }
    };

    match ron::from_str(&content) {
        Ok(config) => LoadedConfig {
            config,
            origin: Some(path.to_path_buf()),
            warning: None,
        },
        Err(err) => fallback(Some(format!(
            "Failed to parse config from {:?}: {}",
            path, err
        ))),
    }
}
