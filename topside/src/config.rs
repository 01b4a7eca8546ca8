//! Console configuration: command line plus an optional `topside.toml`.

use anyhow::{Context, Result};
use clap::Parser;
use rovcore::storage::{config_dir, APP_NAME};
use rovcore::StreamIpPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "topside.toml";

#[derive(Parser, Debug)]
#[command(name = "topside", version, about = "ROV topside settings console")]
pub struct Args {
    /// Config file (defaults to topside.toml in the config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the preference store
    #[arg(long)]
    pub prefs_dir: Option<PathBuf>,
}

/// Settings read from `topside.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Whether submitting an empty stream address clears the saved one.
    pub stream_ip_policy: StreamIpPolicy,
    /// Where the preference store lives.
    pub prefs_dir: Option<PathBuf>,
    /// mediamtx config the camera settings can be applied to.
    pub mediamtx_config: Option<PathBuf>,
}

impl AppConfig {
    /// Load the config named on the command line, or the default file if it
    /// exists. An explicitly named file must exist.
    pub fn load(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = config_dir(APP_NAME).join(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        if let Some(dir) = &args.prefs_dir {
            config.prefs_dir = Some(dir.clone());
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn prefs_dir(&self) -> PathBuf {
        self.prefs_dir.clone().unwrap_or_else(|| config_dir(APP_NAME))
    }
}
