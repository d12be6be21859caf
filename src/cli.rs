use clap::Parser;
use std::{env, path::PathBuf};

use crate::{
    config::{default_config_path, Config, FileConfig, Inputs},
    error::FeedError,
};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "yweather",
    version,
    about = "Openbox pipe menu with the current weather and forecast"
)]
pub struct Cli {
    /// Zip code or location name.
    pub location: Option<String>,

    /// "imperial" or "metric".
    pub units: Option<String>,

    /// Feed format: "json" (smaller download) or "xml".
    pub format: Option<String>,

    /// YAML config file; defaults to $XDG_CONFIG_HOME/yweather/config.yaml.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolve the final configuration, reading the config file if any.
    pub fn into_config(self) -> Result<Config, FeedError> {
        let file = match self.config.or_else(default_config_path) {
            Some(path) => FileConfig::load(&path).map_err(FeedError::Config)?,
            None => FileConfig::default(),
        };
        let inputs = Inputs {
            location: self.location,
            units: self.units,
            format: self.format,
        };
        Config::resolve(inputs, file, env::var("YWEATHER_URL").ok())
    }
}
