//! Runtime configuration.
//!
//! A [`Config`] is resolved once per run from, in order of precedence, the
//! positional arguments, an optional YAML file, the `YWEATHER_URL`
//! environment variable and the compiled-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use crate::error::FeedError;

pub const DEFAULT_LOCATION: &str = "New York, NY";
pub const DEFAULT_UNITS: &str = "imperial";
pub const DEFAULT_FORMAT: &str = "json";

/// Cached responses are served for 6 hours.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Yahoo YQL forecast query. `{location}` and `{format}` are substituted
/// before the request is sent.
pub const DEFAULT_URL_TEMPLATE: &str = "https://query.yahooapis.com/v1/public/yql?q=select%20*%20from%20weather.forecast%20where%20woeid%20in%20(select%20woeid%20from%20geo.places(1)%20where%20text%3D%22{location}%22)&format={format}&u=c&env=store%3A%2F%2Fdatatables.org%2Falltableswithkeys";

/// Unit system the menu is rendered in. Feeds report imperial values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    Imperial,
    Metric,
}

impl UnitSystem {
    /// Anything other than `imperial` (case-insensitive) is treated as metric.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("imperial") {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }
}

/// Wire format of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    /// JSON, the smaller download.
    Compact,
    /// XML (RSS with the Yahoo weather namespace).
    Verbose,
}

impl ResponseFormat {
    /// Literal sent in the `format` query parameter and used in cache names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Compact => "json",
            ResponseFormat::Verbose => "xml",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = FeedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "json" | "compact" => Ok(ResponseFormat::Compact),
            "xml" | "verbose" => Ok(ResponseFormat::Verbose),
            _ => Err(FeedError::UnsupportedFormat(value.to_lowercase())),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub location: String,
    pub units: UnitSystem,
    pub format: ResponseFormat,
    pub cache_ttl: Duration,
    pub url_template: String,
    /// Overrides the XDG/home cache directory lookup.
    pub cache_dir: Option<PathBuf>,
    /// Emit the location/publication header above the title.
    pub header: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            units: UnitSystem::Imperial,
            format: ResponseFormat::Compact,
            cache_ttl: DEFAULT_CACHE_TTL,
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            cache_dir: None,
            header: false,
        }
    }
}

/// Optional settings read from `config.yaml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub location: Option<String>,
    pub units: Option<String>,
    pub format: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    pub url: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub header: Option<bool>,
}

impl FileConfig {
    /// Read and parse a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Default config file location, if one exists on disk.
pub fn default_config_path() -> Option<PathBuf> {
    let dir = match env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(env::var_os("HOME")?).join(".config"),
    };
    let path = dir.join("yweather").join("config.yaml");
    path.is_file().then_some(path)
}

/// Inputs taken from the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub location: Option<String>,
    pub units: Option<String>,
    pub format: Option<String>,
}

impl Config {
    /// Merge command-line inputs over the file config and defaults.
    ///
    /// `url_env` is the value of `YWEATHER_URL`, passed in so resolution
    /// stays independent of the process environment.
    pub fn resolve(
        inputs: Inputs,
        file: FileConfig,
        url_env: Option<String>,
    ) -> Result<Self, FeedError> {
        let defaults = Config::default();

        let location = inputs
            .location
            .or(file.location)
            .unwrap_or(defaults.location);
        let units = inputs
            .units
            .or(file.units)
            .map(|u| UnitSystem::from_name(&u))
            .unwrap_or(defaults.units);
        let format = match inputs.format.or(file.format) {
            Some(name) => name.parse()?,
            None => defaults.format,
        };
        let cache_ttl = file
            .cache_ttl_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);
        let url_template = file
            .url
            .or(url_env.filter(|u| !u.is_empty()))
            .unwrap_or(defaults.url_template);

        Ok(Config {
            location,
            units,
            format,
            cache_ttl,
            url_template,
            cache_dir: file.cache_dir,
            header: file.header.unwrap_or(defaults.header),
        })
    }

    /// Request URL with the location and format substituted.
    pub fn request_url(&self) -> String {
        self.url_template
            .replace("{format}", self.format.as_str())
            .replace("{location}", &urlencoding::encode(&self.location))
    }
}
