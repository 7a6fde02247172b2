use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE: &str = "hilos.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read config file `{path}`: {source}")]
    CantReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unable to load data from `{path}`: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Build options read from `hilos.toml` next to the entry file.
#[derive(Debug, Default, Deserialize, PartialEq, Clone, Eq)]
pub struct Config {
    /// Link jQuery from a CDN instead of copying a local file.
    #[serde(default)]
    pub use_cdn: bool,
    /// Only write story.js.
    #[serde(default)]
    pub script_only: bool,
    /// Directory holding the story/index/style templates.
    #[serde(default)]
    pub templates: Option<PathBuf>,
}

impl Config {
    /// Loads `hilos.toml` from `source_path`. A missing file yields the
    /// defaults; a relative `templates` entry is resolved against
    /// `source_path`.
    pub fn load<T>(source_path: T) -> Result<Config, ConfigError>
    where
        T: AsRef<Path>,
    {
        let mut filename = source_path.as_ref().to_path_buf();
        filename.push(CONFIG_FILE);

        if !filename.exists() {
            return Ok(Config::default());
        }

        let contents = match std::fs::read_to_string(&filename) {
            Ok(c) => c,
            Err(source) => {
                return Err(ConfigError::CantReadFile {
                    path: filename,
                    source,
                })
            }
        };

        let mut config: Config = match toml::from_str(&contents) {
            Ok(d) => d,
            Err(source) => {
                return Err(ConfigError::Toml {
                    path: filename,
                    source,
                })
            }
        };

        if let Some(templates) = &config.templates {
            if templates.is_relative() {
                config.templates = Some(source_path.as_ref().join(templates));
            }
        }

        Ok(config)
    }
}

impl FromStr for Config {
    type Err = toml::de::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        toml::from_str(s)
    }
}
