use figment::Figment;
#[cfg(feature = "config_env")]
use figment::providers::Env;
#[cfg(feature = "config_yaml")]
use figment::providers::{Format, Yaml};
use thiserror::Error;

pub mod core_config;

use core_config::CoreConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parsing error: {0}")]
    Parsing(String),
}

/// Parses configuration from YAML content, with `ISSUER_`-prefixed
/// environment variables layered on top.
#[cfg(feature = "config_yaml")]
pub fn from_yaml_str(content: &str) -> Result<CoreConfig, ConfigError> {
    extract(Figment::new().merge(Yaml::string(content)))
}

#[cfg(feature = "config_yaml")]
pub fn from_files(files: &[impl AsRef<std::path::Path>]) -> Result<CoreConfig, ConfigError> {
    let mut figment = Figment::new();
    for path in files {
        figment = figment.merge(Yaml::file(path));
    }
    extract(figment)
}

#[cfg(feature = "config_yaml")]
fn extract(figment: Figment) -> Result<CoreConfig, ConfigError> {
    #[cfg(feature = "config_env")]
    let figment = figment.merge(Env::prefixed("ISSUER_").split("__").lowercase(false));

    figment
        .extract::<CoreConfig>()
        .map_err(|e| ConfigError::Parsing(e.to_string()))
}
