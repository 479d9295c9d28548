//! Configuration loading helper functions
//!
//! Priority (highest to lowest):
//! 1. Environment variables (prefixed)
//! 2. Config file given by the caller
//! 3. Default values of the target type
//!
//! Command-line flags are applied by the caller on top of the result.

use errors::{ScanError, ScanResult};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use tracing::debug;

/// Build a figment provider for a config file, choosing the format by extension
fn file_figment(path: &Path) -> ScanResult<Figment> {
    if !path.exists() {
        return Err(ScanError::config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ScanError::config("Config file must have an extension"))?;

    let figment = match extension {
        "toml" => Figment::new().merge(Toml::file(path)),
        "yaml" | "yml" => Figment::new().merge(Yaml::file(path)),
        "json" => Figment::new().merge(Json::file(path)),
        _ => {
            return Err(ScanError::config(format!(
                "Unsupported config file format: {}",
                extension
            )))
        },
    };
    Ok(figment)
}

/// Load configuration from defaults, an optional file and prefixed env vars
///
/// `env_prefix` includes the trailing underscore, e.g. `ALARMSCAN_`.
pub fn load_layered<T>(file: Option<&Path>, env_prefix: &str) -> ScanResult<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    let mut figment = Figment::from(Serialized::defaults(T::default()));

    if let Some(path) = file {
        debug!("Loading configuration file {}", path.display());
        figment = figment.merge(file_figment(path)?);
    }

    figment
        .merge(Env::prefixed(env_prefix))
        .extract()
        .map_err(|e| ScanError::config(format!("Failed to load configuration: {}", e)))
}
