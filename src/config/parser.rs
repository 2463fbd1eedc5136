use std::path::Path;

use tracing::{debug, warn};

use super::schema::CONFIG_SCHEMA;
use super::types::{FilingLensConfig, BASE_URL_ENV};
use crate::errors::FilingLensError;

/// Picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "filing-lens.yaml";

pub async fn parse_config(path: &Path) -> Result<FilingLensConfig, FilingLensError> {
    if !path.exists() {
        return Err(FilingLensError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(FilingLensError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    if content.trim().is_empty() {
        return Ok(FilingLensConfig::default());
    }
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    validate_schema(&yaml)?;

    let config: FilingLensConfig = serde_yaml::from_value(yaml)?;
    validate_base_url(config.base_url())?;

    Ok(config)
}

/// Resolve configuration: defaults, then the config file, then the
/// environment, then the command line.
pub async fn load_config(
    explicit: Option<&Path>,
    api_url: Option<&str>,
) -> Result<FilingLensConfig, FilingLensError> {
    let mut config = match explicit {
        Some(path) => parse_config(path).await?,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                debug!(path = %default.display(), "Using config file from working directory");
                parse_config(default).await?
            } else {
                FilingLensConfig::default()
            }
        }
    };

    let from_env = std::env::var(BASE_URL_ENV).ok();
    apply_overrides(&mut config, from_env.as_deref(), api_url);
    validate_base_url(config.base_url())?;
    Ok(config)
}

fn apply_overrides(config: &mut FilingLensConfig, from_env: Option<&str>, from_cli: Option<&str>) {
    for url in [from_env, from_cli].into_iter().flatten() {
        let url = url.trim();
        if !url.is_empty() {
            config.set_base_url(url);
        }
    }
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), FilingLensError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| FilingLensError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| FilingLensError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; unknown keys shouldn't stop the client.
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

fn validate_base_url(url: &str) -> Result<(), FilingLensError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| FilingLensError::Config(format!("Invalid API base URL '{}': {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FilingLensError::Config(format!(
            "Unsupported scheme '{}' in API base URL; use http or https",
            other
        ))),
    }
}
