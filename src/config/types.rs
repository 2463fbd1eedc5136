use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_EXPORT_DIR: &str = ".";
/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "FILING_LENS_API_BASE_URL";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FilingLensConfig {
    pub api: Option<ApiConfig>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ExportConfig {
    pub directory: Option<String>,
}

impl FilingLensConfig {
    pub fn base_url(&self) -> &str {
        self.api
            .as_ref()
            .and_then(|a| a.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(
            self.export
                .as_ref()
                .and_then(|e| e.directory.as_deref())
                .unwrap_or(DEFAULT_EXPORT_DIR),
        )
    }

    pub fn set_base_url(&mut self, url: &str) {
        self.api.get_or_insert_with(ApiConfig::default).base_url = Some(url.to_string());
    }

    pub fn set_export_dir(&mut self, dir: &str) {
        self.export.get_or_insert_with(ExportConfig::default).directory = Some(dir.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilingLensConfig::default();
        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_setters_fill_missing_sections() {
        let mut config = FilingLensConfig::default();
        config.set_base_url("https://api.example.com");
        config.set_export_dir("./exports");
        assert_eq!(config.base_url(), "https://api.example.com");
        assert_eq!(config.export_dir(), PathBuf::from("./exports"));
    }

    #[test]
    fn test_yaml_deserialize() {
        let config: FilingLensConfig = serde_yaml::from_str(
            "api:\n  base_url: http://10.0.0.5:8000\nexport:\n  directory: /tmp/reports\n",
        )
        .unwrap();
        assert_eq!(config.base_url(), "http://10.0.0.5:8000");
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/reports"));
    }
}
