#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_API_ENDPOINT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use crate::view::OutputFormat;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Effective settings after layering defaults, the TOML file and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySettings {
    pub api_endpoint: String,
    pub timeout_seconds: u64,
    pub format: OutputFormat,
    pub page_url: Option<String>,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            format: OutputFormat::Text,
            page_url: None,
        }
    }
}

impl DirectorySettings {
    /// Overlays the values present in `file`.
    pub fn with_file(mut self, file: &TomlConfig) -> Self {
        if let Some(endpoint) = file.endpoint() {
            self.api_endpoint = endpoint.to_string();
        }
        if let Some(timeout) = file.timeout_seconds() {
            self.timeout_seconds = timeout;
        }
        if let Some(format) = file.output_format() {
            self.format = format;
        }
        if let Some(page_url) = file.page_url() {
            self.page_url = Some(page_url.to_string());
        }
        self
    }
}

impl ConfigProvider for DirectorySettings {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for DirectorySettings {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 120)?;
        if let Some(page_url) = &self.page_url {
            validate_url("page_url", page_url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = DirectorySettings::default();
        assert_eq!(settings.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(settings.timeout_seconds(), 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let file = TomlConfig::from_toml_str(
            "[source]\nendpoint = \"http://localhost:9000/d.json\"\n[display]\nformat = \"csv\"\n",
        )
        .unwrap();

        let settings = DirectorySettings::default().with_file(&file);
        assert_eq!(settings.api_endpoint, "http://localhost:9000/d.json");
        assert_eq!(settings.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(settings.format, OutputFormat::Csv);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = DirectorySettings {
            timeout_seconds: 500,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = DirectorySettings {
            page_url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
