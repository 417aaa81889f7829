use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{validate_one_of, validate_range, validate_url, Validate};
use crate::view::OutputFormat;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const OUTPUT_FORMATS: [&str; 3] = ["text", "json", "csv"];

/// Optional file-based settings. Every section and key may be left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub format: Option<String>,
    pub page_url: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                return Err(DirectoryError::ConfigValidationError {
                    field: "config_file".to_string(),
                    message: format!("Cannot read {}: {}", path.display(), e),
                })
            }
        };
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.source.as_ref()?.endpoint.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.source.as_ref()?.timeout_seconds
    }

    pub fn page_url(&self) -> Option<&str> {
        self.display.as_ref()?.page_url.as_deref()
    }

    /// Only meaningful after [`Validate::validate`] has passed.
    pub fn output_format(&self) -> Option<OutputFormat> {
        match self.display.as_ref()?.format.as_deref()? {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = self.endpoint() {
            validate_url("source.endpoint", endpoint)?;
        }
        if let Some(timeout) = self.timeout_seconds() {
            validate_range("source.timeout_seconds", timeout, 1, 120)?;
        }
        if let Some(format) = self.display.as_ref().and_then(|d| d.format.as_deref()) {
            validate_one_of("display.format", format, &OUTPUT_FORMATS)?;
        }
        if let Some(page_url) = self.page_url() {
            validate_url("display.page_url", page_url)?;
        }
        Ok(())
    }
}
