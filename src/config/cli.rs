use crate::config::toml_config::TomlConfig;
use crate::config::DirectorySettings;
use crate::core::directory::DoctorDirectory;
use crate::domain::model::{ConsultationMode, SortOption};
use crate::domain::ports::{DoctorRepository, QueryStore};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use crate::view::OutputFormat;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Video,
    InClinic,
    /// Clears the consultation filter.
    Any,
}

impl From<ModeArg> for Option<ConsultationMode> {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Video => Some(ConsultationMode::Video),
            ModeArg::InClinic => Some(ConsultationMode::InClinic),
            ModeArg::Any => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Fees,
    Experience,
    /// Keeps the upstream order.
    None,
}

impl From<SortArg> for Option<SortOption> {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Fees => Some(SortOption::Fees),
            SortArg::Experience => Some(SortOption::Experience),
            SortArg::None => None,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "doctor-directory")]
#[command(about = "Search, filter and sort a doctor directory")]
pub struct CliConfig {
    /// URL returning the JSON array of doctors
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Request timeout for the doctor fetch
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// TOML settings file; flags override its values
    #[arg(short, long)]
    pub config: Option<String>,

    /// Initial query string, e.g. "specialties=Dentist&sort=fees"
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Sets the search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Toggles a specialty; may be repeated
    #[arg(long = "toggle-specialty")]
    pub toggle_specialty: Vec<String>,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Picks a search suggestion (0-based) as the new search term
    #[arg(long)]
    pub select_suggestion: Option<usize>,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Page address used to print a shareable link
    #[arg(long)]
    pub page_url: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Layers defaults, the optional TOML file and these flags, then validates.
    pub fn resolve(&self) -> Result<DirectorySettings> {
        let mut settings = DirectorySettings::default();

        if let Some(path) = &self.config {
            tracing::info!("Loading configuration from: {}", path);
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            settings = settings.with_file(&file);
        }

        if let Some(endpoint) = &self.api_endpoint {
            settings.api_endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(page_url) = &self.page_url {
            settings.page_url = Some(page_url.clone());
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Applies the flag-driven changes in the order a user would click them.
    pub fn apply<R, Q>(&self, directory: &mut DoctorDirectory<R, Q>)
    where
        R: DoctorRepository,
        Q: QueryStore,
    {
        if let Some(term) = &self.search {
            directory.set_search_term(term.clone());
        }
        for specialty in &self.toggle_specialty {
            directory.toggle_specialty(specialty);
        }
        if let Some(mode) = self.mode {
            directory.set_consultation_type(mode.into());
        }
        if let Some(sort) = self.sort {
            directory.set_sort_by(sort.into());
        }
        if let Some(index) = self.select_suggestion {
            if directory.select_suggestion(index).is_none() {
                tracing::warn!("No suggestion at index {}", index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::parse_from([
            "doctor-directory",
            "--query",
            "sort=fees",
            "--toggle-specialty",
            "Dentist",
            "--toggle-specialty",
            "ENT",
            "--mode",
            "in-clinic",
            "--sort",
            "none",
            "--format",
            "json",
        ]);

        assert_eq!(config.query, "sort=fees");
        assert_eq!(config.toggle_specialty, vec!["Dentist", "ENT"]);
        assert_eq!(config.mode, Some(ModeArg::InClinic));
        assert_eq!(config.sort, Some(SortArg::None));
        assert_eq!(config.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_arg_conversions() {
        assert_eq!(Option::<ConsultationMode>::from(ModeArg::Any), None);
        assert_eq!(
            Option::<ConsultationMode>::from(ModeArg::Video),
            Some(ConsultationMode::Video)
        );
        assert_eq!(Option::<SortOption>::from(SortArg::None), None);
        assert_eq!(
            Option::<SortOption>::from(SortArg::Experience),
            Some(SortOption::Experience)
        );
    }

    #[test]
    fn test_resolve_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                b"[source]\n\
                  endpoint = \"https://file.example.com/d.json\"\n\
                  timeout_seconds = 20\n\
                  [display]\n\
                  format = \"csv\"\n",
            )
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let config = CliConfig::parse_from([
            "doctor-directory",
            "--config",
            path.as_str(),
            "--format",
            "json",
        ]);
        let settings = config.resolve().unwrap();

        assert_eq!(settings.api_endpoint, "https://file.example.com/d.json");
        assert_eq!(settings.timeout_seconds, 20);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_resolve_rejects_bad_endpoint() {
        let config = CliConfig::parse_from(["doctor-directory", "--api-endpoint", "ftp://x"]);
        assert!(config.resolve().is_err());
    }
}
