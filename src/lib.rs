pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod view;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{HttpDoctorRepository, MemoryQueryStore};
pub use config::DirectorySettings;
pub use crate::core::{directory::DoctorDirectory, engine::DoctorFilters};
pub use domain::model::{
    ConsultationMode, ConsultationType, Doctor, FilterCriteria, SortOption, Specialty,
};
pub use utils::error::{DirectoryError, Result};
