pub mod directory;
pub mod engine;
pub mod normalizer;
pub mod url_state;

pub use crate::domain::model::{Doctor, FilterCriteria};
pub use crate::domain::ports::{ConfigProvider, DoctorRepository, QueryStore};
pub use crate::utils::error::Result;
