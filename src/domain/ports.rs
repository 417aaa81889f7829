use crate::domain::model::RawDoctorRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the raw upstream records. Fetched once per page load.
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn fetch_raw(&self) -> Result<Vec<RawDoctorRecord>>;
}

/// The navigable URL's query string, passed in explicitly rather than read
/// from ambient state.
///
/// Strings carry no leading `?`.
pub trait QueryStore {
    fn read(&self) -> String;

    /// Overwrites the current entry without adding a history entry.
    fn replace(&mut self, query: &str);

    /// Navigates to a new entry.
    fn push(&mut self, query: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
