use crate::core::engine::DoctorFilters;
use crate::core::normalizer::normalize_all;
use crate::core::url_state::UrlStateSync;
use crate::domain::model::{ConsultationMode, Doctor, SortOption};
use crate::domain::ports::{DoctorRepository, QueryStore};

/// Fetches and normalizes the doctor list. Any failure is logged and yields
/// an empty list; callers never see the error.
pub async fn load_doctors<R: DoctorRepository + ?Sized>(repository: &R) -> Vec<Doctor> {
    match repository.fetch_raw().await {
        Ok(records) => {
            let doctors = normalize_all(records);
            tracing::info!("Loaded {} doctors", doctors.len());
            doctors
        }
        Err(e) => {
            tracing::error!("Error fetching doctors: {}", e);
            Vec::new()
        }
    }
}

/// One browsing session: the doctor list, the user's criteria and the URL
/// they are mirrored to.
///
/// Criteria are read from the query store when the directory is built, so
/// the first derivation already reflects a deep link. Until [`load`] has
/// completed the directory is loading and the engine sees an empty list.
///
/// [`load`]: DoctorDirectory::load
pub struct DoctorDirectory<R: DoctorRepository, Q: QueryStore> {
    repository: R,
    url: UrlStateSync<Q>,
    filters: DoctorFilters,
    loading: bool,
}

impl<R: DoctorRepository, Q: QueryStore> DoctorDirectory<R, Q> {
    pub fn new(repository: R, store: Q) -> Self {
        let url = UrlStateSync::new(store);
        let criteria = url.initial_criteria();
        Self {
            repository,
            url,
            filters: DoctorFilters::new(Vec::new(), criteria),
            loading: true,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let doctors = load_doctors(&self.repository).await;
        self.filters.set_doctors(doctors);
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filters(&self) -> &DoctorFilters {
        &self.filters
    }

    /// The query string currently held by the store.
    pub fn query(&self) -> String {
        self.url.store().read()
    }

    pub fn store(&self) -> &Q {
        self.url.store()
    }

    fn publish(&mut self) {
        self.url.publish(self.filters.criteria());
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filters.set_search_term(term);
        self.publish();
    }

    pub fn toggle_specialty(&mut self, specialty: &str) {
        self.filters.toggle_specialty(specialty);
        self.publish();
    }

    pub fn set_consultation_type(&mut self, mode: Option<ConsultationMode>) {
        self.filters.set_consultation_type(mode);
        self.publish();
    }

    pub fn set_sort_by(&mut self, sort_by: Option<SortOption>) {
        self.filters.set_sort_by(sort_by);
        self.publish();
    }

    /// Uses the suggestion at `index` as the new search term.
    pub fn select_suggestion(&mut self, index: usize) -> Option<String> {
        let name = self.filters.suggestions().get(index)?.clone();
        self.set_search_term(name.clone());
        Some(name)
    }
}
