//! Two-way mapping between [`FilterCriteria`] and the page's query string.
//!
//! Parameters holding a "no filter" default are omitted. Unknown keys and
//! unrecognized `mode`/`sort` values are dropped silently.

use crate::domain::model::{ConsultationMode, FilterCriteria, SortOption};
use crate::domain::ports::QueryStore;
use std::collections::HashMap;
use url::{form_urlencoded, Url};

pub const SEARCH_PARAM: &str = "search";
pub const SPECIALTIES_PARAM: &str = "specialties";
pub const MODE_PARAM: &str = "mode";
pub const SORT_PARAM: &str = "sort";

pub fn serialize(criteria: &FilterCriteria) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if !criteria.selected_specialties.is_empty() {
        query.append_pair(SPECIALTIES_PARAM, &criteria.selected_specialties.join(","));
    }
    if let Some(mode) = criteria.consultation_type {
        query.append_pair(MODE_PARAM, mode.as_param());
    }
    if let Some(sort_by) = criteria.sort_by {
        query.append_pair(SORT_PARAM, sort_by.as_param());
    }
    if !criteria.search_term.is_empty() {
        query.append_pair(SEARCH_PARAM, &criteria.search_term);
    }

    query.finish()
}

/// Splits on commas, drops blank segments and repeated names.
fn parse_specialties(value: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for segment in value.split(',') {
        if segment.trim().is_empty() || names.iter().any(|n| n == segment) {
            continue;
        }
        names.push(segment.to_string());
    }
    names
}

/// Parses a query string, with or without a leading `?`. When a key repeats,
/// its first value is the one considered.
pub fn deserialize(query: &str) -> FilterCriteria {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }

    let mut criteria = FilterCriteria::default();

    if let Some(value) = params.get(SPECIALTIES_PARAM) {
        criteria.selected_specialties = parse_specialties(value);
    }
    if let Some(value) = params.get(MODE_PARAM) {
        criteria.consultation_type = ConsultationMode::from_param(value);
        if criteria.consultation_type.is_none() {
            tracing::debug!("Ignoring unrecognized {} value: {}", MODE_PARAM, value);
        }
    }
    if let Some(value) = params.get(SORT_PARAM) {
        criteria.sort_by = SortOption::from_param(value);
        if criteria.sort_by.is_none() {
            tracing::debug!("Ignoring unrecognized {} value: {}", SORT_PARAM, value);
        }
    }
    if let Some(value) = params.get(SEARCH_PARAM) {
        criteria.search_term = value.clone();
    }

    criteria
}

/// Returns `page` with its query replaced by the serialized criteria.
pub fn share_link(page: &Url, criteria: &FilterCriteria) -> Url {
    let mut link = page.clone();
    let query = serialize(criteria);
    link.set_query(if query.is_empty() { None } else { Some(&query) });
    link
}

/// Reads the criteria once at start and mirrors every later change back into
/// the store by replacement, so history does not grow per keystroke.
#[derive(Debug)]
pub struct UrlStateSync<Q: QueryStore> {
    store: Q,
}

impl<Q: QueryStore> UrlStateSync<Q> {
    pub fn new(store: Q) -> Self {
        Self { store }
    }

    pub fn initial_criteria(&self) -> FilterCriteria {
        let query = self.store.read();
        let criteria = deserialize(&query);
        tracing::debug!("Initial criteria from '{}': {:?}", query, criteria);
        criteria
    }

    pub fn publish(&mut self, criteria: &FilterCriteria) {
        let query = serialize(criteria);
        tracing::debug!("Replacing query with '{}'", query);
        self.store.replace(&query);
    }

    pub fn store(&self) -> &Q {
        &self.store
    }

    pub fn into_store(self) -> Q {
        self.store
    }
}
