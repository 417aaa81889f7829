//! Filter, sort and suggestion derivation.
//!
//! The free functions are pure: they take the full doctor list and the
//! criteria and never mutate their input. [`DoctorFilters`] holds the last
//! known list and criteria and recomputes every derived output whenever one
//! of them changes.

use crate::domain::model::{ConsultationMode, Doctor, FilterCriteria, SortOption};
use std::collections::BTreeSet;

pub const MAX_SUGGESTIONS: usize = 3;

/// Distinct resolved specialty names across all doctors, ascending.
pub fn specialty_universe(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(Doctor::specialty_names)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `needle` must already be lowercased. Empty matches everything.
fn matches_needle(doctor: &Doctor, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    doctor.name.to_lowercase().contains(needle)
        || doctor
            .specialty_names()
            .any(|s| s.to_lowercase().contains(needle))
        || doctor.clinic_name.to_lowercase().contains(needle)
}

/// Case-insensitive substring match of the trimmed term against name, any
/// specialty, or clinic name.
pub fn matches_search(doctor: &Doctor, term: &str) -> bool {
    matches_needle(doctor, &term.trim().to_lowercase())
}

/// Conjunctive: the doctor must carry every selected specialty.
pub fn matches_specialties(doctor: &Doctor, selected: &[String]) -> bool {
    selected.iter().all(|s| doctor.has_specialty(s))
}

pub fn matches_consultation(doctor: &Doctor, mode: Option<ConsultationMode>) -> bool {
    mode.map_or(true, |mode| doctor.consultation_type.accepts(mode))
}

/// Every predicate, with the search term already trimmed and lowercased.
fn matches_with_needle(doctor: &Doctor, needle: &str, criteria: &FilterCriteria) -> bool {
    matches_needle(doctor, needle)
        && matches_specialties(doctor, &criteria.selected_specialties)
        && matches_consultation(doctor, criteria.consultation_type)
}

pub fn matches(doctor: &Doctor, criteria: &FilterCriteria) -> bool {
    matches_with_needle(doctor, &criteria.search_term.trim().to_lowercase(), criteria)
}

/// Stable sort in place. `None` keeps the current order.
pub fn sort_doctors(doctors: &mut [Doctor], sort_by: Option<SortOption>) {
    match sort_by {
        Some(SortOption::Fees) => doctors.sort_by_key(|d| d.fees),
        Some(SortOption::Experience) => doctors.sort_by(|a, b| b.experience.cmp(&a.experience)),
        None => {}
    }
}

/// Doctors satisfying every predicate, then ordered by the sort option.
pub fn filter_doctors(doctors: &[Doctor], criteria: &FilterCriteria) -> Vec<Doctor> {
    let needle = criteria.search_term.trim().to_lowercase();
    let mut result: Vec<Doctor> = doctors
        .iter()
        .filter(|d| matches_with_needle(d, &needle, criteria))
        .cloned()
        .collect();
    sort_doctors(&mut result, criteria.sort_by);
    result
}

/// Up to [`MAX_SUGGESTIONS`] doctor names in list order. Empty when the
/// trimmed term is empty.
pub fn suggestions(doctors: &[Doctor], term: &str) -> Vec<String> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    doctors
        .iter()
        .filter(|d| matches_needle(d, &needle))
        .take(MAX_SUGGESTIONS)
        .map(|d| d.name.clone())
        .collect()
}

/// Engine state plus its derived outputs.
#[derive(Debug, Clone, Default)]
pub struct DoctorFilters {
    doctors: Vec<Doctor>,
    criteria: FilterCriteria,
    all_specialties: Vec<String>,
    suggestions: Vec<String>,
    filtered: Vec<Doctor>,
}

impl DoctorFilters {
    pub fn new(doctors: Vec<Doctor>, criteria: FilterCriteria) -> Self {
        let mut filters = Self {
            all_specialties: specialty_universe(&doctors),
            doctors,
            criteria,
            suggestions: Vec::new(),
            filtered: Vec::new(),
        };
        filters.recompute();
        filters
    }

    fn recompute(&mut self) {
        self.suggestions = suggestions(&self.doctors, &self.criteria.search_term);
        self.filtered = filter_doctors(&self.doctors, &self.criteria);
    }

    /// Replaces the doctor list. The specialty universe depends only on this.
    pub fn set_doctors(&mut self, doctors: Vec<Doctor>) {
        self.all_specialties = specialty_universe(&doctors);
        self.doctors = doctors;
        self.recompute();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.recompute();
    }

    pub fn toggle_specialty(&mut self, specialty: &str) {
        self.criteria.toggle_specialty(specialty);
        self.recompute();
    }

    pub fn set_consultation_type(&mut self, mode: Option<ConsultationMode>) {
        self.criteria.consultation_type = mode;
        self.recompute();
    }

    pub fn set_sort_by(&mut self, sort_by: Option<SortOption>) {
        self.criteria.sort_by = sort_by;
        self.recompute();
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn search_term(&self) -> &str {
        &self.criteria.search_term
    }

    pub fn selected_specialties(&self) -> &[String] {
        &self.criteria.selected_specialties
    }

    pub fn consultation_type(&self) -> Option<ConsultationMode> {
        self.criteria.consultation_type
    }

    pub fn sort_by(&self) -> Option<SortOption> {
        self.criteria.sort_by
    }

    pub fn all_specialties(&self) -> &[String] {
        &self.all_specialties
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn filtered_doctors(&self) -> &[Doctor] {
        &self.filtered
    }
}
