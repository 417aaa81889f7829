//! Terminal rendering of the engine's outputs.

use crate::core::engine::DoctorFilters;
use crate::domain::model::{ConsultationMode, Doctor, SortOption};
use crate::utils::error::{DirectoryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const PLACEHOLDER_PHOTO: &str = "https://via.placeholder.com/150?text=Doctor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// `"1 Doctor Found"`, otherwise plural.
pub fn heading(count: usize) -> String {
    if count == 1 {
        "1 Doctor Found".to_string()
    } else {
        format!("{} Doctors Found", count)
    }
}

pub fn photo_url(doctor: &Doctor) -> &str {
    if doctor.profile_photo.is_empty() {
        PLACEHOLDER_PHOTO
    } else {
        &doctor.profile_photo
    }
}

pub fn card_lines(doctor: &Doctor) -> Vec<String> {
    vec![
        format!("Dr. {}", doctor.name),
        doctor.specialty_names().collect::<Vec<_>>().join(", "),
        format!("{} years | ₹{}", doctor.experience, doctor.fees),
        format!("{}, {}", doctor.clinic_name, doctor.location),
        doctor.consultation_type.label().to_string(),
        format!("Photo: {}", photo_url(doctor)),
    ]
}

fn mode_label(mode: Option<ConsultationMode>) -> &'static str {
    mode.map_or("Any", ConsultationMode::label)
}

fn sort_label(sort_by: Option<SortOption>) -> &'static str {
    sort_by.map_or("None", SortOption::label)
}

pub fn render_text(filters: &DoctorFilters, loading: bool, query: &str) -> String {
    if loading {
        return "Loading doctors...\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Search: {}", filters.search_term());
    if !filters.suggestions().is_empty() {
        let _ = writeln!(out, "Suggestions: {}", filters.suggestions().join(", "));
    }
    let specialties: Vec<String> = filters
        .all_specialties()
        .iter()
        .map(|s| {
            let mark = if filters.selected_specialties().contains(s) { "x" } else { " " };
            format!("[{}] {}", mark, s)
        })
        .collect();
    let _ = writeln!(out, "Specialties: {}", specialties.join(", "));
    let _ = writeln!(out, "Consultation: {}", mode_label(filters.consultation_type()));
    let _ = writeln!(out, "Sort: {}", sort_label(filters.sort_by()));
    let _ = writeln!(out, "Query: ?{}", query);
    let _ = writeln!(out);

    let doctors = filters.filtered_doctors();
    let _ = writeln!(out, "{}", heading(doctors.len()));
    if doctors.is_empty() {
        let _ = writeln!(out, "No doctors found matching your criteria.");
    }
    for doctor in doctors {
        let _ = writeln!(out);
        for (i, line) in card_lines(doctor).iter().enumerate() {
            let indent = if i == 0 { "" } else { "  " };
            let _ = writeln!(out, "{}{}", indent, line);
        }
    }
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryView<'a> {
    loading: bool,
    query: &'a str,
    search_term: &'a str,
    suggestions: &'a [String],
    all_specialties: &'a [String],
    selected_specialties: &'a [String],
    consultation_type: Option<ConsultationMode>,
    sort_by: Option<SortOption>,
    count: usize,
    doctors: &'a [Doctor],
}

pub fn render_json(filters: &DoctorFilters, loading: bool, query: &str) -> Result<String> {
    let view = DirectoryView {
        loading,
        query,
        search_term: filters.search_term(),
        suggestions: filters.suggestions(),
        all_specialties: filters.all_specialties(),
        selected_specialties: filters.selected_specialties(),
        consultation_type: filters.consultation_type(),
        sort_by: filters.sort_by(),
        count: filters.filtered_doctors().len(),
        doctors: filters.filtered_doctors(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

pub fn render_csv(doctors: &[Doctor]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "name",
        "specialities",
        "experience",
        "consultation_type",
        "fees",
        "clinic_name",
        "location",
        "profile_photo",
    ])?;
    for doctor in doctors {
        let specialities = doctor.specialty_names().collect::<Vec<_>>().join("; ");
        let experience = doctor.experience.to_string();
        let fees = doctor.fees.to_string();
        writer.write_record([
            doctor.id.as_str(),
            doctor.name.as_str(),
            specialities.as_str(),
            experience.as_str(),
            doctor.consultation_type.label(),
            fees.as_str(),
            doctor.clinic_name.as_str(),
            doctor.location.as_str(),
            doctor.profile_photo.as_str(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DirectoryError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        DirectoryError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

pub fn render(
    format: OutputFormat,
    filters: &DoctorFilters,
    loading: bool,
    query: &str,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(filters, loading, query)),
        OutputFormat::Json => render_json(filters, loading, query),
        OutputFormat::Csv => render_csv(filters.filtered_doctors()),
    }
}
