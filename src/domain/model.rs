use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// How a doctor can be consulted.
///
/// `Both` satisfies either consultation filter; `Video` and `InClinic` only
/// satisfy themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsultationType {
    Video,
    InClinic,
    Both,
}

impl ConsultationType {
    pub fn accepts(self, mode: ConsultationMode) -> bool {
        match self {
            ConsultationType::Both => true,
            ConsultationType::Video => mode == ConsultationMode::Video,
            ConsultationType::InClinic => mode == ConsultationMode::InClinic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConsultationType::Both => "In-Clinic & Video Consultation",
            ConsultationType::Video => "Video Consultation",
            ConsultationType::InClinic => "In-Clinic Consultation",
        }
    }
}

/// A consultation filter a user can select. There is no "both" filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsultationMode {
    Video,
    InClinic,
}

impl ConsultationMode {
    pub fn as_param(self) -> &'static str {
        match self {
            ConsultationMode::Video => "video",
            ConsultationMode::InClinic => "in-clinic",
        }
    }

    /// Exact, case-sensitive match on the URL literal.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "video" => Some(ConsultationMode::Video),
            "in-clinic" => Some(ConsultationMode::InClinic),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConsultationMode::Video => "Video Consultation",
            ConsultationMode::InClinic => "In-Clinic Consultation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Ascending fee.
    Fees,
    /// Descending years of experience.
    Experience,
}

impl SortOption {
    pub fn as_param(self) -> &'static str {
        match self {
            SortOption::Fees => "fees",
            SortOption::Experience => "experience",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "fees" => Some(SortOption::Fees),
            "experience" => Some(SortOption::Experience),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOption::Fees => "Price: Low-High",
            SortOption::Experience => "Experience - Most Experience first",
        }
    }
}

/// Upstream sends specialties either as bare strings or as `{ "name": .. }`
/// objects. Everything that compares or displays a specialty goes through
/// [`Specialty::name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Specialty {
    Name(String),
    Named { name: String },
}

impl Specialty {
    pub fn name(&self) -> &str {
        match self {
            Specialty::Name(name) => name,
            Specialty::Named { name } => name,
        }
    }
}

impl From<&str> for Specialty {
    fn from(name: &str) -> Self {
        Specialty::Name(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialities: Vec<Specialty>,
    pub experience: u32,
    pub consultation_type: ConsultationType,
    pub fees: u32,
    pub clinic_name: String,
    pub location: String,
    pub profile_photo: String,
}

impl Doctor {
    pub fn specialty_names(&self) -> impl Iterator<Item = &str> {
        self.specialities.iter().map(Specialty::name)
    }

    pub fn has_specialty(&self, name: &str) -> bool {
        self.specialty_names().any(|s| s == name)
    }
}

/// Loosely typed upstream record. Every field is optional and the numeric
/// fields are kept as raw JSON so that a bad value degrades instead of
/// failing the whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDoctorRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_specialities")]
    pub specialities: Option<Vec<Specialty>>,
    #[serde(default)]
    pub experience: Option<Value>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub video_consult: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub in_clinic: Option<bool>,
    #[serde(default)]
    pub fees: Option<Value>,
    #[serde(default)]
    pub clinic: Option<RawClinic>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Reads a capability flag as a truthy value: `true`, a non-zero number, or
/// the strings `"true"`/`"1"`. Anything else is false.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1"
        }
        _ => false,
    }))
}

/// Keeps the specialty entries that resolve to a name and drops the rest.
fn lenient_specialities<'de, D>(deserializer: D) -> Result<Option<Vec<Specialty>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(None);
    };
    let specialities = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Specialty>(item) {
            Ok(specialty) => Some(specialty),
            Err(e) => {
                tracing::warn!("Dropping unreadable specialty entry: {}", e);
                None
            }
        })
        .collect();
    Ok(Some(specialities))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawClinic {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<RawAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub locality: Option<String>,
}

/// The user's current search, filter and sort selection.
///
/// Every field's default means "no filter" for that dimension.
/// `selected_specialties` behaves as a set but keeps insertion order so the
/// URL representation is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub selected_specialties: Vec<String>,
    pub consultation_type: Option<ConsultationMode>,
    pub sort_by: Option<SortOption>,
}

impl FilterCriteria {
    pub fn is_default(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Adds the specialty if absent, removes it if present.
    pub fn toggle_specialty(&mut self, specialty: &str) {
        if let Some(pos) = self
            .selected_specialties
            .iter()
            .position(|s| s == specialty)
        {
            self.selected_specialties.remove(pos);
        } else {
            self.selected_specialties.push(specialty.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specialty_accepts_string_and_object() {
        let parsed: Vec<Specialty> =
            serde_json::from_value(serde_json::json!(["Dentist", {"name": "Cardiologist"}]))
                .unwrap();

        assert_eq!(parsed[0].name(), "Dentist");
        assert_eq!(parsed[1].name(), "Cardiologist");
    }

    #[test]
    fn test_specialty_object_ignores_extra_fields() {
        let parsed: Specialty =
            serde_json::from_value(serde_json::json!({"name": "ENT", "id": 7})).unwrap();
        assert_eq!(parsed.name(), "ENT");
    }

    #[test]
    fn test_raw_flags_are_truthy() {
        let raw: RawDoctorRecord = serde_json::from_value(serde_json::json!({
            "video_consult": 1,
            "in_clinic": "TRUE"
        }))
        .unwrap();
        assert_eq!(raw.video_consult, Some(true));
        assert_eq!(raw.in_clinic, Some(true));

        let raw: RawDoctorRecord = serde_json::from_value(serde_json::json!({
            "video_consult": 0,
            "in_clinic": "yes"
        }))
        .unwrap();
        assert_eq!(raw.video_consult, Some(false));
        assert_eq!(raw.in_clinic, Some(false));

        let raw: RawDoctorRecord =
            serde_json::from_value(serde_json::json!({"video_consult": null})).unwrap();
        assert_eq!(raw.video_consult, None);
        assert_eq!(raw.in_clinic, None);
    }

    #[test]
    fn test_raw_specialities_drop_unnamed_entries() {
        let raw: RawDoctorRecord = serde_json::from_value(serde_json::json!({
            "specialities": [{"title": "x"}, "Dentist", 7, {"name": "ENT"}]
        }))
        .unwrap();
        let names: Vec<&str> = raw
            .specialities
            .as_ref()
            .unwrap()
            .iter()
            .map(Specialty::name)
            .collect();
        assert_eq!(names, vec!["Dentist", "ENT"]);

        let raw: RawDoctorRecord =
            serde_json::from_value(serde_json::json!({"specialities": "Dentist"})).unwrap();
        assert!(raw.specialities.is_none());
    }

    #[test]
    fn test_both_accepts_any_mode() {
        assert!(ConsultationType::Both.accepts(ConsultationMode::Video));
        assert!(ConsultationType::Both.accepts(ConsultationMode::InClinic));
        assert!(ConsultationType::Video.accepts(ConsultationMode::Video));
        assert!(!ConsultationType::Video.accepts(ConsultationMode::InClinic));
        assert!(!ConsultationType::InClinic.accepts(ConsultationMode::Video));
    }

    #[test]
    fn test_param_literals_are_exact() {
        assert_eq!(ConsultationMode::from_param("video"), Some(ConsultationMode::Video));
        assert_eq!(ConsultationMode::from_param("in-clinic"), Some(ConsultationMode::InClinic));
        assert_eq!(ConsultationMode::from_param("Video"), None);
        assert_eq!(ConsultationMode::from_param("both"), None);
        assert_eq!(SortOption::from_param("fees"), Some(SortOption::Fees));
        assert_eq!(SortOption::from_param("experience"), Some(SortOption::Experience));
        assert_eq!(SortOption::from_param("rating"), None);
    }

    #[test]
    fn test_toggle_specialty() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_specialty("Dentist");
        criteria.toggle_specialty("ENT");
        assert_eq!(criteria.selected_specialties, vec!["Dentist", "ENT"]);

        criteria.toggle_specialty("Dentist");
        assert_eq!(criteria.selected_specialties, vec!["ENT"]);
        assert!(!criteria.is_default());

        criteria.toggle_specialty("ENT");
        assert!(criteria.is_default());
    }

    #[test]
    fn test_doctor_serializes_camel_case() {
        let doctor = Doctor {
            id: "1".into(),
            name: "Alice".into(),
            specialities: vec!["Dentist".into()],
            experience: 4,
            consultation_type: ConsultationType::InClinic,
            fees: 300,
            clinic_name: "Smile".into(),
            location: "Indiranagar".into(),
            profile_photo: String::new(),
        };
        let value = serde_json::to_value(&doctor).unwrap();
        assert_eq!(value["consultationType"], "in-clinic");
        assert_eq!(value["clinicName"], "Smile");
        assert_eq!(value["specialities"][0], "Dentist");
    }
}
