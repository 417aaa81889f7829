use crate::domain::model::{ConsultationType, Doctor, RawDoctorRecord};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Leading currency symbols and whitespace, an optional `+`, then the first
/// run of digits.
fn leading_integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\w+\-]*\+?(\d+)").unwrap())
}

/// Parses the leading integer of a loosely typed value, 0 when there is none.
///
/// Strings such as `"₹ 500"` or `"13 Years of experience"` keep only their
/// leading digits. Negative or fractional numbers degrade the way a lenient
/// integer parse would: negatives become 0, fractions are truncated.
pub fn parse_lenient_u32(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                u32::try_from(v).unwrap_or(0)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && *f <= u32::MAX as f64)
                    .map(|f| f.trunc() as u32)
                    .unwrap_or(0)
            }
        }
        Some(Value::String(s)) => leading_integer()
            .captures(s.trim())
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0),
        _ => 0,
    }
}

/// Neither flag set falls back to `Both`: an unknown capability is treated as
/// the most permissive one.
pub fn consultation_type(video_consult: bool, in_clinic: bool) -> ConsultationType {
    match (video_consult, in_clinic) {
        (true, true) => ConsultationType::Both,
        (true, false) => ConsultationType::Video,
        (false, true) => ConsultationType::InClinic,
        (false, false) => ConsultationType::Both,
    }
}

fn id_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Converts an upstream record into the canonical shape. Never fails; missing
/// or malformed fields take their defaults.
pub fn normalize(raw: RawDoctorRecord) -> Doctor {
    let (clinic_name, location) = match raw.clinic {
        Some(clinic) => (
            clinic.name.unwrap_or_default(),
            clinic
                .address
                .and_then(|address| address.locality)
                .unwrap_or_default(),
        ),
        None => (String::new(), String::new()),
    };

    Doctor {
        id: id_string(raw.id.as_ref()),
        name: raw.name.unwrap_or_default(),
        specialities: raw.specialities.unwrap_or_default(),
        experience: parse_lenient_u32(raw.experience.as_ref()),
        consultation_type: consultation_type(
            raw.video_consult.unwrap_or(false),
            raw.in_clinic.unwrap_or(false),
        ),
        fees: parse_lenient_u32(raw.fees.as_ref()),
        clinic_name,
        location,
        profile_photo: raw.photo.unwrap_or_default(),
    }
}

pub fn normalize_all(records: Vec<RawDoctorRecord>) -> Vec<Doctor> {
    records.into_iter().map(normalize).collect()
}

/// Decodes each element of the upstream array on its own. An element that is
/// not a usable record is logged and skipped; the rest still load.
pub fn parse_records(values: Vec<Value>) -> Vec<RawDoctorRecord> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<RawDoctorRecord>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping doctor record {}: {}", index, e);
                None
            }
        })
        .collect()
}
