//! Record validation and cleaning.
//!
//! Accepts or rejects one candidate record, and normalizes the fields of the
//! records it keeps. Rejection is always whole-record: a malformed scientific
//! name is evidence the row was mis-split, so none of its other cells can be
//! trusted either.
//!
//! Accepted records get a confidence score (0..=100), a weighted sum over
//! which fields survived extraction.

use crate::record::SpeciesRecord;
use chrono::NaiveDate;
use thiserror::Error;

/// Why a candidate record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum RejectReason {
    #[error("missing scientific name")]
    MissingScientificName,
    #[error("scientific name length {0} outside 3..=100")]
    NameLength(usize),
    #[error("scientific name must contain at least two words")]
    SingleWordName,
    #[error("scientific name must start with an uppercase letter")]
    LowercaseName,
    #[error("scientific name contains a digit")]
    DigitInName,
    #[error("scientific name contains invalid character {0:?}")]
    InvalidCharacter(char),
}

const MIN_NAME_LEN: usize = 3;
const MAX_NAME_LEN: usize = 100;

/// Field weights for the confidence score. Species identity dominates; the
/// coordinate-ish fields contribute least.
const WEIGHT_SCIENTIFIC_NAME: u32 = 40;
const WEIGHT_COMMON_NAME: u32 = 20;
const WEIGHT_CONSERVATION_STATUS: u32 = 20;
const WEIGHT_LOCATION: u32 = 10;
const WEIGHT_LAST_RECORDED: u32 = 10;

/// Date formats seen in the wild across NVR/BVD exports, tried in order.
/// Matches are re-rendered day-first; anything unparseable passes through
/// unchanged (presence is all that validation requires of a date).
const DATE_FORMATS: &[&str] = &["%d-%b-%Y", "%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];
const DATE_OUTPUT_FORMAT: &str = "%d-%m-%Y";

/// Validate and clean one candidate record.
///
/// On acceptance every string field is whitespace-normalized, the date field
/// is canonicalized where recognizable, and `confidence` is populated.
pub(crate) fn clean_record(candidate: &SpeciesRecord) -> Result<SpeciesRecord, RejectReason> {
    let raw_name = candidate.scientific_name.as_deref().ok_or(RejectReason::MissingScientificName)?;
    let scientific_name = validate_scientific_name(raw_name)?;

    let mut cleaned = SpeciesRecord {
        scientific_name: Some(scientific_name),
        common_name: candidate.common_name.as_deref().map(normalize_whitespace),
        conservation_status: candidate.conservation_status.as_deref().map(normalize_whitespace),
        location: candidate.location.as_deref().map(normalize_whitespace),
        last_recorded: candidate.last_recorded.as_deref().map(normalize_whitespace).map(|d| normalize_date(&d)),
        confidence: None,
    };
    cleaned.confidence = Some(confidence(&cleaned));
    Ok(cleaned)
}

/// Whitespace-normalize and validate a scientific name, returning the
/// normalized form.
pub(crate) fn validate_scientific_name(raw: &str) -> Result<String, RejectReason> {
    let name = normalize_whitespace(raw);
    if name.is_empty() {
        return Err(RejectReason::MissingScientificName);
    }

    let len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(RejectReason::NameLength(len));
    }

    if name.split(' ').count() < 2 {
        return Err(RejectReason::SingleWordName);
    }

    let first = name.chars().next().unwrap_or(' ');
    if !first.is_uppercase() {
        return Err(RejectReason::LowercaseName);
    }

    for ch in name.chars() {
        if ch.is_ascii_digit() {
            return Err(RejectReason::DigitInName);
        }
        if !(ch.is_alphabetic() || ch == ' ' || ch == '-' || ch == '.') {
            return Err(RejectReason::InvalidCharacter(ch));
        }
    }

    Ok(name)
}

/// Collapse internal whitespace runs and trim. Idempotent.
pub(crate) fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_date(value: &str) -> String {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.format(DATE_OUTPUT_FORMAT).to_string();
        }
    }
    value.to_string()
}

fn confidence(record: &SpeciesRecord) -> u8 {
    let mut score = 0u32;
    if record.scientific_name.is_some() {
        score += WEIGHT_SCIENTIFIC_NAME;
    }
    if record.common_name.is_some() {
        score += WEIGHT_COMMON_NAME;
    }
    if record.conservation_status.is_some() {
        score += WEIGHT_CONSERVATION_STATUS;
    }
    if record.location.is_some() {
        score += WEIGHT_LOCATION;
    }
    if record.last_recorded.is_some() {
        score += WEIGHT_LAST_RECORDED;
    }
    score.min(100) as u8
}
