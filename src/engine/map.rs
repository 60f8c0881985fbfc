//! Positional header-to-field mapping.
//!
//! Pairs an accepted row with its table's headers by position (up to the
//! shorter of the two lengths) and classifies each header into a
//! [`SpeciesRecord`] field by case-insensitive substring match, in priority
//! order. Species identity is the anchor field for this domain: a row that
//! never populates `scientific_name` yields no candidate at all.

use crate::record::SpeciesRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ScientificName,
    CommonName,
    ConservationStatus,
    Location,
    LastRecorded,
}

/// Header classification table, in priority order; the first rule with a
/// matching substring wins.
const FIELD_RULES: &[(&[&str], Field)] = &[
    (&["species", "scientific"], Field::ScientificName),
    (&["common"], Field::CommonName),
    (&["status", "conservation"], Field::ConservationStatus),
    (&["location", "locality"], Field::Location),
    (&["date", "recorded", "observed"], Field::LastRecorded),
];

/// Cell values that mean "no value" in flattened report tables.
const PLACEHOLDERS: &[&str] = &["", "-", "n/a"];

/// Map one row into a candidate record, or nothing if the row carries no
/// usable species identity.
pub(crate) fn map_record(headers: &[String], cells: &[String]) -> Option<SpeciesRecord> {
    let mut record = SpeciesRecord::default();

    for (header, cell) in headers.iter().zip(cells) {
        let Some(field) = classify_header(header) else { continue };
        if is_placeholder(cell) {
            continue;
        }

        let slot = match field {
            Field::ScientificName => &mut record.scientific_name,
            Field::CommonName => &mut record.common_name,
            Field::ConservationStatus => &mut record.conservation_status,
            Field::Location => &mut record.location,
            Field::LastRecorded => &mut record.last_recorded,
        };
        // First populated column wins when two headers classify alike.
        if slot.is_none() {
            *slot = Some(cell.clone());
        }
    }

    if record.scientific_name.is_some() { Some(record) } else { None }
}

fn classify_header(header: &str) -> Option<Field> {
    let lower = header.to_lowercase();
    FIELD_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lower.contains(needle)))
        .map(|(_, field)| *field)
}

fn is_placeholder(cell: &str) -> bool {
    PLACEHOLDERS.iter().any(|p| cell.eq_ignore_ascii_case(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn maps_all_five_fields_by_position() {
        let headers = strings(&["Species", "Common Name", "Status", "Location", "Date"]);
        let cells = strings(&["Eucalyptus regnans", "Mountain Ash", "Endangered", "Smith Creek", "2023-01-01"]);

        let record = map_record(&headers, &cells).unwrap();
        assert_eq!(record.scientific_name.as_deref(), Some("Eucalyptus regnans"));
        assert_eq!(record.common_name.as_deref(), Some("Mountain Ash"));
        assert_eq!(record.conservation_status.as_deref(), Some("Endangered"));
        assert_eq!(record.location.as_deref(), Some("Smith Creek"));
        assert_eq!(record.last_recorded.as_deref(), Some("2023-01-01"));
    }

    #[test]
    fn placeholder_cells_are_skipped() {
        let headers = strings(&["Scientific Name", "Common Name", "Conservation Status"]);
        for placeholder in ["-", "n/a", "N/A", ""] {
            let cells = strings(&["Aquila audax", placeholder, "Endangered"]);
            let record = map_record(&headers, &cells).unwrap();
            assert_eq!(record.common_name, None, "placeholder: {placeholder:?}");
            assert_eq!(record.conservation_status.as_deref(), Some("Endangered"));
        }
    }

    #[test]
    fn pairing_stops_at_the_shorter_length() {
        let headers = strings(&["Species", "Common Name", "Status"]);
        let short_row = strings(&["Aquila audax"]);
        let record = map_record(&headers, &short_row).unwrap();
        assert_eq!(record.common_name, None);

        let long_row = strings(&["Aquila audax", "Wedge-tailed Eagle", "Endangered", "overflow cell"]);
        let record = map_record(&headers, &long_row).unwrap();
        assert_eq!(record.conservation_status.as_deref(), Some("Endangered"));
    }

    #[test]
    fn unrecognized_headers_are_ignored() {
        let headers = strings(&["Easting", "Northing", "Species"]);
        let cells = strings(&["512000", "5250000", "Aquila audax"]);
        let record = map_record(&headers, &cells).unwrap();
        assert_eq!(record.scientific_name.as_deref(), Some("Aquila audax"));
        assert!(record.location.is_none());
    }

    #[test]
    fn row_without_species_identity_yields_nothing() {
        let headers = strings(&["Common Name", "Status"]);
        let cells = strings(&["Mountain Ash", "Endangered"]);
        assert_eq!(map_record(&headers, &cells), None);

        let headers = strings(&["Species", "Status"]);
        let cells = strings(&["-", "Endangered"]);
        assert_eq!(map_record(&headers, &cells), None);
    }

    #[test]
    fn status_beats_location_for_ambiguous_headers() {
        // "Conservation status location" hits the status rule first.
        let headers = strings(&["Species", "Conservation Status Location"]);
        let cells = strings(&["Aquila audax", "Endangered"]);
        let record = map_record(&headers, &cells).unwrap();
        assert_eq!(record.conservation_status.as_deref(), Some("Endangered"));
        assert!(record.location.is_none());
    }
}
