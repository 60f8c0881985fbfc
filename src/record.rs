//! Domain value types produced by the extraction pipeline.
//!
//! Everything here is plain data: the engine builds these structures phase by
//! phase and never mutates a finalized value in place (the table validator
//! *replaces* the detector's unvalidated `TableData` with a new finalized one).
//!
//! All output types serialize with camelCase field names because the document
//! pipeline persists reports as JSON and the upload UI reads them verbatim
//! (`pageNumber`, `tableIndex`, `processedRecords`, ...).

use serde::Serialize;
use std::collections::BTreeSet;

/// One extracted species observation.
///
/// Fields are optional because flattened report tables routinely lose cells;
/// the only hard requirement for a record to survive validation is a
/// plausible `scientific_name`. `confidence` (0..=100) is absent until the
/// record has been cleaned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conservation_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_recorded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

impl SpeciesRecord {
    /// True if no field was populated at all.
    pub fn is_empty(&self) -> bool {
        self.scientific_name.is_none()
            && self.common_name.is_none()
            && self.conservation_status.is_none()
            && self.location.is_none()
            && self.last_recorded.is_none()
    }
}

/// One detected table.
///
/// Produced by the boundary detector in an unvalidated state (raw `rows`
/// collected, `processed_records` holding unvalidated candidates,
/// `validation` empty), then finalized by the table validator. After
/// finalization `record_count == processed_records.len()` and only valid
/// records remain.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    /// 1-based page the header line was found on (form-feed page breaks).
    pub page_number: usize,
    /// Sequential 0-based index in detection order.
    pub table_index: usize,
    /// Inferred label, e.g. `flora`, `fauna_range`, `species`, `data`.
    pub table_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub processed_records: Vec<SpeciesRecord>,
    pub record_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<TableValidationMetrics>,
}

impl TableData {
    /// Display label used in warnings: the table name, or the index when the
    /// name is empty.
    pub fn label(&self) -> String {
        if self.table_name.is_empty() { self.table_index.to_string() } else { self.table_name.clone() }
    }
}

/// Per-table quality metrics computed during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableValidationMetrics {
    pub header_count: usize,
    pub total_rows: usize,
    pub processed_records: usize,
    pub valid_records: usize,
    /// Rounded percentage of valid records carrying both a scientific and a
    /// common name.
    pub completeness_score: u8,
}

/// Document-level roll-up of table validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentValidationSummary {
    pub total_tables: usize,
    pub valid_tables: usize,
    pub total_records: usize,
    pub valid_records: usize,
    /// `round(100 * valid_records / total_records)`, or 0 with no records.
    pub quality_score: u8,
    /// Ordered, human-readable; intended for direct display.
    pub warnings: Vec<String>,
}

/// Per-species roll-up across every valid record in a document.
///
/// Replaces the loosely-shaped keyed accumulation maps of earlier versions
/// with an explicit tagged aggregate; build through [`SpeciesAggregate::from_record`]
/// and [`SpeciesAggregate::observe`] only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesAggregate {
    pub scientific_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conservation_status: Option<String>,
    pub record_count: usize,
    pub locations: BTreeSet<String>,
}

impl SpeciesAggregate {
    /// Seed an aggregate from the first record observed for a species.
    pub fn from_record(record: &SpeciesRecord) -> Option<Self> {
        let scientific_name = record.scientific_name.clone()?;
        let mut agg = SpeciesAggregate {
            scientific_name,
            common_name: None,
            conservation_status: None,
            record_count: 0,
            locations: BTreeSet::new(),
        };
        agg.observe(record);
        Some(agg)
    }

    /// Fold one more record into the aggregate. First non-empty value wins
    /// for the scalar fields; locations accumulate as a set.
    pub fn observe(&mut self, record: &SpeciesRecord) {
        self.record_count += 1;
        if self.common_name.is_none() {
            self.common_name = record.common_name.clone();
        }
        if self.conservation_status.is_none() {
            self.conservation_status = record.conservation_status.clone();
        }
        if let Some(location) = &record.location {
            self.locations.insert(location.clone());
        }
    }
}
