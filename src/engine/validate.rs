//! Table and document validation.
//!
//! Runs the field mapper and record cleaner over every detected table,
//! replaces each surviving table with a finalized immutable version holding
//! only valid records, and rolls the results up into a
//! [`DocumentValidationSummary`].
//!
//! Rejections here are *local*: a bad record, or a whole table with no valid
//! records, becomes a warning string and processing continues. Nothing in
//! this module can fail the run.
//!
//! A table leaves this module in exactly one of two states:
//!
//! - kept: `processed_records` holds only cleaned records,
//!   `record_count == processed_records.len()`, `validation` populated;
//! - dropped: absent from the output entirely, with one warning explaining
//!   why (`No headers found` / `No processed data found` /
//!   `No valid species records found`).

use crate::engine::clean;
use crate::engine::map;
use crate::engine::metrics::TableCounters;
use crate::record::{DocumentValidationSummary, SpeciesRecord, TableData, TableValidationMetrics};

/// Quality-score thresholds for the document-level advisory warnings.
const LOW_QUALITY_BELOW: u8 = 50;
const MODERATE_QUALITY_BELOW: u8 = 80;

/// Everything the validation phase produces.
#[derive(Debug)]
pub(crate) struct ValidatedDocument {
    /// Tables that survived validation, finalized.
    pub tables: Vec<TableData>,
    pub summary: DocumentValidationSummary,
    /// Per-table pipeline counters, in detection order (kept and dropped).
    pub counters: Vec<TableCounters>,
}

/// Validate every detected table and aggregate document-level quality.
pub(crate) fn validate_document(raw_tables: Vec<TableData>) -> ValidatedDocument {
    let debug = std::env::var_os("ECOTAB_DEBUG").is_some();
    let total_tables = raw_tables.len();

    let mut tables = Vec::new();
    let mut counters = Vec::new();
    let mut warnings = Vec::new();
    let mut total_records = 0;
    let mut valid_records = 0;

    for raw in raw_tables {
        let outcome = validate_table(raw, debug);
        total_records += outcome.counters.candidates;
        valid_records += outcome.counters.valid_records;
        if let Some(warning) = outcome.warning {
            warnings.push(warning);
        }
        if let Some(table) = outcome.table {
            tables.push(table);
        }
        counters.push(outcome.counters);
    }

    let quality_score = quality_score(valid_records, total_records);
    if total_records > 0 {
        if quality_score < LOW_QUALITY_BELOW {
            warnings.push(format!(
                "Low data quality: only {quality_score}% of candidate records passed validation; manual review recommended"
            ));
        } else if quality_score < MODERATE_QUALITY_BELOW {
            warnings
                .push(format!("Moderate data quality: {quality_score}% of candidate records passed validation"));
        }
    }

    let summary = DocumentValidationSummary {
        total_tables,
        valid_tables: tables.len(),
        total_records,
        valid_records,
        quality_score,
        warnings,
    };

    ValidatedDocument { tables, summary, counters }
}

struct TableOutcome {
    table: Option<TableData>,
    warning: Option<String>,
    counters: TableCounters,
}

/// Validate one table, producing either a finalized replacement or a
/// warning. The incoming detector table is consumed; finalization builds a
/// new value rather than mutating shared state.
fn validate_table(raw: TableData, debug: bool) -> TableOutcome {
    let label = raw.label();
    let mut counters = TableCounters {
        table_index: raw.table_index,
        label: label.clone(),
        header_count: raw.headers.len(),
        raw_rows: raw.rows.len(),
        candidates: 0,
        valid_records: 0,
        dropped: true,
    };

    if raw.headers.is_empty() {
        return TableOutcome {
            table: None,
            warning: Some(format!("Table \"{label}\": No headers found")),
            counters,
        };
    }

    let candidates: Vec<SpeciesRecord> =
        raw.rows.iter().filter_map(|row| map::map_record(&raw.headers, row)).collect();
    counters.candidates = candidates.len();

    if candidates.is_empty() {
        return TableOutcome {
            table: None,
            warning: Some(format!("Table \"{label}\": No processed data found")),
            counters,
        };
    }

    let mut valid = Vec::new();
    for candidate in &candidates {
        match clean::clean_record(candidate) {
            Ok(record) => valid.push(record),
            Err(reason) => {
                if debug {
                    eprintln!("[validate] table {label:?}: rejected {candidate:?}: {reason}");
                }
            }
        }
    }
    counters.valid_records = valid.len();

    if valid.is_empty() {
        return TableOutcome {
            table: None,
            warning: Some(format!("Table \"{label}\": No valid species records found")),
            counters,
        };
    }

    let metrics = TableValidationMetrics {
        header_count: raw.headers.len(),
        total_rows: raw.rows.len(),
        processed_records: candidates.len(),
        valid_records: valid.len(),
        completeness_score: completeness_score(&valid),
    };

    counters.dropped = false;
    let record_count = valid.len();
    TableOutcome {
        table: Some(TableData {
            page_number: raw.page_number,
            table_index: raw.table_index,
            table_name: raw.table_name,
            headers: raw.headers,
            rows: raw.rows,
            processed_records: valid,
            record_count,
            validation: Some(metrics),
        }),
        warning: None,
        counters,
    }
}

fn quality_score(valid: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (100.0 * valid as f64 / total as f64).round() as u8
}

/// Percentage of valid records carrying both a scientific and a common name.
fn completeness_score(records: &[SpeciesRecord]) -> u8 {
    if records.is_empty() {
        return 0;
    }
    let complete = records.iter().filter(|r| r.scientific_name.is_some() && r.common_name.is_some()).count();
    (100.0 * complete as f64 / records.len() as f64).round() as u8
}
