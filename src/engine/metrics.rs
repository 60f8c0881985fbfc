//! Engine run metrics.
//!
//! Small opt-in structs used to observe what a run did: phase timings and
//! per-table counters. The plain [`crate::extract`] path fills these in
//! cheaply (a few `Instant` reads and counters); the verbose API surfaces
//! them for debugging and for the CLI report.
//!
//! Metrics are derived per call and never stored anywhere shared, so they
//! add no cross-call state.

use std::time::Duration;

/// Timings for one extraction run.
#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// Time spent detecting boundaries and collecting rows (includes
    /// tokenization, which is driven by detection).
    pub detect: Duration,
    /// Time spent mapping, cleaning, and aggregating records.
    pub validate: Duration,
}

/// What happened to one detected table as it moved through the pipeline.
#[derive(Debug, Clone)]
pub struct TableCounters {
    /// Detection-order index of the table.
    pub table_index: usize,
    /// Table label (name, or index when unnamed).
    pub label: String,
    pub header_count: usize,
    /// Raw rows the detector collected.
    pub raw_rows: usize,
    /// Rows the field mapper turned into candidate records.
    pub candidates: usize,
    /// Candidates that survived cleaning.
    pub valid_records: usize,
    /// True when the table was dropped from the final output.
    pub dropped: bool,
}
