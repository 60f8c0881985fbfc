//! The extraction pipeline.
//!
//! This module is the *internal entry point* for the engine: the public API
//! in `src/api.rs` builds an input and calls [`run`] here.
//!
//! ## How the parts work together
//!
//! Extraction is a strictly linear pipeline; no later phase revisits or
//! mutates an earlier phase's finalized output:
//!
//! ```text
//! text ── detect_tables (detect.rs) ──────────────────┐
//!           │  per line: scan_line (signal.rs)        │ unvalidated
//!           │  per cell split: split_cells            │ TableData
//!           │  (tokenize.rs, 3-stage fallback chain)  │
//!           └────────────────────┬────────────────────┘
//!                                v
//!                  validate_document (validate.rs)
//!                    - map rows to candidates (map.rs)
//!                    - clean/accept records  (clean.rs)
//!                    - drop empty tables, collect warnings
//!                                │
//!                                v
//!                  aggregate_species (aggregate.rs)
//!                                │
//!                                v
//!                           RunOutput
//! ```
//!
//! ## Responsibilities by module
//!
//! - `tokenize.rs`: one line in, ordered cells out, with the progressive
//!   separator / column-label / case-boundary fallback chain.
//! - `signal.rs`: per-line header signals (`HeaderSignal` bitflags) and
//!   section-break detection.
//! - `detect.rs`: walks the line sequence, opens/closes tables, collects raw
//!   rows with tolerant alignment.
//! - `map.rs`: positional header-to-field mapping into candidate records.
//! - `clean.rs`: record acceptance, normalization, confidence scoring.
//! - `validate.rs`: per-table finalization and the document summary.
//! - `aggregate.rs`: per-species roll-ups across the document.
//! - `metrics.rs`: opt-in timings and per-table counters.
//!
//! ## Failure semantics
//!
//! Only [`InputError`] (empty or unreadable input, checked before anything
//! else runs) aborts a run. Every structural problem downstream degrades to
//! a warning on a best-effort result; a document with no recognizable tables
//! is a *successful* run with an empty table list.
//!
//! The engine is a pure synchronous transformation: no I/O, no shared
//! state, all accumulators local to one call. Concurrent calls on
//! independent inputs cannot interfere.
//!
//! ## Debugging
//!
//! Set `ECOTAB_DEBUG=1` to print detection and rejection traces to stderr.

#[path = "engine/aggregate.rs"]
mod aggregate;
#[path = "engine/clean.rs"]
mod clean;
#[path = "engine/detect.rs"]
mod detect;
#[path = "engine/map.rs"]
mod map;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/signal.rs"]
mod signal;
#[path = "engine/tokenize.rs"]
mod tokenize;
#[path = "engine/validate.rs"]
mod validate;

pub use metrics::{RunMetrics, TableCounters};

use crate::api::{InputError, Options};
use crate::record::{DocumentValidationSummary, SpeciesAggregate, TableData};
use crate::vocab::Vocabulary;
use std::time::Instant;

/// Everything one engine run produces.
#[derive(Debug)]
pub(crate) struct RunOutput {
    pub tables: Vec<TableData>,
    pub summary: DocumentValidationSummary,
    pub counters: Vec<TableCounters>,
    pub aggregates: Vec<SpeciesAggregate>,
    pub metrics: RunMetrics,
}

/// Run the full pipeline over `text`.
pub(crate) fn run(text: &str, vocab: &Vocabulary, options: &Options) -> Result<RunOutput, InputError> {
    check_input(text)?;

    let started = Instant::now();
    let raw_tables = detect::detect_tables(text, vocab, options);
    let detect_elapsed = started.elapsed();

    let validate_started = Instant::now();
    let validated = validate::validate_document(raw_tables);
    let aggregates = aggregate::aggregate_species(&validated.tables);
    let validate_elapsed = validate_started.elapsed();

    Ok(RunOutput {
        tables: validated.tables,
        summary: validated.summary,
        counters: validated.counters,
        aggregates,
        metrics: RunMetrics { total: started.elapsed(), detect: detect_elapsed, validate: validate_elapsed },
    })
}

/// The only fatal check in the engine: the input must exist and look like
/// text. Everything after this point degrades to warnings.
fn check_input(text: &str) -> Result<(), InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }

    let mut total = 0usize;
    let mut garbage = 0usize;
    for ch in text.chars() {
        total += 1;
        if ch.is_control() && !matches!(ch, '\n' | '\r' | '\t' | '\u{0C}') {
            garbage += 1;
        }
    }
    // More than 10% control characters says the upstream PDF-to-text step
    // produced binary junk, not a document.
    if garbage * 10 > total {
        return Err(InputError::Unreadable { garbage, total });
    }

    Ok(())
}
