use crate::engine::{self, RunMetrics, TableCounters};
use crate::record::{DocumentValidationSummary, SpeciesAggregate, TableData};
use crate::vocab;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// Report family of the input document.
///
/// Selects the keyword vocabulary and table-naming heuristic. NVR carries a
/// specialized header-detection path (run-together header signatures and the
/// report's literal section phrases); the other types use the generic
/// structural detector with their own column labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Natural Values Report.
    Nvr,
    /// Protected Matters Report.
    Pmr,
    /// Biodiversity Values Database export.
    Bvd,
    /// Anything else: generic structural detection.
    Generic,
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NVR" => Ok(DocumentType::Nvr),
            "PMR" => Ok(DocumentType::Pmr),
            "BVD" => Ok(DocumentType::Bvd),
            "GENERIC" => Ok(DocumentType::Generic),
            other => Err(format!("unknown document type '{other}' (expected NVR, PMR, BVD, or GENERIC)")),
        }
    }
}

/// Tunable heuristic thresholds.
///
/// The defaults are carried over verbatim from years of tuning against real
/// report corpora. Several look arbitrary (the 50-line row scan cap, the
/// two-line look-ahead) but are load-bearing for documents in the wild;
/// change them per call if you must, not here.
#[derive(Debug, Clone)]
pub struct Options {
    /// A split yielding this many cells or fewer is "sparse": the tokenizer
    /// escalates to its next fallback stage.
    pub sparse_cell_threshold: usize,
    /// Column-label recovery only runs on lines longer than this.
    pub recovery_min_line_len: usize,
    /// Minimum cell count for a line to look like a header.
    pub min_header_cells: usize,
    /// Maximum cell count for a line to look like a header.
    pub max_header_cells: usize,
    /// How many following lines must look tabular for look-ahead
    /// confirmation of an otherwise unremarkable header line.
    pub lookahead_lines: usize,
    /// Maximum rows collected after a header before the table is closed.
    pub row_scan_cap: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            sparse_cell_threshold: 2,
            recovery_min_line_len: 30,
            min_header_cells: 2,
            max_header_cells: 15,
            lookahead_lines: 2,
            row_scan_cap: 50,
        }
    }
}

/// Fatal input problems, detected before the pipeline runs.
///
/// This is the only way a run fails; everything downstream degrades to
/// warnings on a best-effort result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("input text is empty")]
    Empty,
    #[error("input text is unreadable: {garbage} of {total} characters are control bytes")]
    Unreadable { garbage: usize, total: usize },
}

/// Result of one extraction run.
///
/// `tables` contains only tables that survived validation (a table with zero
/// valid records is dropped and leaves a warning behind). Callers should
/// always present whatever was found together with the quality score and
/// warnings; a low score means "review manually", not "discard".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub success: bool,
    pub tables: Vec<TableData>,
    pub validation: DocumentValidationSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Additional details returned by [`extract_verbose_with`].
///
/// Compact by design: enough to see what each detected table went through
/// and where the time went, without dumping internal state.
#[derive(Debug, Clone)]
pub struct ExtractionDetails {
    /// Phase timings for the run.
    pub metrics: RunMetrics,
    /// Per-table pipeline counters, in detection order (kept and dropped).
    pub tables: Vec<TableCounters>,
    /// Per-species roll-ups across all kept tables, alphabetical.
    pub aggregates: Vec<SpeciesAggregate>,
}

/// Result of [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct ExtractionReportVerbose {
    pub report: ExtractionReport,
    pub details: ExtractionDetails,
}

/// Extract tables and species records from linearized report text, with
/// default options.
///
/// # Example
/// ```
/// use ecotab::{DocumentType, extract};
///
/// let text = "Species  Common Name  Status\n\
///             Aquila audax  Wedge-tailed Eagle  Endangered\n";
/// let report = extract(text, DocumentType::Generic);
/// assert!(report.success);
/// assert_eq!(report.tables.len(), 1);
/// ```
pub fn extract(text: &str, document_type: DocumentType) -> ExtractionReport {
    extract_with(text, document_type, &Options::default())
}

/// Extract with explicit options.
pub fn extract_with(text: &str, document_type: DocumentType, options: &Options) -> ExtractionReport {
    match engine::run(text, vocab::for_document_type(document_type), options) {
        Ok(run) => ExtractionReport { success: true, tables: run.tables, validation: run.summary, error: None },
        Err(err) => failure_report(err),
    }
}

/// Extract with explicit options and return extra (compact) debug details.
pub fn extract_verbose_with(
    text: &str,
    document_type: DocumentType,
    options: &Options,
) -> ExtractionReportVerbose {
    match engine::run(text, vocab::for_document_type(document_type), options) {
        Ok(run) => ExtractionReportVerbose {
            report: ExtractionReport {
                success: true,
                tables: run.tables,
                validation: run.summary,
                error: None,
            },
            details: ExtractionDetails { metrics: run.metrics, tables: run.counters, aggregates: run.aggregates },
        },
        Err(err) => ExtractionReportVerbose {
            report: failure_report(err),
            details: ExtractionDetails {
                metrics: RunMetrics::default(),
                tables: Vec::new(),
                aggregates: Vec::new(),
            },
        },
    }
}

fn failure_report(err: InputError) -> ExtractionReport {
    ExtractionReport {
        success: false,
        tables: Vec::new(),
        validation: DocumentValidationSummary::default(),
        error: Some(err.to_string()),
    }
}
