extern crate self as ecotab;

#[macro_use]
mod macros;
mod api;
mod engine;
mod record;
mod vocab;

pub use api::{
    DocumentType, ExtractionDetails, ExtractionReport, ExtractionReportVerbose, InputError, Options,
    extract, extract_verbose_with, extract_with,
};
pub use engine::{RunMetrics, TableCounters};
pub use record::{
    DocumentValidationSummary, SpeciesAggregate, SpeciesRecord, TableData, TableValidationMetrics,
};
