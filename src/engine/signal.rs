//! Header-line pre-classification.
//!
//! The boundary detector asks one question of every line: could this be a
//! table header? The answer is a [`HeaderSignal`] mask naming *why* a line
//! qualifies, which keeps the detector's accept/reject decisions auditable
//! (and printable via `ECOTAB_DEBUG=1`).
//!
//! A line is a header candidate when the mask is non-empty. Signals are
//! deliberately cheap and heuristic: false positives are acceptable because
//! downstream validation still has to accept the rows and records a header
//! claims to introduce.

use crate::api::Options;
use crate::engine::tokenize::split_cells;
use crate::vocab::Vocabulary;

bitflags::bitflags! {
    /// Reasons a line qualifies as a table header candidate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct HeaderSignal: u32 {
        /// Contains a domain keyword ("species", "threatened", "flora", ...).
        const DOMAIN_KEYWORD = 1 << 0;
        /// Contains a table caption marker ("table", "appendix").
        const TABLE_MARKER   = 1 << 1;
        /// Tokenizes into a plausible header cell count.
        const CELL_SHAPE     = 1 << 2;
        /// Matches a known run-together header signature for this report family.
        const RUN_TOGETHER   = 1 << 3;
        /// Both of the next two lines independently look tabular.
        const LOOKAHEAD      = 1 << 4;
    }
}

/// Scan one line (plus its look-ahead window) for header signals.
///
/// `following` holds the next non-empty lines in document order; only the
/// first [`Options::lookahead_lines`] of them are consulted.
pub(crate) fn scan_line(line: &str, following: &[&str], vocab: &Vocabulary, options: &Options) -> HeaderSignal {
    let mut signals = HeaderSignal::empty();
    let lower = line.to_lowercase();

    if vocab.header_keywords.iter().any(|kw| lower.contains(kw)) {
        signals |= HeaderSignal::DOMAIN_KEYWORD;
    }

    if vocab.table_markers.iter().any(|marker| lower.contains(marker)) {
        signals |= HeaderSignal::TABLE_MARKER;
    }

    if plausible_header_shape(line, vocab, options) {
        signals |= HeaderSignal::CELL_SHAPE;
    }

    if vocab.run_together_signatures.iter().any(|sig| lower.contains(sig)) {
        signals |= HeaderSignal::RUN_TOGETHER;
    }

    if following.len() >= options.lookahead_lines
        && following[..options.lookahead_lines].iter().all(|next| plausible_header_shape(next, vocab, options))
    {
        signals |= HeaderSignal::LOOKAHEAD;
    }

    signals
}

/// True when a line marks the start of a new document section, which ends
/// row collection for the currently open table.
pub(crate) fn is_section_break(line: &str, vocab: &Vocabulary) -> bool {
    let lower = line.to_lowercase();
    vocab.section_markers.iter().any(|marker| lower.contains(marker))
}

fn plausible_header_shape(line: &str, vocab: &Vocabulary, options: &Options) -> bool {
    let cells = split_cells(line, vocab, options).len();
    (options.min_header_cells..=options.max_header_cells).contains(&cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DocumentType, Options};
    use crate::vocab;

    fn scan(line: &str, following: &[&str], doc: DocumentType) -> HeaderSignal {
        scan_line(line, following, vocab::for_document_type(doc), &Options::default())
    }

    #[test]
    fn domain_keyword_flags_header() {
        let signals = scan("Threatened flora observed on site", &[], DocumentType::Generic);
        assert!(signals.contains(HeaderSignal::DOMAIN_KEYWORD));
    }

    #[test]
    fn table_marker_flags_header() {
        let signals = scan("Appendix B - site results", &[], DocumentType::Generic);
        assert!(signals.contains(HeaderSignal::TABLE_MARKER));
    }

    #[test]
    fn tabular_shape_flags_header() {
        let signals = scan("Name  Count  Notes", &[], DocumentType::Generic);
        assert!(signals.contains(HeaderSignal::CELL_SHAPE));
    }

    #[test]
    fn run_together_signature_is_nvr_only() {
        let line = "SpeciesCommon NameLast Recorded";
        assert!(scan(line, &[], DocumentType::Nvr).contains(HeaderSignal::RUN_TOGETHER));
        assert!(!scan(line, &[], DocumentType::Bvd).contains(HeaderSignal::RUN_TOGETHER));
    }

    #[test]
    fn lookahead_needs_both_following_lines() {
        let tabular = "Aquila audax  Wedge-tailed Eagle  Endangered";
        let prose = "continues as ordinary prose";

        let confirmed = scan("unlabelled columns", &[tabular, tabular], DocumentType::Generic);
        assert!(confirmed.contains(HeaderSignal::LOOKAHEAD));

        let denied = scan("unlabelled columns", &[tabular, prose], DocumentType::Generic);
        assert!(!denied.contains(HeaderSignal::LOOKAHEAD));

        let short = scan("unlabelled columns", &[tabular], DocumentType::Generic);
        assert!(!short.contains(HeaderSignal::LOOKAHEAD));
    }

    #[test]
    fn prose_line_has_no_signals() {
        let signals = scan("The weather was mild during both visits.", &[], DocumentType::Generic);
        assert!(signals.is_empty());
    }
}
