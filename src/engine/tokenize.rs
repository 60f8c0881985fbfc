//! Row splitting with progressive fallback.
//!
//! Turns one trimmed, non-empty line of flattened report text into an ordered
//! list of cell strings. Text flattening loses layout, so a single splitting
//! rule is never enough; instead the tokenizer runs an ordered chain of
//! strategies and takes the first one that produces sufficient structure:
//!
//! ```text
//! (1) separator      -> split on >=2 whitespace, tabs, pipes
//! (2) column-label   -> anchor on known column labels     (gated: sparse + long line)
//! (3) case-boundary  -> split at lower->upper transitions (gated: still sparse)
//! ```
//!
//! "Sufficient structure" means more than [`Options::sparse_cell_threshold`]
//! cells. A stage is attempted only when every earlier stage failed; none is
//! skipped speculatively, and there is no backtracking. When the whole chain
//! fails the separator result is returned as-is, so callers always see the
//! most literal reading of the line.
//!
//! The chain is data ([`STRATEGIES`]) rather than nested conditionals: each
//! stage is independently testable and the escalation order is auditable in
//! one place.

use crate::api::Options;
use crate::vocab::Vocabulary;
use once_cell::sync::Lazy;

static DEBUG: Lazy<bool> = Lazy::new(|| std::env::var_os("ECOTAB_DEBUG").is_some());

/// One stage of the fallback chain.
pub(crate) struct SplitStrategy {
    pub name: &'static str,
    /// Gate: should this stage run for `line` at all? (The chain itself
    /// already guarantees earlier stages came up sparse.)
    pub applies: fn(&str, &Options) -> bool,
    pub run: fn(&str, &Vocabulary) -> Vec<String>,
}

/// The escalation chain, in order. First sufficient result wins.
pub(crate) const STRATEGIES: &[SplitStrategy] = &[
    SplitStrategy { name: "separator", applies: always, run: run_separator },
    SplitStrategy { name: "column-label", applies: long_enough_for_recovery, run: split_on_column_labels },
    SplitStrategy { name: "case-boundary", applies: always, run: run_case_boundary },
];

/// Split `line` into cells using the full fallback chain.
pub(crate) fn split_cells(line: &str, vocab: &Vocabulary, options: &Options) -> Vec<String> {
    let mut primary: Option<Vec<String>> = None;

    for strategy in STRATEGIES {
        if !(strategy.applies)(line, options) {
            continue;
        }
        let cells = (strategy.run)(line, vocab);
        if cells.len() > options.sparse_cell_threshold {
            if *DEBUG && primary.is_some() {
                eprintln!("[tokenize] {} recovered {} cells from {line:?}", strategy.name, cells.len());
            }
            return cells;
        }
        // Remember the first (separator) stage's reading for the
        // everything-failed case.
        primary.get_or_insert(cells);
    }

    primary.unwrap_or_default()
}

fn always(_line: &str, _options: &Options) -> bool {
    true
}

fn long_enough_for_recovery(line: &str, options: &Options) -> bool {
    line.chars().count() > options.recovery_min_line_len
}

fn run_separator(line: &str, _vocab: &Vocabulary) -> Vec<String> {
    split_on_separators(line)
}

fn run_case_boundary(line: &str, _vocab: &Vocabulary) -> Vec<String> {
    split_on_case_boundaries(line)
}

/// Stage 1: split on runs of two or more whitespace characters, single tabs,
/// or pipes. This is the layout most text flatteners preserve.
pub(crate) fn split_on_separators(line: &str) -> Vec<String> {
    regex!(r"\s{2,}|\t|\|").split(line).map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

/// Stage 2: anchor on known column labels.
///
/// Finds case-insensitive occurrences of the vocabulary's column labels and
/// cuts the line at each match boundary; the matched label and every
/// non-empty stretch of intervening text each become a cell. Labels are
/// claimed in vocabulary order, so longer labels win their span before any
/// of their substrings are considered.
pub(crate) fn split_on_column_labels(line: &str, vocab: &Vocabulary) -> Vec<String> {
    // Labels are ASCII, and ASCII lowercasing preserves byte offsets, so
    // spans found in `lower` index directly into `line`.
    let lower = line.to_ascii_lowercase();
    let mut spans: Vec<(usize, usize)> = Vec::new();

    for label in vocab.column_labels {
        let mut from = 0;
        while let Some(pos) = lower[from..].find(label) {
            let start = from + pos;
            let end = start + label.len();
            if !spans.iter().any(|&(s, e)| start < e && end > s) {
                spans.push((start, end));
            }
            from = end;
        }
    }

    spans.sort_unstable();

    let mut cells = Vec::new();
    let mut cursor = 0;
    for (start, end) in spans {
        push_trimmed(&mut cells, &line[cursor..start]);
        push_trimmed(&mut cells, &line[start..end]);
        cursor = end;
    }
    push_trimmed(&mut cells, &line[cursor..]);
    cells
}

/// Stage 3: split at adjacent lowercase-to-uppercase transitions, the
/// signature of run-together camel/Pascal text.
pub(crate) fn split_on_case_boundaries(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in line.chars() {
        if prev_lower && ch.is_uppercase() {
            push_trimmed(&mut cells, &current);
            current.clear();
        }
        current.push(ch);
        prev_lower = ch.is_lowercase();
    }
    push_trimmed(&mut cells, &current);
    cells
}

fn push_trimmed(cells: &mut Vec<String>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        cells.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DocumentType, Options};
    use crate::vocab;
    use pretty_assertions::assert_eq;

    fn generic() -> &'static Vocabulary {
        vocab::for_document_type(DocumentType::Generic)
    }

    #[test]
    fn separator_split_returns_segments_in_order() {
        // Array of (input, expected cells)
        let cases: Vec<(&str, Vec<&str>)> = vec![
            ("Eucalyptus regnans  Mountain Ash  Endangered", vec!["Eucalyptus regnans", "Mountain Ash", "Endangered"]),
            ("a\tb\tc", vec!["a", "b", "c"]),
            ("a | b | c", vec!["a", "b", "c"]),
            ("one    two\t three", vec!["one", "two", "three"]),
            ("  padded  cells  ", vec!["padded", "cells"]),
            ("single spaced prose line", vec!["single spaced prose line"]),
        ];

        for (input, expected) in cases {
            assert_eq!(split_on_separators(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn chain_prefers_separator_result_when_sufficient() {
        // "Species" and "Status" are column labels, but the separator stage
        // already yields 3 cells, so recovery must not fire.
        let cells = split_cells("Species  Status  Extra", generic(), &Options::default());
        assert_eq!(cells, vec!["Species", "Status", "Extra"]);
    }

    #[test]
    fn column_label_recovery_reconstructs_single_spaced_header() {
        let cells = split_cells("Species Common Name Status Location Date", generic(), &Options::default());
        assert_eq!(cells, vec!["Species", "Common Name", "Status", "Location", "Date"]);
    }

    #[test]
    fn column_label_recovery_keeps_intervening_text() {
        let cells = split_on_column_labels("x Species y Location z", generic());
        assert_eq!(cells, vec!["x", "Species", "y", "Location", "z"]);
    }

    #[test]
    fn run_together_header_yields_distinguishable_labels() {
        // Flattening lost the separators entirely; the fallback chain must
        // still reconstruct at least two labels.
        let cells = split_cells("SpeciesCommon NameLast Recorded", generic(), &Options::default());
        assert!(cells.len() >= 2, "got {cells:?}");
        assert_eq!(cells[0], "Species");
    }

    #[test]
    fn case_boundary_splits_run_together_text() {
        assert_eq!(split_on_case_boundaries("SpeciesStatusDate"), vec!["Species", "Status", "Date"]);
        assert_eq!(split_on_case_boundaries("plain lowercase"), vec!["plain lowercase"]);
    }

    #[test]
    fn case_boundary_fires_only_for_short_sparse_lines() {
        // 17 chars: too short for label recovery, so stage 3 handles it.
        let cells = split_cells("SpeciesStatusDate", generic(), &Options::default());
        assert_eq!(cells, vec!["Species", "Status", "Date"]);
    }

    #[test]
    fn exhausted_chain_returns_separator_reading() {
        let cells = split_cells("no structure here", generic(), &Options::default());
        assert_eq!(cells, vec!["no structure here"]);
    }
}
