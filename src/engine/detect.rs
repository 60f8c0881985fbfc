//! Table boundary detection and row collection.
//!
//! Scans the full line sequence of a linearized document, decides where
//! tables begin, and collects raw rows into [`TableData`] buckets. The
//! detector produces *unvalidated* tables: raw rows only, no records, no
//! metrics. Everything it emits is re-examined by the field mapper and the
//! validators downstream.
//!
//! ```text
//! lines ── scan_line (signal.rs) ──┬─ no signal: advance
//!                                  └─ header: close open table,
//!                                     open new one, then collect rows
//!                                     forward (cap: row_scan_cap,
//!                                     early stop: section markers)
//! ```
//!
//! Row acceptance is tolerant, not exact: text flattening commonly drops
//! trailing empty cells, so a line counts as a data row when it tokenizes
//! into at least half as many cells as the table has header cells.
//!
//! Page numbers come from form-feed characters (`\u{0C}`), the page
//! separator convention of the upstream PDF-to-text step.
//!
//! Set `ECOTAB_DEBUG=1` to print per-header detection decisions to stderr.

use crate::api::Options;
use crate::engine::signal;
use crate::engine::tokenize::split_cells;
use crate::record::TableData;
use crate::vocab::Vocabulary;

/// One trimmed, non-empty input line with its 1-based page.
#[derive(Debug)]
struct Line {
    page: usize,
    text: String,
}

/// Detect all tables in `text` and populate them with headers and raw rows.
pub(crate) fn detect_tables(text: &str, vocab: &Vocabulary, options: &Options) -> Vec<TableData> {
    let lines = prepare_lines(text);
    let texts: Vec<&str> = lines.iter().map(|line| line.text.as_str()).collect();
    let debug = std::env::var_os("ECOTAB_DEBUG").is_some();

    let mut tables: Vec<TableData> = Vec::new();
    let mut open: Option<TableData> = None;
    let mut next_index = 0;
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        let lookahead_end = (i + 1 + options.lookahead_lines).min(texts.len());
        let signals = signal::scan_line(&line.text, &texts[(i + 1).min(texts.len())..lookahead_end], vocab, options);

        if signals.is_empty() {
            i += 1;
            continue;
        }

        close_table(&mut tables, open.take());

        let headers = split_cells(&line.text, vocab, options);
        let table_name = infer_table_name(&line.text, vocab);
        if debug {
            eprintln!(
                "[detect] page {} line {}: signals={:?} -> table {} ({:?}, {} header cells)",
                line.page,
                i,
                signals,
                next_index,
                table_name,
                headers.len()
            );
        }

        let mut table = TableData {
            page_number: line.page,
            table_index: next_index,
            table_name,
            headers,
            rows: Vec::new(),
            processed_records: Vec::new(),
            record_count: 0,
            validation: None,
        };
        next_index += 1;

        // Collect rows forward, bounded so a missed table end cannot swallow
        // the rest of the document.
        let scan_end = (i + 1 + options.row_scan_cap).min(lines.len());
        let mut j = i + 1;
        while j < scan_end {
            let candidate = &lines[j];
            if signal::is_section_break(&candidate.text, vocab) {
                break;
            }
            let cells = split_cells(&candidate.text, vocab, options);
            if !cells.is_empty() && cells.len() * 2 >= table.headers.len() {
                table.rows.push(cells);
            }
            j += 1;
        }

        open = Some(table);
        i = j;
    }

    close_table(&mut tables, open.take());
    tables
}

/// Push a finished table, discarding ones that never accumulated a row.
fn close_table(tables: &mut Vec<TableData>, open: Option<TableData>) {
    if let Some(table) = open {
        if !table.rows.is_empty() {
            tables.push(table);
        }
    }
}

/// Name a table from its header line, by keyword priority
/// (flora > fauna > species > data), with the NVR range-boundary variants
/// suffixed `_range`.
fn infer_table_name(line: &str, vocab: &Vocabulary) -> String {
    let lower = line.to_lowercase();
    for (keyword, name) in vocab.table_names {
        if lower.contains(keyword) {
            if lower.contains("range boundaries") {
                return format!("{name}_range");
            }
            return (*name).to_string();
        }
    }
    "data".to_string()
}

fn prepare_lines(text: &str) -> Vec<Line> {
    let mut page = 1;
    let mut lines = Vec::new();

    for raw in text.lines() {
        let feeds = raw.matches('\u{0C}').count();
        if feeds > 0 {
            page += feeds;
        }
        let cleaned = if feeds > 0 { raw.replace('\u{0C}', " ") } else { raw.to_string() };
        let trimmed = cleaned.trim();
        if !trimmed.is_empty() {
            lines.push(Line { page, text: trimmed.to_string() });
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DocumentType, Options};
    use crate::vocab;
    use pretty_assertions::assert_eq;

    fn detect(text: &str, doc: DocumentType) -> Vec<TableData> {
        detect_tables(text, vocab::for_document_type(doc), &Options::default())
    }

    #[test]
    fn detects_header_and_collects_rows() {
        let text = "Species  Common Name  Status  Location  Date\n\
                    Eucalyptus regnans  Mountain Ash  Endangered  Smith Creek  2023-01-01\n\
                    Aquila audax  Wedge-tailed Eagle  Endangered  Ridge Top  12/03/2022\n";
        let tables = detect(text, DocumentType::Generic);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers.len(), 5);
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[0].table_index, 0);
    }

    #[test]
    fn tolerant_alignment_boundary() {
        // 4 header cells: a 2-cell row is exactly half and accepted; a
        // 1-cell row is one short of that and rejected.
        let text = "Species  Common Name  Status  Location\n\
                    Acacia dealbata  Silver Wattle\n\
                    Unmatched\n";
        let tables = detect(text, DocumentType::Generic);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows, vec![vec!["Acacia dealbata".to_string(), "Silver Wattle".to_string()]]);
    }

    #[test]
    fn section_marker_stops_row_collection() {
        let text = "Species  Status  Count\n\
                    Acacia dealbata  Rare  4\n\
                    Table 3: Vegetation condition\n\
                    Banksia marginata  Vulnerable  2\n";
        let tables = detect(text, DocumentType::Generic);

        assert_eq!(tables[0].rows.len(), 1);
    }

    #[test]
    fn row_collection_is_capped() {
        let mut text = String::from("Species  Status  Count\n");
        for i in 0..60 {
            text.push_str(&format!("Acacia dealbata  Rare  {i}\n"));
        }
        let tables = detect(&text, DocumentType::Generic);

        assert_eq!(tables[0].rows.len(), Options::default().row_scan_cap);
    }

    #[test]
    fn form_feeds_advance_the_page_number() {
        // The appendix line both stops the first table's row scan (section
        // marker) and opens the second one (table marker).
        let text = "\u{0C}Species  Status  Count\n\
                    Acacia dealbata  Rare  4\n\
                    \u{0C}Appendix B: threatened species records\n\
                    Banksia marginata  Vulnerable  2\n";
        let tables = detect(text, DocumentType::Generic);

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].page_number, 2);
        assert_eq!(tables[1].page_number, 3);
    }

    #[test]
    fn table_names_follow_keyword_priority() {
        let cases: Vec<(&str, &str)> = vec![
            ("Threatened flora  Status  Count", "flora"),
            ("Threatened fauna  Status  Count", "fauna"),
            ("Species  Status  Count", "species"),
            ("Name  Value  Notes", "data"),
        ];
        for (header, expected) in cases {
            let text = format!("{header}\nAcacia dealbata  Rare  4\n");
            let tables = detect(&text, DocumentType::Generic);
            assert_eq!(tables[0].table_name, expected, "header: {header:?}");
        }
    }

    #[test]
    fn nvr_range_sections_get_range_names() {
        let text = "Threatened fauna within 5000 metres (based on Range Boundaries)\n\
                    Aquila audax  Wedge-tailed Eagle  Endangered\n";
        let tables = detect(text, DocumentType::Nvr);

        assert_eq!(tables[0].table_name, "fauna_range");
    }

    #[test]
    fn rowless_tables_are_discarded() {
        let tables = detect("Appendix A: Species lists\n", DocumentType::Generic);
        assert!(tables.is_empty());
    }

    #[test]
    fn prose_only_input_yields_no_tables() {
        let text = "This report describes the proposed development.\n\
                    It was prepared following two site visits.\n";
        assert!(detect(text, DocumentType::Generic).is_empty());
    }
}
