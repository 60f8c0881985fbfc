//! Keyword vocabularies, keyed by document type.
//!
//! The engine itself contains no embedded keyword literals: every heuristic
//! that needs to know what a column label, a domain keyword, or a section
//! marker looks like reads it from the [`Vocabulary`] selected here. Adding
//! support for a new report family means adding a vocabulary, not editing the
//! detector.
//!
//! Three report families ship today:
//!
//! - **NVR** (Natural Values Report): the primary target. Carries the
//!   specialized section phrases ("Threatened flora within 5000 metres", ...)
//!   and the known run-together header signatures produced when that report's
//!   PDF tables are flattened to text.
//! - **PMR** (Protected Matters Report) and **BVD** (Biodiversity Values
//!   Database export): same engine, their own column-label lists.
//! - Everything else falls back to the generic structural vocabulary.
//!
//! All entries are lowercase; callers match against lowercased input.

use crate::api::DocumentType;

/// The full keyword configuration for one report family.
#[derive(Debug)]
pub(crate) struct Vocabulary {
    /// Column labels used by the tokenizer's anchored recovery, tried in
    /// listed order. Longer labels come first so that e.g. "scientific name"
    /// claims its span before "name" could.
    pub column_labels: &'static [&'static str],
    /// Domain keywords that mark a line as a header candidate.
    pub header_keywords: &'static [&'static str],
    /// Words that mark a line as a table caption ("table", "appendix").
    pub table_markers: &'static [&'static str],
    /// Words that signal a new section and stop row collection.
    pub section_markers: &'static [&'static str],
    /// Known run-together header fragments for this report family (header
    /// text whose separators were lost during text flattening).
    pub run_together_signatures: &'static [&'static str],
    /// `(keyword, table name)` pairs, in priority order; first hit names the
    /// table. Lines matching none are named "data".
    pub table_names: &'static [(&'static str, &'static str)],
}

const TABLE_MARKERS: &[&str] = &["table", "appendix"];

const SECTION_MARKERS: &[&str] = &["appendix", "section", "table", "figure"];

const TABLE_NAMES: &[(&str, &str)] = &[("flora", "flora"), ("fauna", "fauna"), ("species", "species")];

const GENERIC_KEYWORDS: &[&str] = &[
    "species",
    "scientific name",
    "common name",
    "conservation status",
    "threatened",
    "flora",
    "fauna",
    "habitat",
    "location",
    "recorded",
    "observed",
    "family",
    "genus",
    "endemic",
    "native",
    "exotic",
    "rare",
    "vulnerable",
    "endangered",
    "critically",
    "population",
    "distribution",
    "occurrence",
];

static GENERIC: Vocabulary = Vocabulary {
    column_labels: &[
        "scientific name",
        "conservation status",
        "common name",
        "observation count",
        "last recorded",
        "species",
        "status",
        "location",
        "locality",
        "easting",
        "northing",
        "accuracy",
        "date",
    ],
    header_keywords: GENERIC_KEYWORDS,
    table_markers: TABLE_MARKERS,
    section_markers: SECTION_MARKERS,
    run_together_signatures: &[],
    table_names: TABLE_NAMES,
};

// NVR tables come from ECOtas-style appendices; the section phrases below are
// the literal headings those reports use above their flora/fauna tables.
static NVR: Vocabulary = Vocabulary {
    column_labels: &[
        "scientific name",
        "conservation status",
        "common name",
        "observation count",
        "last recorded",
        "verified records",
        "species",
        "status",
        "location",
        "easting",
        "northing",
        "accuracy",
        "date",
    ],
    header_keywords: &[
        "species",
        "scientific name",
        "common name",
        "conservation status",
        "threatened",
        "flora",
        "fauna",
        "habitat",
        "location",
        "recorded",
        "observed",
        "family",
        "genus",
        "endemic",
        "native",
        "exotic",
        "rare",
        "vulnerable",
        "endangered",
        "critically",
        "population",
        "distribution",
        "occurrence",
        "verified records",
        "within 5000 metres",
        "range boundaries",
    ],
    table_markers: TABLE_MARKERS,
    section_markers: SECTION_MARKERS,
    run_together_signatures: &[
        "speciescommon name",
        "common namelast recorded",
        "namelast recorded",
        "observation countlast",
        "scientific namecommon",
        "statuslocation",
    ],
    table_names: TABLE_NAMES,
};

static PMR: Vocabulary = Vocabulary {
    column_labels: &[
        "scientific name",
        "common name",
        "threatened category",
        "type of presence",
        "presence",
        "status",
        "name",
    ],
    header_keywords: GENERIC_KEYWORDS,
    table_markers: TABLE_MARKERS,
    section_markers: SECTION_MARKERS,
    run_together_signatures: &[],
    table_names: TABLE_NAMES,
};

static BVD: Vocabulary = Vocabulary {
    column_labels: &[
        "scientific name",
        "conservation status",
        "common name",
        "observation count",
        "last recorded",
        "easting",
        "northing",
        "accuracy",
        "status",
    ],
    header_keywords: GENERIC_KEYWORDS,
    table_markers: TABLE_MARKERS,
    section_markers: SECTION_MARKERS,
    run_together_signatures: &[],
    table_names: TABLE_NAMES,
};

/// Look up the vocabulary for a document type.
pub(crate) fn for_document_type(document_type: DocumentType) -> &'static Vocabulary {
    match document_type {
        DocumentType::Nvr => &NVR,
        DocumentType::Pmr => &PMR,
        DocumentType::Bvd => &BVD,
        DocumentType::Generic => &GENERIC,
    }
}
