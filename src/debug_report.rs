use ecotab::{ExtractionReportVerbose, TableCounters};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(source: &str, res: &ExtractionReportVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Extracting: {source}"), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Tables ━━━", ansi::GRAY));
    if res.details.tables.is_empty() {
        println!("{}", palette.dim("  No tables detected"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • No line carried enough header signals (keywords, markers, cell shape)");
        println!("  • The document type's vocabulary doesn't match this report");
        println!("\n{}", palette.dim("  Tip: Set ECOTAB_DEBUG=1 to see detection traces"));
    } else {
        for counters in &res.details.tables {
            print_table(counters, &palette);
        }
    }

    if !res.details.aggregates.is_empty() {
        println!("\n{}", palette.paint("━━━ Species ━━━", ansi::GRAY));
        for agg in &res.details.aggregates {
            let common = agg.common_name.as_deref().unwrap_or("-");
            println!(
                "  {} {} {} {}",
                palette.bold(palette.paint(&agg.scientific_name, ansi::GREEN)),
                palette.dim(format!("({common})")),
                palette.dim("│"),
                palette.paint(
                    format!("{} record(s), {} location(s)", agg.record_count, agg.locations.len()),
                    ansi::YELLOW
                ),
            );
        }
    }

    let validation = &res.report.validation;
    println!("\n{}", palette.paint("━━━ Quality ━━━", ansi::GRAY));
    println!(
        "  Tables: {}/{}  │  Records: {}/{}  │  Score: {}",
        palette.paint(validation.valid_tables.to_string(), ansi::GREEN),
        validation.total_tables,
        palette.paint(validation.valid_records.to_string(), ansi::GREEN),
        validation.total_records,
        palette.bold(palette.paint(format!("{}%", validation.quality_score), ansi::CYAN)),
    );
    for warning in &validation.warnings {
        println!("  {} {}", palette.paint("⚠", ansi::YELLOW), warning);
    }
    if let Some(error) = &res.report.error {
        println!("  {} {}", palette.paint("✗", ansi::YELLOW), error);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Detect: {}  │  Validate: {}",
        palette.paint(format!("{:?}", res.details.metrics.total), ansi::GREEN),
        palette.paint(format!("{:?}", res.details.metrics.detect), ansi::CYAN),
        palette.dim(format!("{:?}", res.details.metrics.validate)),
    );
    println!();
}

fn print_table(counters: &TableCounters, palette: &ansi::Palette) {
    let status = if counters.dropped {
        palette.dim("✗ dropped".to_string())
    } else {
        palette.paint("✓ kept", ansi::GREEN)
    };
    println!(
        "  {} {} {}",
        palette.paint(format!("[{}]", counters.table_index), ansi::GRAY),
        palette.bold(palette.paint(&counters.label, ansi::BLUE)),
        status,
    );
    println!(
        "      {} {}  {} {}  {} {}  {} {}",
        palette.dim("headers:"),
        counters.header_count,
        palette.dim("rows:"),
        counters.raw_rows,
        palette.dim("candidates:"),
        counters.candidates,
        palette.dim("valid:"),
        palette.paint(counters.valid_records.to_string(), ansi::YELLOW),
    );
}
