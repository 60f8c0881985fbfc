mod debug_report;

use ecotab::{DocumentType, Options, extract_verbose_with};
use std::io::{self, IsTerminal, Read};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let text = match read_input(&config.file) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let res = extract_verbose_with(&text, config.document_type, &Options::default());

    if config.json {
        match serde_json::to_string_pretty(&res.report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to serialize report: {err}");
                std::process::exit(1);
            }
        }
    } else {
        let source = config.file.as_deref().unwrap_or("<stdin>");
        debug_report::print_run(source, &res, config.color);
    }

    if !res.report.success {
        std::process::exit(1);
    }
}

struct CliConfig {
    file: Option<String>,
    document_type: DocumentType,
    json: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut file: Option<String> = None;
    let mut document_type = DocumentType::Nvr;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("ecotab {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--json" => json = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--type" | "-t" => {
                let value = args.next().ok_or_else(|| "error: --type expects a value".to_string())?;
                document_type = value.parse().map_err(|e| format!("error: {e}"))?;
            }
            _ if arg.starts_with("--type=") => {
                let value = arg.trim_start_matches("--type=");
                document_type = value.parse().map_err(|e| format!("error: {e}"))?;
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                if file.is_some() {
                    return Err("error: input file provided multiple times".to_string());
                }
                file = Some(arg);
            }
        }
    }

    Ok(CliConfig { file, document_type, json, color })
}

/// Reads the named file, or stdin when no file (or `-`) was given.
fn read_input(file: &Option<String>) -> Result<String, String> {
    match file.as_deref() {
        Some("-") | None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("error: failed to read stdin: {err}"))?;
            Ok(buffer)
        }
        Some(path) => {
            std::fs::read_to_string(path).map_err(|err| format!("error: failed to read '{path}': {err}"))
        }
    }
}

fn help_text() -> String {
    format!(
        "ecotab {version}

Extracts species observation tables from linearized report text.

Usage:
  ecotab [OPTIONS] [FILE]

Reads FILE, or stdin when FILE is omitted or '-'.

Options:
  -t, --type <TYPE>    Document type: NVR, PMR, BVD, or GENERIC.
                       Default: NVR
  --json               Print the extraction report as JSON.
  --color              Force ANSI color output.
  --no-color           Disable ANSI color output.
  -h, --help           Show this help message.
  -V, --version        Print version information.

Exit codes:
  0  Success (including runs that found no tables).
  1  Extraction failed (empty or unreadable input).
  2  Invalid arguments or unreadable file.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
