//! Command-line interface for the vacuo DFA emptiness analyzer.

use clap::Parser;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vacuo_analysis::{analyze, Verdict};
use vacuo_automaton::load_value;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VACUO_GIT_HASH"),
    " ",
    env!("VACUO_GIT_DATE"),
    ")"
);

/// CLI error with source context for pretty printing.
#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("input file does not exist: '{path}' ({message})")]
    Io { path: String, message: String },

    #[error("input file is not valid JSON: {message}")]
    #[diagnostic(code(vacuo::json_error))]
    Json {
        message: String,
        #[source_code]
        src: NamedSource<Arc<String>>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("{message}")]
    Load { message: String },

    #[error("failed to write output file '{path}': {message}")]
    Write { path: String, message: String },
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "vacuo", version = VERSION)]
#[command(about = "DFA language-emptiness analyzer", long_about = None)]
struct Cli {
    /// DFA description to analyze (JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// The single structured result the tool persists.
#[derive(Debug, Serialize)]
struct AnalysisReport {
    language_is_empty: bool,
}

fn main() {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap renders its own usage/help text; errors exit 1, --help
            // and --version exit 0.
            let is_error = e.use_stderr();
            let _ = e.print();
            std::process::exit(if is_error { 1 } else { 0 });
        }
    };

    // Initialize logging. Diagnostics go to stderr; stdout carries only the
    // result status lines.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(&cli.input) {
        let report = miette::Report::new(e);
        eprintln!("Error: {report}");
        if cli.verbose {
            eprintln!("{report:?}");
        }
        std::process::exit(1);
    }
}

fn run(input: &Path) -> CliResult<()> {
    let filename = input.display().to_string();
    let source = Arc::new(fs::read_to_string(input).map_err(|e| CliError::Io {
        path: filename.clone(),
        message: e.to_string(),
    })?);

    info!("loading {filename}...");
    let document: serde_json::Value =
        serde_json::from_str(&source).map_err(|e| json_error(e, source.clone(), &filename))?;
    let dfa = load_value(&document).map_err(|e| CliError::Load {
        message: e.to_string(),
    })?;
    info!(
        states = dfa.num_states(),
        symbols = dfa.num_symbols(),
        "automaton loaded"
    );

    info!("analyzing...");
    let start = Instant::now();
    let verdict = analyze(&dfa);
    let elapsed = start.elapsed();
    info!(
        states_reached = verdict.states_reached(),
        elapsed_us = elapsed.as_micros() as u64,
        "analysis complete"
    );

    if let Verdict::NonEmpty { witness, .. } = &verdict {
        if witness.is_empty() {
            info!("shortest accepted string: ε (the empty string)");
        } else {
            info!("shortest accepted string: {}", witness.join(" "));
        }
    }

    let report = AnalysisReport {
        language_is_empty: verdict.language_is_empty(),
    };
    let out_path = output_path(input);
    let rendered = serde_json::to_string_pretty(&report).map_err(|e| CliError::Write {
        path: out_path.display().to_string(),
        message: e.to_string(),
    })?;
    fs::write(&out_path, &rendered).map_err(|e| CliError::Write {
        path: out_path.display().to_string(),
        message: e.to_string(),
    })?;

    println!("Output written to: {}", out_path.display());
    println!(
        "Analysis complete. Language is {}.",
        if report.language_is_empty {
            "empty"
        } else {
            "not empty"
        }
    );

    Ok(())
}

/// Name the output file after the input: a trailing `.json` suffix becomes
/// `_output.json`; any other name gets `_output.json` appended.
fn output_path(input: &Path) -> PathBuf {
    let name = input.as_os_str().to_string_lossy();
    match name.strip_suffix(".json") {
        Some(stem) => PathBuf::from(format!("{stem}_output.json")),
        None => PathBuf::from(format!("{name}_output.json")),
    }
}

fn json_error(e: serde_json::Error, source: Arc<String>, filename: &str) -> CliError {
    let offset = byte_offset(&source, e.line(), e.column());
    CliError::Json {
        message: e.to_string(),
        src: NamedSource::new(filename, source),
        span: (offset, 0usize).into(),
    }
}

/// Convert serde_json's 1-based line/column into a byte offset.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    let mut remaining = line.saturating_sub(1);
    for l in source.split_inclusive('\n') {
        if remaining == 0 {
            break;
        }
        offset += l.len();
        remaining -= 1;
    }
    (offset + column.saturating_sub(1)).min(source.len())
}
