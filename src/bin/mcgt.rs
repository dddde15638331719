//! mcgt CLI - Multi-cell grid table converter

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use mcgtable::{
    check_grid_table, convert_grid_table_text, diagnostics::format_diagnostics, filter_markdown,
    looks_like_grid_table, ContentFormat, GridTableOptions, GridTableResult, Report, Target,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "mcgt")]
#[command(version)]
#[command(about = "Convert multi-cell grid tables to HTML or DocBook", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Output tag dialect
    #[arg(short, long, value_enum, default_value_t = TargetArg::Html)]
    target: TargetArg,

    /// Treat the input as a Markdown document and render its ```mcgtable blocks
    #[arg(long)]
    filter: bool,

    /// Take cell text literally instead of rendering it as Markdown
    #[arg(long)]
    plain: bool,

    /// Use <td> for header cells too
    #[arg(long)]
    no_header_cells: bool,

    /// Check mode - parse the table and report problems without converting
    #[arg(long)]
    check: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// Strict mode: exit with error if any warnings occur
    #[arg(long)]
    strict: bool,

    /// Suppress diagnostics on stderr
    #[arg(short, long)]
    quiet: bool,

    /// Log parser and resolver activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    /// HTML table
    Html,
    /// DocBook (CALS) table
    Docbook,
    /// Check only, echo the input unchanged
    #[value(name = "none")]
    Passthrough,
}

#[cfg(feature = "cli")]
impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Html => Target::Html,
            TargetArg::Docbook => Target::DocBook,
            TargetArg::Passthrough => Target::Passthrough,
        }
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(report) => exit_on_failure(&report, cli.strict),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

/// Read, convert and write; returns the diagnostics of the conversion
#[cfg(feature = "cli")]
fn run(cli: &Cli) -> GridTableResult<Report> {
    let input = read_input(cli.input_file.as_deref())?;

    // If check mode, analyze and report issues
    if cli.check {
        let report = check_grid_table(&input);
        println!("{}", format_diagnostics(&report, !cli.no_color));
        return Ok(report);
    }

    if !cli.filter && !looks_like_grid_table(&input) {
        tracing::info!(
            "input does not start with a row separator, use --filter for Markdown documents"
        );
    }

    let options = GridTableOptions {
        target: cli.target.into(),
        content: if cli.plain {
            ContentFormat::Plain
        } else {
            ContentFormat::Markdown
        },
        header_cells: !cli.no_header_cells,
    };

    let (result, report) = if cli.filter {
        let output = filter_markdown(&input, &options);
        (output.text, output.report)
    } else {
        let output = convert_grid_table_text(&input, &options);
        (output.to_text(), output.report)
    };

    // Print diagnostics to stderr (unless quiet mode)
    if !cli.quiet && !report.is_empty() {
        eprintln!("{}", format_diagnostics(&report, !cli.no_color));
    }

    // Output
    match cli.output {
        Some(ref path) => {
            let mut file = fs::File::create(path)?;
            file.write_all(result.as_bytes())?;
            if !cli.quiet {
                eprintln!("✓ Output written to: {}", path);
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(result.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(report)
}

/// Input file contents, or stdin when no file is given
#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> GridTableResult<String> {
    let input = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(input)
}

/// Exit with status 1 on errors, or on warnings in strict mode
#[cfg(feature = "cli")]
fn exit_on_failure(report: &Report, strict: bool) {
    if report.has_errors() {
        std::process::exit(1);
    }
    if strict && report.warnings > 0 {
        eprintln!("Error: {} warning(s) in strict mode", report.warnings);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install mcgtable --features cli");
    eprintln!("  mcgt [OPTIONS] [INPUT_FILE]");
}
