use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use chapbook_core::{Assembler, BookConfig, EscapeTable, HttpSource, parse_url};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod echo;

use echo::{print_banner, print_error, print_info, print_report, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reserved-character table used for sanitizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    Xelatex,
    Standard,
}

impl FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xelatex" => Ok(Self::Xelatex),
            "standard" => Ok(Self::Standard),
            _ => Err(format!("Invalid table: {}. Valid options: xelatex, standard", s)),
        }
    }
}

impl From<Table> for EscapeTable {
    fn from(table: Table) -> Self {
        match table {
            Table::Xelatex => EscapeTable::xelatex(),
            Table::Standard => EscapeTable::standard(),
        }
    }
}

/// Download a chaptered web novel into a XeLaTeX book
#[derive(Parser, Debug)]
#[command(name = "chapbook")]
#[command(author = "Chapbook Contributors")]
#[command(version)]
#[command(about = "Download a chaptered web novel into a XeLaTeX book", long_about = None)]
struct Args {
    /// Index (table of contents) page of the book
    #[arg(value_name = "URL")]
    url: String,

    /// Directory receiving the master document, chapters/ and template/
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    output_dir: PathBuf,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Attempts per chapter while its content comes back empty
    #[arg(long, default_value = "3", value_name = "NUM")]
    retries: u32,

    /// Reserved-character table (xelatex, standard)
    #[arg(long, default_value = "xelatex", value_name = "TABLE")]
    table: Table,

    /// Print the table of contents as JSON and exit
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_filter(env_filter),
        )
        .init();
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let started = Instant::now();
    let index_url = parse_url(&args.url).context("Invalid index URL")?;

    let config = BookConfig::builder()
        .output_dir(&args.output_dir)
        .timeout(args.timeout)
        .max_retries(args.retries)
        .escape_table(args.table.into())
        .build();

    let source = HttpSource::new(&config.fetch).context("Failed to build HTTP client")?;
    let assembler = Assembler::new(source, config).context("Invalid configuration")?;

    if args.list {
        let book = assembler.fetch_index(&index_url).await.context("Failed to read index")?;
        println!("{}", serde_json::to_string_pretty(&book)?);
        return Ok(());
    }

    if args.verbose {
        print_step(
            1,
            2,
            &format!("Fetching {}", index_url.as_str().bright_white().underline()),
        );
        print_info(&format!("Output directory: {}", assembler.config().output_dir.display()));
    }

    let report = assembler
        .assemble_book(&index_url)
        .await
        .with_context(|| format!("Failed to assemble book from {}", index_url))?;

    if args.verbose {
        print_step(2, 2, "Writing summary");
        print_report(&report, started.elapsed());
    }

    if !report.degraded.is_empty() {
        print_warning(&format!(
            "{} of {} chapters were written title-only",
            report.degraded.len(),
            report.chapters
        ));
    }

    print_success(&format!("Book written to {}", report.master_path.display().bright_white()));
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing(args.verbose);
    if args.verbose {
        print_banner();
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
