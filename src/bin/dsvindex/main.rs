//! dsvindex CLI tool for indexing and querying delimited files.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dsvindex::{DsvConfig, DsvIndex};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "dsvindex")]
#[command(about = "Parallel offset indexing for delimited files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// DSV operations (generate, index, query)
    Dsv(DsvCommand),
}

#[derive(Debug, Parser)]
struct DsvCommand {
    #[command(subcommand)]
    command: DsvSubcommand,
}

#[derive(Debug, Subcommand)]
enum DsvSubcommand {
    /// Generate synthetic DSV files for benchmarking and testing
    Generate(GenerateDsv),
    /// Index a file and report its shape
    Info(InfoArgs),
    /// Print a single cell
    Get(GetArgs),
    /// Print one column, one cell per line
    Column(ColumnArgs),
}

/// Generate synthetic DSV files for benchmarking and testing
#[derive(Debug, Parser)]
struct GenerateDsv {
    /// Size of DSV to generate (supports b, kb, mb, gb - case insensitive)
    /// Examples: 1024, 1kb, 512MB, 2Gb
    #[arg(value_parser = parse_size)]
    size: usize,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// DSV pattern to generate
    #[arg(short, long, default_value = "tabular")]
    pattern: PatternArg,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Field delimiter (single character, or "tab")
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Omit the header record
    #[arg(long)]
    no_header: bool,
}

#[derive(Debug, Clone, ValueEnum)]
enum PatternArg {
    /// Standard tabular data with mixed types (default)
    Tabular,
    /// Numeric-heavy data (financial, scientific)
    Numeric,
    /// Wide tables (many columns)
    Wide,
    /// Narrow but long tables (few columns, many rows)
    Long,
}

impl From<PatternArg> for generators::DsvPattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Tabular => generators::DsvPattern::Tabular,
            PatternArg::Numeric => generators::DsvPattern::Numeric,
            PatternArg::Wide => generators::DsvPattern::Wide,
            PatternArg::Long => generators::DsvPattern::Long,
        }
    }
}

/// Options shared by every command that builds an index.
#[derive(Debug, Args)]
struct IndexArgs {
    /// Input file
    file: PathBuf,

    /// Field delimiter (single character, or "tab")
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Treat the first indexed record as a header
    #[arg(long)]
    header: bool,

    /// Leading records to leave out of the index
    #[arg(long, default_value = "0")]
    skip: usize,

    /// Worker threads (0 = one per CPU)
    #[arg(short, long, default_value = "0")]
    threads: usize,
}

impl IndexArgs {
    fn open(&self) -> Result<DsvIndex> {
        let config = DsvConfig::csv()
            .with_delimiter(self.delimiter)
            .with_header(self.header)
            .with_skip_rows(self.skip)
            .with_num_threads(self.threads);
        DsvIndex::open(&self.file, config)
            .with_context(|| format!("Failed to index {}", self.file.display()))
    }
}

#[derive(Debug, Parser)]
struct InfoArgs {
    #[command(flatten)]
    index: IndexArgs,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct GetArgs {
    #[command(flatten)]
    index: IndexArgs,

    /// Data row (0-indexed, header excluded)
    row: usize,

    /// Column (0-indexed)
    column: usize,
}

#[derive(Debug, Parser)]
struct ColumnArgs {
    #[command(flatten)]
    index: IndexArgs,

    /// Column (0-indexed)
    column: usize,

    /// First data row to print
    #[arg(long, default_value = "0")]
    start: usize,

    /// Row after the last one to print (defaults to all rows)
    #[arg(long)]
    end: Option<usize>,
}

#[derive(Debug, Serialize)]
struct InfoReport {
    bytes: usize,
    rows: usize,
    columns: usize,
    workers: usize,
    has_header: bool,
    header: Option<Vec<String>>,
}

/// Parse size string like "1mb", "512KB", "2GB", "1024" (case insensitive)
fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim().to_lowercase();

    // Try parsing as plain number first
    if let Ok(bytes) = s.parse::<usize>() {
        return Ok(bytes);
    }

    let (num_str, unit) = if let Some(n) = s.strip_suffix("gb") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("mb") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("kb") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('b') {
        (n, 1)
    } else {
        return Err(format!(
            "Invalid size format: '{}'. Use format like '1mb', '512KB', or '1024'",
            s
        ));
    };

    num_str
        .trim()
        .parse::<usize>()
        .map(|n| n * unit)
        .map_err(|_| format!("Invalid number in size: '{}'", s))
}

/// Parse a single-byte delimiter: one ASCII character, "tab" or "\t".
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [byte] if byte.is_ascii() && *byte != b'\n' => Ok(*byte),
            _ => Err(format!(
                "Invalid delimiter: '{}'. Use a single ASCII character or 'tab'",
                s
            )),
        },
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Dsv(dsv_cmd) => match dsv_cmd.command {
            DsvSubcommand::Generate(args) => run_generate(args),
            DsvSubcommand::Info(args) => run_info(args),
            DsvSubcommand::Get(args) => run_get(args),
            DsvSubcommand::Column(args) => run_column(args),
        },
    }
}

fn run_generate(args: GenerateDsv) -> Result<()> {
    let dsv = generate_dsv(
        args.size,
        args.pattern.into(),
        args.seed,
        char::from(args.delimiter),
        !args.no_header,
    );

    match args.output {
        Some(path) => {
            std::fs::write(&path, &dsv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✓ Wrote {} bytes to {}", dsv.len(), path.display());
        }
        None => {
            print!("{}", dsv);
        }
    }

    Ok(())
}

fn run_info(args: InfoArgs) -> Result<()> {
    let index = args.index.open()?;
    let report = InfoReport {
        bytes: index.source().len(),
        rows: index.rows(),
        columns: index.columns(),
        workers: index.workers(),
        has_header: index.has_header(),
        header: index
            .header()
            .map(|row| row.cells().map(|c| c.to_string()).collect()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("bytes:   {}", report.bytes);
        println!("rows:    {}", report.rows);
        println!("columns: {}", report.columns);
        println!("workers: {}", report.workers);
        if let Some(header) = &report.header {
            println!("header:  {}", header.join(", "));
        }
    }

    Ok(())
}

fn run_get(args: GetArgs) -> Result<()> {
    let index = args.index.open()?;
    let cell = index.get(args.row, args.column)?;

    let mut out = std::io::stdout().lock();
    out.write_all(cell.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

fn run_column(args: ColumnArgs) -> Result<()> {
    let index = args.index.open()?;
    let end = args.end.unwrap_or(index.rows());
    let column = index.get_column_range(args.column, args.start..end)?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    for cell in column {
        out.write_all(cell.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

mod dsv_generators;
use dsv_generators as generators;
use generators::generate_dsv;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        // Plain numbers
        assert_eq!(parse_size("1024").unwrap(), 1024);

        // Bytes (case insensitive)
        assert_eq!(parse_size("100b").unwrap(), 100);
        assert_eq!(parse_size("100B").unwrap(), 100);

        // Kilobytes and up
        assert_eq!(parse_size("1KB").unwrap(), 1024);
        assert_eq!(parse_size("512kb").unwrap(), 512 * 1024);
        assert_eq!(parse_size("10Mb").unwrap(), 10 * 1024 * 1024);
        assert_eq!(parse_size("2gb").unwrap(), 2 * 1024 * 1024 * 1024);

        // With whitespace
        assert_eq!(parse_size(" 1mb ").unwrap(), 1024 * 1024);

        // Errors
        assert!(parse_size("abc").is_err());
        assert!(parse_size("1tb").is_err());
        assert!(parse_size("").is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("|").unwrap(), b'|');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');

        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("\n").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_cli_parses_column_command() {
        let cli = Cli::try_parse_from([
            "dsvindex", "dsv", "column", "data.tsv", "2", "-d", "tab", "--header", "--end", "10",
        ])
        .unwrap();

        let Command::Dsv(DsvCommand {
            command: DsvSubcommand::Column(args),
        }) = cli.command
        else {
            panic!("expected column command");
        };
        assert_eq!(args.column, 2);
        assert_eq!(args.end, Some(10));
        assert_eq!(args.index.delimiter, b'\t');
        assert!(args.index.header);
    }
}
