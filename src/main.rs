use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use otter_sheets::{
    convert_batch, prepare_batch, read_source_files, write_workbook, BatchConfig, DecodePolicy,
    LineLayout, ParseConfig, SheetNameConfig,
};

#[derive(Parser)]
#[command(name = "otter-sheets")]
#[command(author, version, about = "Convert Otter.ai transcripts to an Excel workbook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert transcript text files into one workbook, one sheet per file
    Convert {
        /// Transcript text files, in the order their sheets should appear
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output workbook
        #[arg(short, long, default_value = "transcripts_parsed.xlsx")]
        output: PathBuf,

        #[command(flatten)]
        parsing: ParsingArgs,

        /// Allow suffixed sheet names past 31 characters (the writer will reject them)
        #[arg(long)]
        legacy_sheet_names: bool,

        /// Leave out files that are not valid UTF-8 instead of failing
        #[arg(long)]
        skip_undecodable: bool,

        /// Write a JSON summary of the conversion
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report what would be converted without writing a workbook
    Inspect {
        /// Transcript text files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        parsing: ParsingArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(clap::Args)]
struct ParsingArgs {
    /// How header and text lines alternate in the input
    #[arg(long, value_enum, default_value_t = LineLayout::Paired)]
    layout: LineLayout,

    /// Regex for header lines; group 1 is the speaker, group 2 the timestamp
    #[arg(long)]
    header_pattern: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            inputs,
            output,
            parsing,
            legacy_sheet_names,
            skip_undecodable,
            summary,
            verbose,
        } => {
            setup_logging(verbose);
            let config = BatchConfig {
                parse: ParseConfig {
                    layout: parsing.layout,
                },
                sheet_names: SheetNameConfig {
                    clamp_to_limit: !legacy_sheet_names,
                    ..Default::default()
                },
                decode_policy: if skip_undecodable {
                    DecodePolicy::Skip
                } else {
                    DecodePolicy::Abort
                },
                header_pattern: parsing.header_pattern,
            };
            convert_transcripts(inputs, output, summary, &config)
        }
        Commands::Inspect {
            inputs,
            parsing,
            verbose,
        } => {
            setup_logging(verbose);
            let config = BatchConfig {
                parse: ParseConfig {
                    layout: parsing.layout,
                },
                decode_policy: DecodePolicy::Skip,
                header_pattern: parsing.header_pattern,
                ..Default::default()
            };
            inspect_transcripts(inputs, &config)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn convert_transcripts(
    inputs: Vec<PathBuf>,
    output: PathBuf,
    summary_path: Option<PathBuf>,
    config: &BatchConfig,
) -> Result<()> {
    info!("Reading {} transcript files", inputs.len());
    let sources = read_source_files(&inputs).context("Failed to read input transcripts")?;

    let (workbook, summary) =
        convert_batch(&sources, config).context("Failed to convert transcripts")?;
    write_workbook(&workbook, &output).context("Failed to write workbook")?;

    if let Some(path) = summary_path {
        summary.write_json(&path)?;
        info!("Summary written to {:?}", path);
    }

    info!(
        "Complete: {} sheets, {} records, {} files skipped",
        summary.sheets_written, summary.total_records, summary.files_skipped
    );

    Ok(())
}

fn inspect_transcripts(inputs: Vec<PathBuf>, config: &BatchConfig) -> Result<()> {
    let sources = read_source_files(&inputs).context("Failed to read input transcripts")?;
    let prepared = prepare_batch(&sources, config).context("Failed to parse transcripts")?;

    println!("Transcript Analysis");
    println!("===================");
    print!("{}", prepared.summary.format());

    Ok(())
}
