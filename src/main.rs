//! orientation-scores - admission score tables from orientation booklets

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use orientation_scores_lib::config::RunConfig;
use orientation_scores_lib::pipeline::processor::ProcessingError;

#[derive(Parser)]
#[command(name = "orientation-scores")]
#[command(
    version,
    about = "Extract admission score tables from Arabic orientation booklets",
    long_about = None
)]
#[command(after_help = "EXAMPLES:
    orientation-scores                          Read ./orientation_book.pdf
    orientation-scores guide.pdf -o out/        Write outputs into out/
    orientation-scores dump.txt --no-xlsx       Text dump, CSV only")]
struct Cli {
    /// Booklet to read: a PDF, or a text dump with form feeds between pages
    #[arg(value_name = "DOCUMENT")]
    document: Option<PathBuf>,

    /// JSON run configuration; flags given here take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for the output files
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Output file name without extension
    #[arg(long, value_name = "NAME")]
    stem: Option<String>,

    /// Skip the CSV output
    #[arg(long)]
    no_csv: bool,

    /// Skip the spreadsheet output
    #[arg(long)]
    no_xlsx: bool,

    /// Also write a JSON run summary to FILE
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    orientation_scores_lib::init_tracing();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<(), ProcessingError> {
    let config = resolve_config(cli)?;
    let outcome = orientation_scores_lib::run(&config)?;

    println!(
        "{} records from {} pages ({} skipped)",
        outcome.records.len(),
        outcome.pages_read,
        outcome.pages_skipped
    );
    if config.write_csv {
        println!("CSV: {}", config.csv_path().display());
    }
    if config.write_xlsx {
        println!("XLSX: {}", config.xlsx_path().display());
    }
    if let Some(summary) = &config.summary {
        println!("Summary: {}", summary.display());
    }
    Ok(())
}

/// Config file first, then command-line overrides.
fn resolve_config(cli: Cli) -> Result<RunConfig, ProcessingError> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    if let Some(document) = cli.document {
        config.document = document;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(stem) = cli.stem {
        config.output_stem = stem;
    }
    if cli.no_csv {
        config.write_csv = false;
    }
    if cli.no_xlsx {
        config.write_xlsx = false;
    }
    if let Some(summary) = cli.summary {
        config.summary = Some(summary);
    }

    Ok(config)
}
