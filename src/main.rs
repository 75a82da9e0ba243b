// src/main.rs
mod batch;
mod documents;
mod extractors;
mod models;
mod storage;
mod utils;
mod validation;

use batch::BatchAssembler;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use storage::StorageManager;
use utils::AppError;
use validation::ValidatorConfig;

/// Command Line Interface for the exam document extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract one record per document page into a JSON array
    Extract {
        /// Input folder with PDF (or form-feed separated .txt) documents
        #[arg(short, long, default_value = "doc/berufe")]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long, default_value = "doc/berufe/berufe.json")]
        output: PathBuf,

        /// Also write the per-page intermediate fields to this file
        #[arg(long)]
        pages_output: Option<PathBuf>,
    },

    /// Validate an extracted batch against a JSON schema
    Validate {
        /// Schema JSON file (defaults to the bundled record schema)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Input JSON file (array)
        #[arg(short, long, default_value = "doc/berufe/berufe.json")]
        input: PathBuf,

        /// Error details listed per invalid record
        #[arg(long, env = "BERUFE_MAX_ERRORS", default_value_t = validation::report::DEFAULT_MAX_ERRORS)]
        max_errors: usize,

        /// Invalid records listed in the report
        #[arg(long, env = "BERUFE_MAX_REPORTED", default_value_t = validation::report::DEFAULT_MAX_REPORTED)]
        max_reported: usize,
    },
}

fn main() -> ExitCode {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);

    // 3. Dispatch
    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Extract { input, output, pages_output } => {
            let assembler = BatchAssembler::new().with_page_records(pages_output.is_some());
            let result = assembler.run(&input)?;

            let path = StorageManager::new(&output).save_batch(&result.records)?;
            tracing::info!("Wrote {} records to {}", result.records.len(), path.display());

            if let Some(pages_path) = pages_output {
                StorageManager::new(&pages_path).save_batch(&result.pages)?;
            }
            Ok(())
        }
        Command::Validate { schema, input, max_errors, max_reported } => {
            let schema = validation::load_schema(schema.as_deref())?;
            let config = ValidatorConfig { max_errors, max_reported };
            let report = validation::validate_file(&schema, &input, config)?;

            print!("{}", report);
            if report.is_valid() {
                Ok(())
            } else {
                Err(AppError::InvalidRecords {
                    invalid: report.invalid.len(),
                    total: report.total,
                })
            }
        }
    }
}
