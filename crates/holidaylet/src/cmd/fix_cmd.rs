//! holidaylet-fix - Reconcile a booking spreadsheet.
//!
//! Reads the raw bookings, recomputes every row against the property
//! settings with all services charged, and writes the corrected sheet.
//!
//! # Usage
//!
//! ```bash
//! holidaylet-fix bookings.csv --settings settings.json --output out.csv
//! holidaylet-fix export.csv --has-header --party-size-column 11 --gross-column 12
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use holidaylet_booking::{reconcile, ReconciledRow};
use holidaylet_importer::{write_rows_to_file, ImportConfig};
use holidaylet_loader::load_settings;
use rayon::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;

/// Reconcile booking spreadsheets against property settings.
#[derive(Parser, Debug)]
#[command(name = "holidaylet-fix")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The booking spreadsheet to fix
    #[arg(value_name = "FILE", default_value = "bookings.csv")]
    pub file: PathBuf,

    /// Settings file describing every property
    #[arg(short, long, value_name = "FILE", default_value = "settings.json")]
    pub settings: PathBuf,

    /// Where to write the corrected spreadsheet
    #[arg(short, long, value_name = "FILE", default_value = "out.csv")]
    pub output: PathBuf,

    /// Override the business epoch from the settings (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub epoch: Option<NaiveDate>,

    /// The spreadsheet starts with a header row
    #[arg(long)]
    pub has_header: bool,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Treat unknown source labels as booking.com instead of rejecting the row
    #[arg(long)]
    pub lenient_sources: bool,

    /// Zero-based column index of the party size
    #[arg(long, value_name = "INDEX")]
    pub party_size_column: Option<usize>,

    /// Zero-based column index of the gross amount
    #[arg(long, value_name = "INDEX")]
    pub gross_column: Option<usize>,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Main entry point for the fix command.
pub fn main() -> ExitCode {
    let args = Args::parse();
    super::init_tracing(args.verbose, args.quiet);

    match run(&args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Run the batch. Rejected rows give exit code 1; failures that stop the
/// whole run are returned as errors.
pub fn run(args: &Args) -> Result<ExitCode> {
    let mut settings = load_settings(&args.settings)?;
    if let Some(epoch) = args.epoch {
        settings.business.epoch = epoch;
    }

    let mut builder = ImportConfig::builder()
        .has_header(args.has_header)
        .delimiter(args.delimiter)
        .lenient_sources(args.lenient_sources);
    if let Some(index) = args.party_size_column {
        builder = builder.party_size_column(index);
    }
    if let Some(index) = args.gross_column {
        builder = builder.gross_column(index);
    }
    let imported = builder.build().import(&args.file)?;

    for warning in &imported.warnings {
        if !args.quiet {
            eprintln!("warning: {warning}");
        }
    }

    let results: Vec<_> = imported
        .records
        .par_iter()
        .map(|input| {
            reconcile(input, &settings.catalog, &settings.business)
                .map_err(|e| (input.reference.as_str(), e))
        })
        .collect();

    let mut rows: Vec<ReconciledRow> = Vec::with_capacity(results.len());
    let mut rejected = imported.rejected;
    for result in results {
        match result {
            Ok(row) => rows.push(row),
            Err((reference, e)) => {
                rejected += 1;
                if !args.quiet {
                    eprintln!("warning: {reference}: {e}");
                }
            }
        }
    }

    write_rows_to_file(&args.output, &rows)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if !args.quiet {
        eprintln!(
            "Reconciled {} bookings from {} into {} ({} rejected)",
            rows.len(),
            args.file.display(),
            args.output.display(),
            rejected
        );
    }

    Ok(if rejected == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
