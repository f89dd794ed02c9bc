//! holidaylet-ref - Inspect booking references.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use holidaylet_core::{BusinessConfig, ReferenceCodec};
use holidaylet_loader::{load_settings, Settings};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Decode or encode booking references.
#[derive(Parser, Debug)]
#[command(name = "holidaylet-ref")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Business epoch the year offset counts from (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    pub epoch: Option<NaiveDate>,

    /// Settings file; used for the epoch and to look up the property
    #[arg(short, long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the fields packed into a reference
    Decode {
        /// The booking reference, e.g. 6ASJUN1719
        reference: String,
    },
    /// Build the reference for a stay
    Encode {
        /// Two-letter property code
        #[arg(short, long)]
        property: String,
        /// Arrival date (YYYY-MM-DD)
        #[arg(short, long)]
        arrival: NaiveDate,
        /// Departure date (YYYY-MM-DD)
        #[arg(short, long)]
        departure: NaiveDate,
    },
}

/// Main entry point for the ref command.
pub fn main() -> ExitCode {
    let args = Args::parse();
    super::init_tracing(args.verbose, false);

    let mut stdout = io::stdout().lock();
    match run(&args, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Run the command, writing the result to `out`.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let settings = args.settings.as_deref().map(load).transpose()?;
    let mut business = settings
        .as_ref()
        .map_or_else(BusinessConfig::default, |s| s.business.clone());
    if let Some(epoch) = args.epoch {
        business.epoch = epoch;
    }
    let codec = ReferenceCodec::new(&business);

    match &args.command {
        Command::Decode { reference } => {
            let decoded = codec.decode(reference)?;
            let property = match &settings {
                Some(s) => {
                    let p = s.catalog.resolve(&decoded.property_code)?;
                    format!("{} ({})", decoded.property_code, p.long_name)
                }
                None => decoded.property_code.clone(),
            };

            writeln!(out, "reference:  {reference}")?;
            writeln!(out, "year:       {} (offset {})", decoded.year, decoded.year_offset)?;
            writeln!(out, "property:   {property}")?;
            writeln!(out, "arrival:    {}", decoded.arrival)?;
            writeln!(out, "departure:  {}", decoded.departure)?;
            writeln!(out, "nights:     {}", decoded.nights())?;
        }
        Command::Encode {
            property,
            arrival,
            departure,
        } => {
            if let Some(s) = &settings {
                s.catalog.resolve(property)?;
            }
            writeln!(out, "{}", codec.encode(property, *arrival, *departure)?)?;
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<Settings> {
    load_settings(path).with_context(|| format!("Failed to load settings from {}", path.display()))
}
