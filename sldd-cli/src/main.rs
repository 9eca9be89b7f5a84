//! SLDD Generator CLI
//!
//! Command-line front end for the sldd-gen library: converts a DBC network
//! matrix or a tabular parameter sheet into a Simulink Data Dictionary. The
//! output path is the input path with its extension replaced by `.sldd`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sldd_gen::ParameterKind;
use std::path::PathBuf;

/// SLDD Generator - Convert CAN matrices and parameter sheets to .sldd
#[derive(Parser, Debug)]
#[command(name = "sldd-cli")]
#[command(about = "Generate Simulink Data Dictionaries from DBC and parameter files", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a data dictionary from a DBC network matrix
    Dbc {
        /// Path to the DBC file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Generate a data dictionary from a tabular parameter sheet
    Params {
        /// Path to the parameter CSV file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Coder profile name (import_from_file or eco)
        #[arg(long, default_value = "import_from_file")]
        profile: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    log::info!("SLDD Generator CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using generator library v{}", sldd_gen::VERSION);

    match &args.command {
        Command::Dbc { input } => {
            println!("Generating dictionary for: {}", input.display());
            let output = sldd_gen::dbc_to_sldd(input)
                .with_context(|| format!("failed to convert {:?}", input))?;
            println!("Dictionary written to: {}", output.display());
        }
        Command::Params { input, profile } => {
            let kind = ParameterKind::from_name(profile)
                .with_context(|| format!("invalid --profile '{}'", profile))?;
            println!("Generating dictionary for: {}", input.display());
            let output = sldd_gen::params_to_sldd(input, kind)
                .with_context(|| format!("failed to convert {:?}", input))?;
            println!("Dictionary written to: {}", output.display());
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
