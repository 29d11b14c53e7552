use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{
    combine::{self, CombineArgs},
    extract::{self, ExtractArgs},
    format::{self, FormatArgs},
    inspect::{self, InspectArgs},
};
use log::{error, LevelFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "hic-post",
    version,
    about = "Post-processing of UrQMD f15 output into per-species tables"
)]
struct Cli {
    /// Print debug messages.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only print warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read f15 event files and write a result bundle.
    Extract(ExtractArgs),
    /// Merge result bundles from independent runs of the same setup.
    Combine(CombineArgs),
    /// Write the mean-pt, yield and multiplicity tables of an energy scan.
    Format(FormatArgs),
    /// Print a bundle summary as canonical JSON.
    Inspect(InspectArgs),
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Help and version requests are not failures.
            return if err.use_stderr() {
                ExitCode::from(commands::USAGE_EXIT)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let outcome = match cli.command {
        Command::Extract(args) => extract::run(&args),
        Command::Combine(args) => combine::run(&args),
        Command::Format(args) => format::run(&args),
        Command::Inspect(args) => inspect::run(&args),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(commands::exit_code(&err))
        }
    }
}
