//! OxiBWT CLI - block-sorting preprocessor filters.
//!
//! Each filter reads a whole stream, transforms it in memory and writes the
//! result, so stages compose with shell pipes.

mod commands;
mod utils;

use clap::{Args, Parser, Subcommand};
use commands::{Stage, cmd_stats, cmd_transform};
use oxibwt_core::Direction;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxibwt")]
#[command(
    author,
    version,
    about = "Burrows-Wheeler and Move-to-Front filters - Pure Rust block-sorting preprocessor"
)]
#[command(long_about = "
OxiBWT applies the reversible front end of a block-sorting compressor.
Use '-' for the forward transform and '+' for the inverse.

Examples:
  oxibwt bwt - < abra.txt > abra.bwt
  oxibwt bwt + < abra.bwt
  oxibwt bwt - < abra.txt | oxibwt mtf - > abra.ranks
  oxibwt pipeline + -i abra.ranks -o abra.txt
  oxibwt stats --json -i abra.txt
")]
struct Cli {
    /// Increase log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Burrows-Wheeler Transform
    #[command(alias = "b")]
    Bwt(FilterArgs),

    /// Move-to-Front encoding
    #[command(alias = "m")]
    Mtf(FilterArgs),

    /// Burrows-Wheeler followed by Move-to-Front
    #[command(alias = "p")]
    Pipeline(FilterArgs),

    /// Show how well a block preprocesses
    #[command(alias = "s")]
    Stats {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

/// Arguments shared by the filter commands.
#[derive(Args)]
struct FilterArgs {
    /// '-' (forward) or '+' (inverse)
    #[arg(value_parser = utils::parse_direction)]
    direction: Direction,

    /// Input file (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn run_filter(stage: Stage, args: FilterArgs) -> Result<(), Box<dyn std::error::Error>> {
    cmd_transform(
        stage,
        args.direction,
        args.input.as_deref(),
        args.output.as_deref(),
    )
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Bwt(args) => run_filter(Stage::Bwt, args),
        Commands::Mtf(args) => run_filter(Stage::Mtf, args),
        Commands::Pipeline(args) => run_filter(Stage::Pipeline, args),
        Commands::Stats { input, json } => cmd_stats(input.as_deref(), json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
