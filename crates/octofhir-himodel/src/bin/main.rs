//! himodel command-line interface

use anyhow::Result;
use clap::{Parser, Subcommand};
use octofhir_himodel::cli::compare::{self, CompareConfig};
use octofhir_himodel::cli::literal::LiteralKind;
use octofhir_himodel::cli::output::{self, ColorMode};
use octofhir_himodel::cli::parse::{self, ParseConfig};
use octofhir_himodel::cli::{load_registry, types};
use std::path::PathBuf;

/// FHIR primitive value inspector
#[derive(Parser)]
#[command(name = "himodel")]
#[command(author, version, about = "Parse, compare and classify FHIR primitive values", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    /// Additional type model (JSON)
    #[arg(short, long, global = true)]
    types: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a literal and print its canonical form
    Parse {
        /// Grammar to parse with
        #[arg(value_enum)]
        kind: LiteralKind,

        /// The literal
        literal: String,
    },

    /// Compare two literals of the same kind
    Compare {
        /// Grammar to parse both literals with
        #[arg(value_enum)]
        kind: LiteralKind,

        left: String,

        right: String,
    },

    /// Print the nearest common base type of two types
    CommonBase { left: String, right: String },

    /// List every registered type with its base chain
    Types,
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(cli.color);

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Parse { kind, literal } => parse::parse(ParseConfig { kind, literal }),
        Commands::Compare { kind, left, right } => {
            compare::compare(CompareConfig { kind, left, right })
        }
        Commands::CommonBase { left, right } => {
            let registry = load_registry(cli.types.as_deref())?;
            types::common_base(&registry, &left, &right)
        }
        Commands::Types => {
            let registry = load_registry(cli.types.as_deref())?;
            types::list(&registry)
        }
    }
}
