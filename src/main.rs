#![forbid(unsafe_code)]
//! qgen Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use qgen::commands::{
    execute_add, execute_build, execute_checklist, AddOptions, BuildOptions, ChecklistOptions,
};
use qgen::Config;

#[derive(Parser)]
#[command(name = "qgen")]
#[command(about = "Trivia-question dataset builder")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(long, global = true, default_value = ".qgen.config.json")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate, partition and export the question table
    Build {
        /// Source TSV table (default: configured input)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (default: configured out dir)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Generate the review checklist page from the prod partition
    Checklist {
        /// Prod partition JSON (default: <out dir>/questions_prod.json)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Handlebars template path
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output HTML path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactively append a new question to the table
    Add {
        /// Question table to append to (default: configured input)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; --verbose raises the default level otherwise.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Build { input, out_dir } => {
            execute_build(BuildOptions { input, out_dir }, config)
        }

        Commands::Checklist {
            data,
            template,
            output,
        } => execute_checklist(ChecklistOptions { data, template, output }, config),

        Commands::Add { file } => execute_add(AddOptions { file }, config),
    }
}
