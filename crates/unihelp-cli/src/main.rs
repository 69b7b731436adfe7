//! Unihelp CLI - Administrative document processing

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Unihelp - Turn administrative documents into retrieval-ready chunks
#[derive(Parser)]
#[command(name = "unihelp")]
#[command(version)]
#[command(about = "Turn administrative documents into retrieval-ready chunks", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the platform default
    #[arg(short, long, global = true, env = "UNIHELP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a file or a directory into JSON records
    Process {
        /// File or directory to process
        input: PathBuf,

        /// Directory to write the records to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Preferred chunk size in characters
        #[arg(long)]
        target_size: Option<usize>,

        /// Maximum chunk size in characters
        #[arg(long)]
        max_size: Option<usize>,

        /// Characters carried over between chunks
        #[arg(long)]
        overlap: Option<usize>,

        /// List what would be processed without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Summarize a persisted record
    Inspect {
        /// Path to a record written by `process`
        record: PathBuf,

        /// Number of chunks to preview
        #[arg(short = 'n', long, default_value = "3")]
        chunks: usize,
    },

    /// Write index records for a file, directory or persisted record as JSON lines
    Export {
        /// Document, directory, or `.json` record
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the config file location
    Path,
}

fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("unihelp=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("unihelp={},warn", level)))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Config commands must work even when the file does not parse
    let config = commands::load_config(cli.config.as_deref());
    let level = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(cli.verbose, &level);

    let result = match cli.command {
        Commands::Process {
            input,
            output_dir,
            target_size,
            max_size,
            overlap,
            dry_run,
        } => config.and_then(|config| {
            let overrides = commands::process::ChunkOverrides {
                target_size,
                max_size,
                overlap,
            };
            commands::process::run(&config, &input, &output_dir, &overrides, dry_run)
        }),
        Commands::Inspect { record, chunks } => commands::inspect::run(&record, chunks),
        Commands::Export { input, output } => {
            config.and_then(|config| commands::export::run(&config, &input, output.as_deref()))
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(cli.config.as_deref()),
            ConfigCommands::Init { force } => commands::config::init(cli.config.as_deref(), force),
            ConfigCommands::Path => commands::config::path(cli.config.as_deref()),
        },
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
