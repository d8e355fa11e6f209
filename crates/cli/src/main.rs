mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use commands::partition::{cmd_partition, PartitionArgs};
use commands::validate::cmd_validate;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Chunking strategy selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ChunkStrategyArg {
    Basic,
    ByTitle,
}

/// Rehydrate serialized document elements.
#[derive(Parser)]
#[command(
    name = "rehydrate",
    version,
    about = "Rehydrate serialized document elements"
)]
struct Cli {
    /// Output format for reports and errors (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a configuration file (default: ./rehydrate.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rehydrate element JSON and print the resulting elements
    Partition {
        /// Path to the element JSON file
        file: Option<PathBuf>,
        /// Element JSON given inline
        #[arg(long)]
        text: Option<String>,
        /// Read element JSON from standard input
        #[arg(long)]
        stdin: bool,
        /// Leave element metadata exactly as serialized
        #[arg(long)]
        no_metadata: bool,
        /// Filename to record in element metadata
        #[arg(long)]
        metadata_filename: Option<String>,
        /// Last-modified timestamp to record on every element
        #[arg(long)]
        last_modified: Option<String>,
        /// Take last-modified from the input stream when it has one
        /// (standard input never has one)
        #[arg(long)]
        infer_timestamp: bool,
        /// Chunk the rehydrated elements with this strategy
        #[arg(long, value_enum)]
        chunk: Option<ChunkStrategyArg>,
        /// Hard chunk size limit in characters (needs chunking enabled)
        #[arg(long)]
        max_characters: Option<usize>,
        /// Soft chunk size limit in characters
        #[arg(long)]
        new_after_n_chars: Option<usize>,
        /// Characters repeated between pieces of a split element
        #[arg(long)]
        overlap: Option<usize>,
        /// Point parent_id of elements at the preceding title
        #[arg(long)]
        parent_ids: bool,
    },

    /// Validate element JSON against the element JSON Schema
    Validate {
        /// Path to the element JSON file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, cli.output, cli.quiet);
            process::exit(1);
        }
    };
    logging::init_logging(config.logging.level.as_deref(), cli.quiet);

    match cli.command {
        Commands::Partition {
            file,
            text,
            stdin,
            no_metadata,
            metadata_filename,
            last_modified,
            infer_timestamp,
            chunk,
            max_characters,
            new_after_n_chars,
            overlap,
            parent_ids,
        } => {
            let args = PartitionArgs {
                file,
                text,
                stdin,
                no_metadata,
                metadata_filename,
                last_modified,
                infer_timestamp,
                chunk,
                max_characters,
                new_after_n_chars,
                overlap,
                parent_ids,
            };
            cmd_partition(&args, &config, cli.output, cli.quiet);
        }
        Commands::Validate { file } => {
            cmd_validate(&file, cli.output, cli.quiet);
        }
    }
}

/// Report an error message in the appropriate format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
