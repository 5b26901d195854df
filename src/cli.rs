use clap::{Parser, Subcommand};
use docforge_common::ConversionKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docforge")]
#[command(author, version, about = "Convert between PDF and Word documents")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single file and report any error directly
    Convert {
        /// File to convert
        #[arg(required = true)]
        input: PathBuf,

        /// Output file (default: input name with the new extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Conversion direction: pdf-to-word or word-to-pdf (inferred from the input if omitted)
        #[arg(short, long)]
        kind: Option<ConversionKind>,
    },

    /// Convert many files, several at a time
    Batch {
        /// Files or directories to convert
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Conversion direction: pdf-to-word or word-to-pdf
        #[arg(short, long)]
        kind: ConversionKind,

        /// Directory for converted files (default: next to each input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Maximum number of simultaneous conversions (default from config, else 3)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Descend into subdirectories of directory inputs
        #[arg(short, long)]
        recursive: bool,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Check that the external office suite is available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
