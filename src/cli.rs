use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Category;

#[derive(Parser, Debug)]
#[command(name = "doc-intake")]
#[command(about = "Upload document images for classification and review the grouped results", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log at debug level, overriding RUST_LOG and LOG_LEVEL
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a batch of files to the classification service
    Classify {
        /// Files to upload, sent in the given order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for the results file (defaults to EXPORT_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the results without writing a results file
        #[arg(long)]
        no_export: bool,
    },

    /// Print a previously exported results file
    Show {
        #[arg(required = true)]
        input: PathBuf,
    },

    /// Remove one document from a results file
    Remove {
        #[arg(required = true)]
        input: PathBuf,

        /// Category name, e.g. pos_receipts
        #[arg(short, long)]
        category: Category,

        /// Identifier of the document within its category
        #[arg(short, long)]
        id: i64,

        /// Write the updated results here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the classification endpoint is reachable
    Ping,
}
