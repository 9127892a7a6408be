//! Command-line arguments

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "chsrate")]
#[command(
    version,
    about = "Rate cooperative housing societies and generate report and certificate PDFs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Date printed on generated documents (YYYY-MM-DD), defaults to today
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    /// JSON file overriding report and certificate labels
    #[arg(long, global = true)]
    pub branding: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the multi-page assessment report for one society
    Report {
        /// Society record (JSON)
        #[arg(long)]
        society: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render compliance certificates for one society
    Certificate {
        /// Society record (JSON)
        #[arg(long)]
        society: PathBuf,

        /// Certificate name, e.g. "Fire Safety NOC"
        #[arg(long, required_unless_present = "all_mandatory")]
        name: Option<String>,

        /// Issue one certificate per mandatory catalog entry
        #[arg(long, conflicts_with = "name")]
        all_mandatory: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the society's certificates reconciled against the catalog
    Compliance {
        /// Society record (JSON)
        #[arg(long)]
        society: PathBuf,
    },

    /// Print portfolio statistics for a list of societies
    Stats {
        /// JSON array of society records
        #[arg(long)]
        societies: PathBuf,

        /// Only include societies whose name or city contains this text
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Execute a JSON array of render commands
    Batch {
        /// JSON array of {"type": "Report" | "Certificate", ...} commands
        #[arg(long)]
        jobs: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Watermark image: a PNG file or a file holding a data:image/png URL
    #[arg(long)]
    pub watermark: Option<PathBuf>,

    /// Directory the PDFs are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}
