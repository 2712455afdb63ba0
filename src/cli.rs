use clap::{Parser, Subcommand};
use panrun_pandoc::Version;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "panrun")]
#[command(author, version, about = "Find an installed pandoc and run document conversions")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging and echo pandoc command lines
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether pandoc is installed
    Check {
        /// Require at least this pandoc version (e.g. 2.19)
        #[arg(long)]
        min_version: Option<Version>,
    },

    /// Print the path of the pandoc binary
    Path,

    /// Print the version of the discovered pandoc
    Version,

    /// Convert documents with pandoc
    Convert {
        /// Input files (must share a directory unless --workdir is given)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Source format
        #[arg(short, long)]
        from: Option<String>,

        /// Target format
        #[arg(short, long)]
        to: Option<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory to run pandoc in
        #[arg(long)]
        workdir: Option<PathBuf>,

        /// Extra pandoc options, passed through after `--`
        #[arg(last = true)]
        options: Vec<String>,
    },

    /// Bundle a document and its resources into one self-contained HTML file
    SelfContained {
        /// Input document
        input: PathBuf,

        /// Output HTML file
        output: PathBuf,
    },
}
