use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "synctrace")]
#[command(about = "Reconstruct device-management sync activity from agent diagnostic logs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a file looks like an agent diagnostic log
    Check {
        /// Log file to inspect
        path: PathBuf,
    },

    /// Parse log files and print the reconstructed sync history
    Parse {
        /// Log files or directories (directories are scanned for *.log)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print the full analysis as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}
