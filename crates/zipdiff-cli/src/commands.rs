use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "zipdiff")]
#[command(about = "Diff and validate the contents of two distribution archives", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare the left and right archive trees and check expectations
    Diff {
        /// Left (baseline) archive references, comma-separated; overrides
        /// the configured resources
        #[arg(long)]
        left: Option<String>,
        /// Right (candidate) archive references, comma-separated
        #[arg(long)]
        right: Option<String>,
    },
    /// Print configuration values
    PrintConfig,
}
