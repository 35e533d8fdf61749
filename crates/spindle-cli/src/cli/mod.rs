use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `git-bucket` binary.
#[derive(Debug, Parser)]
#[command(
    name = "git-bucket",
    version,
    about = "Apply and submit Bitbucket pull requests"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: text, json, raw
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer yes to every question
    #[arg(short, long, global = true, conflicts_with = "no")]
    pub yes: bool,

    /// Answer no to every question
    #[arg(long, global = true)]
    pub no: bool,

    /// Run as if started in this directory
    #[arg(short = 'r', long, global = true)]
    pub repo: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            yes: self.yes,
            no: self.no,
            repo: self.repo.clone(),
        }
    }
}
