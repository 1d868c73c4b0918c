//! Command-line argument parsing for pqrunner.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// A subprocess bridge for the PrimusQuery database executable.
#[derive(Parser, Debug)]
#[command(name = "pqrunner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the primusquery executable (overrides config file)
    #[arg(long, value_name = "PATH", env = "PQRUNNER_EXECUTABLE")]
    pub executable: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit diagnostic detail, including a debug.priq query dump
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run an ad-hoc query and print the raw output
    Query(QueryArgs),
    /// Run a bulk import against an existing file
    Import(ImportArgs),
    /// Refresh the executable's internal index
    Update {
        /// Primus host to refresh against
        host: String,
    },
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Target database
    #[arg(short = 'd', long, value_name = "DATABASE")]
    pub database: String,

    /// Search expression
    #[arg(short = 's', long, value_name = "EXPR")]
    pub search: String,

    /// Character set directive
    #[arg(long, default_value = "UTF-8")]
    pub charset: String,

    /// Header block text
    #[arg(long, default_value = "")]
    pub header: String,

    /// Footer block text
    #[arg(long, default_value = "")]
    pub footer: String,

    /// Data payload, passed through verbatim
    #[arg(long, default_value = "")]
    pub data: String,

    /// Query deadline in seconds
    #[arg(short = 't', long, default_value = "30")]
    pub timeout: u64,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Import file (securely deleted after the attempt)
    pub path: PathBuf,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Loader profile name
    #[arg(short = 'l', long, value_name = "NAME")]
    pub loader: String,

    /// Expect exactly one created record and print a summary
    #[arg(long)]
    pub atomic: bool,
}

/// Connection target shared by query and import.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Primus host
    #[arg(short = 'H', long, value_name = "HOST")]
    pub host: String,

    /// Primus port
    #[arg(short = 'p', long, value_name = "PORT", default_value = "1234")]
    pub port: String,

    /// User name
    #[arg(short = 'U', long, value_name = "USER")]
    pub user: String,

    /// Password
    #[arg(short = 'P', long, value_name = "PASS", env = "PQRUNNER_PASS")]
    pub pass: String,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}
