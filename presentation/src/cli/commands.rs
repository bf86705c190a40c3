//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Where session streams are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Remote log store over HTTP
    Http,
    /// Process-local store, lost on exit
    Memory,
}

/// CLI arguments for lecture-pulse
#[derive(Parser, Debug)]
#[command(name = "lecture-pulse")]
#[command(author, version, about = "Live comprehension checks for lectures")]
#[command(long_about = r#"
Lecture Pulse serves the HTTP API behind a live classroom quiz.

A presenter creates a session from a lecture transcript and gets a 4-digit
room code. Participants join with the code and answer; the presenter then
reads feedback aggregated per question.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./pulse.toml        Project-level config
3. ~/.config/lecture-pulse/config.toml   Global config
Environment variables prefixed PULSE_ override all files
(for example PULSE_SERVER__PORT=8080).

Example:
  lecture-pulse --port 8080
  lecture-pulse --store memory -vv
  lecture-pulse --show-config
"#)]
pub struct Cli {
    /// Address to bind (overrides [server].host)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides [server].port)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Log store backend (overrides [log_store].backend)
    #[arg(long, value_enum)]
    pub store: Option<StoreBackend>,

    /// Generation model (overrides [llm].model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Resolve rooms by scanning stream names only, without the session index
    #[arg(long)]
    pub no_index: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Default log filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
