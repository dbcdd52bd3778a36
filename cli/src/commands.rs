pub mod info;
pub mod scan;

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use portsweep_common::config::{DEFAULT_MAX_IN_FLIGHT, ScanConfig};

#[derive(Parser)]
#[command(name = "portsweep", version)]
#[command(about = "A concurrent TCP connect port scanner.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print warnings, errors and the final report
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version and default scan settings
    #[command(alias = "i")]
    Info,
    /// Scan a range of TCP ports on one host
    #[command(alias = "s")]
    Scan(ScanArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Host name or IP address to scan
    pub host: String,

    /// Inclusive port range to scan, e.g. 1-1000
    #[arg(short = 'p', long = "ports", default_value = "1-1000")]
    pub port_range: String,

    /// Per-port connect timeout in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub timeout_ms: u64,

    /// Maximum concurrent connection attempts (0 for no limit)
    #[arg(short, long, default_value_t = DEFAULT_MAX_IN_FLIGHT)]
    pub concurrency: usize,

    /// Give up on ports still pending after this many seconds
    #[arg(long, value_name = "SECS")]
    pub deadline_secs: Option<u64>,

    /// Print the report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Hide closed ports from the human-readable report
    #[arg(long)]
    pub open_only: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

impl ScanArgs {
    pub fn to_config(&self) -> ScanConfig {
        ScanConfig::default()
            .with_probe_timeout(Duration::from_millis(self.timeout_ms))
            .with_max_in_flight(self.concurrency)
            .with_scan_deadline(self.deadline_secs.map(Duration::from_secs))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
