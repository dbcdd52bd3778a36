//! # Scan Results
//!
//! Per-port outcomes and the report built from them once every probe has settled.
//!
//! The serialized form is the scanner's response contract:
//!
//! ```json
//! {
//!   "results": [{ "port": 22, "status": "open" }, { "port": 23, "status": "closed" }],
//!   "summary": {
//!     "totalScanned": 2, "openPorts": 1, "closedPorts": 1,
//!     "scanTime": "2024-05-01T10:00:00Z", "warning": null
//!   }
//! }
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::network::target::LARGE_RANGE_THRESHOLD;

/// Terminal state of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// The TCP handshake completed within the probe timeout.
    Open,
    /// Timed out, refused, or failed with any other connection error.
    Closed,
}

impl PortStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortStatus::Open => "open",
            PortStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of probing one port. Produced by exactly one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortResult {
    pub port: u16,
    pub status: PortStatus,
    /// Diagnostic code for failures other than a timeout or a refusal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl PortResult {
    pub fn open(port: u16) -> Self {
        Self {
            port,
            status: PortStatus::Open,
            error_code: None,
        }
    }

    pub fn closed(port: u16) -> Self {
        Self {
            port,
            status: PortStatus::Closed,
            error_code: None,
        }
    }

    pub fn closed_with_code(port: u16, code: impl Into<String>) -> Self {
        Self {
            port,
            status: PortStatus::Closed,
            error_code: Some(code.into()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == PortStatus::Open
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_scanned: u32,
    pub open_ports: u32,
    pub closed_ports: u32,
    /// When aggregation completed.
    pub scan_time: DateTime<Utc>,
    pub warning: Option<String>,
}

/// The complete, port-ordered result of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub results: Vec<PortResult>,
    pub summary: ScanSummary,
}

impl ScanReport {
    /// Sorts `results` ascending by port and derives the summary from them.
    pub fn from_results(mut results: Vec<PortResult>, warning: Option<String>) -> Self {
        results.sort_by_key(|r| r.port);

        let total_scanned = results.len() as u32;
        let open_ports = results.iter().filter(|r| r.is_open()).count() as u32;

        let summary = ScanSummary {
            total_scanned,
            open_ports,
            closed_ports: total_scanned - open_ports,
            scan_time: Utc::now(),
            warning,
        };

        Self { results, summary }
    }

    pub fn open_ports(&self) -> impl Iterator<Item = &PortResult> {
        self.results.iter().filter(|r| r.is_open())
    }

    /// Closed results that carry a diagnostic code.
    pub fn errored_ports(&self) -> impl Iterator<Item = &PortResult> {
        self.results.iter().filter(|r| r.error_code.is_some())
    }
}

/// Advisory text attached to scans wider than [`LARGE_RANGE_THRESHOLD`] ports.
pub fn large_range_warning(port_count: u32) -> Option<String> {
    (port_count > LARGE_RANGE_THRESHOLD).then(|| {
        format!("Scanning a large port range ({port_count} ports). This may take some time.")
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
