//! # Scan Request Model
//!
//! Defines what a caller may ask the scanner to do.
//!
//! A [`ScanRequest`] pairs a host with an inclusive [`PortRange`]. Both halves are
//! validated on construction, so a request that exists is a request that may be
//! scanned:
//! * The host must be non-empty and consist only of ASCII letters, digits, dots
//!   and hyphens. This keeps whitespace, slashes and shell metacharacters out of
//!   anything the host is later interpolated into; it is not a DNS syntax check.
//! * The range must satisfy `1 <= start <= end <= 65535`.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::ValidationError;
use crate::network::range::PortRange;

/// Ranges wider than this still scan, but carry an advisory warning.
pub const LARGE_RANGE_THRESHOLD: u32 = 1000;

/// A validated, immutable request to probe every port of `range` on `host`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    host: String,
    range: PortRange,
}

impl ScanRequest {
    pub fn new(host: &str, start_port: u16, end_port: u16) -> Result<Self, ValidationError> {
        let host = validate_host(host)?;
        let range = PortRange::new(start_port, end_port)?;
        Ok(Self { host, range })
    }

    /// Builds a request from its wire form: a host and a `start-end` string.
    pub fn parse(host: &str, port_range: &str) -> Result<Self, ValidationError> {
        if host.trim().is_empty() {
            return Err(ValidationError::MissingHost);
        }
        if port_range.trim().is_empty() {
            return Err(ValidationError::MissingPortRange);
        }

        let host = validate_host(host)?;
        let range = port_range.parse::<PortRange>()?;
        Ok(Self { host, range })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn range(&self) -> PortRange {
        self.range
    }

    pub fn start_port(&self) -> u16 {
        self.range.start()
    }

    pub fn end_port(&self) -> u16 {
        self.range.end()
    }

    pub fn port_count(&self) -> u32 {
        self.range.len()
    }

    pub fn ports(&self) -> RangeInclusive<u16> {
        self.range.iter()
    }
}

impl fmt::Display for ScanRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.range)
    }
}

/// Checks `host` against `^[A-Za-z0-9.-]+$` and returns an owned copy.
pub fn validate_host(host: &str) -> Result<String, ValidationError> {
    if host.is_empty() {
        return Err(ValidationError::MissingHost);
    }
    if !host.bytes().all(is_host_byte) {
        return Err(ValidationError::InvalidHost(host.to_string()));
    }
    Ok(host.to_string())
}

fn is_host_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'-'
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
