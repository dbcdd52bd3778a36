use thiserror::Error;

/// Rejection of a malformed scan request.
///
/// Raised before any socket is opened. Once a request has been accepted,
/// network faults are folded into the per-port results instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required parameter: host")]
    MissingHost,
    #[error("missing required parameter: port range")]
    MissingPortRange,
    #[error("invalid host format `{0}` (only letters, digits, dots and hyphens are allowed)")]
    InvalidHost(String),
    #[error("invalid port range `{0}` (expected `start-end`, e.g. `1-1000`)")]
    MalformedPortRange(String),
    #[error("invalid port range {start}-{end}: ports must be between 1-65535")]
    PortOutOfRange { start: i64, end: i64 },
    #[error("invalid port range {start}-{end}: start port is greater than end port")]
    InvertedRange { start: u16, end: u16 },
}
