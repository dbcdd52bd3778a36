//! Single-port TCP connect probing.
//!
//! A probe performs one handshake attempt against `(ip, port)` bounded by a
//! timeout and classifies the outcome. An established connection is dropped
//! straight away without sending or reading any payload. Dropping the connect
//! future on timeout closes the half-open socket, so no descriptor outlives its
//! probe.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use portsweep_common::report::PortResult;
use thiserror::Error;
use tokio::net::{self, TcpStream};
use tokio::time::timeout;
use tracing::{debug, trace};

/// The two network primitives a scan needs.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Resolves `host` to the address every probe of a scan will target.
    async fn resolve(&self, host: &str) -> io::Result<IpAddr>;

    /// Completes a TCP handshake with `addr` and releases the connection.
    async fn connect(&self, addr: SocketAddr) -> io::Result<()>;
}

/// [`Connector`] backed by the operating system's resolver and sockets.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    async fn resolve(&self, host: &str) -> io::Result<IpAddr> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        let addrs: Vec<SocketAddr> = net::lookup_host((host, 0)).await?.collect();

        // Prefer IPv4, listeners bound to 0.0.0.0 are still the common case.
        addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .map(|addr| addr.ip())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no addresses found for {host}"))
            })
    }

    async fn connect(&self, addr: SocketAddr) -> io::Result<()> {
        let stream: TcpStream = TcpStream::connect(addr).await?;
        drop(stream);
        Ok(())
    }
}

/// Why a probe did not produce an open port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("connect timed out")]
    Timeout,
    #[error("connection refused")]
    Refused,
    #[error("connect failed: {0}")]
    Other(String),
}

impl ProbeError {
    /// Folds the failure into a closed result. Only [`ProbeError::Other`]
    /// keeps a diagnostic code.
    pub fn into_result(self, port: u16) -> PortResult {
        match self {
            ProbeError::Timeout | ProbeError::Refused => PortResult::closed(port),
            ProbeError::Other(code) => PortResult::closed_with_code(port, code),
        }
    }
}

impl From<io::Error> for ProbeError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => ProbeError::Refused,
            io::ErrorKind::TimedOut => ProbeError::Timeout,
            _ => ProbeError::Other(error_code(&err)),
        }
    }
}

/// Stable, human-readable code for an I/O error, e.g. `HostUnreachable`.
///
/// Errors the standard library cannot categorize fall back to their OS error
/// number.
pub fn error_code(err: &io::Error) -> String {
    let kind: String = format!("{:?}", err.kind());
    match (kind.as_str(), err.raw_os_error()) {
        ("Other" | "Uncategorized", Some(errno)) => format!("OsError{errno}"),
        _ => kind,
    }
}

/// Runs one bounded connect attempt.
pub async fn attempt<C>(connector: &C, addr: SocketAddr, probe_timeout: Duration) -> Result<(), ProbeError>
where
    C: Connector + ?Sized,
{
    match timeout(probe_timeout, connector.connect(addr)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ProbeError::from(e)),
        Err(_elapsed) => Err(ProbeError::Timeout),
    }
}

/// Probes `addr` exactly once and reports the port's state.
pub async fn probe<C>(connector: &C, addr: SocketAddr, probe_timeout: Duration) -> PortResult
where
    C: Connector + ?Sized,
{
    let port: u16 = addr.port();
    trace!("Connecting to {addr}");

    match attempt(connector, addr, probe_timeout).await {
        Ok(()) => {
            debug!("Port {port} is open");
            PortResult::open(port)
        }
        Err(err) => {
            trace!("Port {port} is closed: {err}");
            err.into_result(port)
        }
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
