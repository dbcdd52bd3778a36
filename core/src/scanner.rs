//! The port scanning **engine**.
//!
//! [`PortScanner`] accepts a validated [`ScanRequest`], resolves the host once,
//! launches one bounded-time connect probe per port and waits for all of them
//! before returning a [`ScanReport`] ordered by port.
//!
//! **Failure model:**
//! Only request validation can fail. After that, every network fault (refusal,
//! timeout, unreachable network, failed lookup, an expired scan deadline) is
//! folded into a `Closed` result for the affected port, so a report always
//! carries exactly one result per requested port.

use std::net::IpAddr;
use std::sync::Arc;

use portsweep_common::config::ScanConfig;
use portsweep_common::error::ValidationError;
use portsweep_common::network::target::ScanRequest;
use portsweep_common::report::{self, PortResult, ScanReport};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{Instant, timeout};
use tracing::{info, warn};

use crate::network::tcp::{Connector, TcpConnector};

mod fanout;

/// Error code for ports of a host whose name could not be resolved.
pub const RESOLUTION_FAILED: &str = "ResolutionFailed";
/// Error code for ports still pending when the scan deadline expired.
pub const SCAN_DEADLINE_EXCEEDED: &str = "ScanDeadlineExceeded";
/// Error code for ports whose probe task died before reporting.
pub const PROBE_ABORTED: &str = "ProbeAborted";

/// Concurrent TCP connect scanner.
///
/// Holds no per-scan state, so one instance can serve any number of
/// concurrent scans.
pub struct PortScanner<C = TcpConnector> {
    config: ScanConfig,
    connector: Arc<C>,
}

impl PortScanner<TcpConnector> {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self::with_connector(config, TcpConnector)
    }
}

impl Default for PortScanner<TcpConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> PortScanner<C>
where
    C: Connector + 'static,
{
    pub fn with_connector(config: ScanConfig, connector: C) -> Self {
        Self {
            config,
            connector: Arc::new(connector),
        }
    }

    /// Scans every port of `request` and waits for all probes to settle.
    pub async fn scan(&self, request: &ScanRequest) -> ScanReport {
        self.run(request, None).await
    }

    /// Validates the wire form of a request (`host`, `"start-end"`) and scans it.
    ///
    /// Nothing touches the network unless validation succeeds.
    pub async fn scan_range(&self, host: &str, port_range: &str) -> Result<ScanReport, ValidationError> {
        let request: ScanRequest = ScanRequest::parse(host, port_range)?;
        Ok(self.scan(&request).await)
    }

    /// Like [`PortScanner::scan`], but also sends each result to `sink` as soon
    /// as its probe settles.
    ///
    /// Results arrive in completion order; the returned report is still sorted.
    pub async fn scan_streaming(&self, request: &ScanRequest, sink: UnboundedSender<PortResult>) -> ScanReport {
        self.run(request, Some(&sink)).await
    }

    async fn run(&self, request: &ScanRequest, sink: Option<&UnboundedSender<PortResult>>) -> ScanReport {
        let started: Instant = Instant::now();
        // A deadline too far out to represent is no deadline at all.
        let deadline: Option<Instant> = self.config.scan_deadline.and_then(|limit| started.checked_add(limit));

        let warning: Option<String> = report::large_range_warning(request.port_count());
        if let Some(warning) = &warning {
            warn!("{warning}");
        }
        info!("Starting port scan on {} for ports {}", request.host(), request.range());

        let results: Vec<PortResult> = match self.resolve(request.host(), deadline).await {
            Some(ip) => {
                fanout::probe_range(
                    self.connector.clone(),
                    ip,
                    request.range(),
                    self.config.probe_timeout,
                    self.config.is_bounded().then_some(self.config.max_in_flight),
                    deadline,
                    sink,
                )
                .await
            }
            None => request
                .ports()
                .map(|port| {
                    let result = PortResult::closed_with_code(port, RESOLUTION_FAILED);
                    fanout::emit(sink, &result);
                    result
                })
                .collect(),
        };

        let report: ScanReport = ScanReport::from_results(results, warning);
        info!(
            "Scan of {} complete: {} open, {} closed in {:.2}s",
            request.host(),
            report.summary.open_ports,
            report.summary.closed_ports,
            started.elapsed().as_secs_f64()
        );
        report
    }

    async fn resolve(&self, host: &str, deadline: Option<Instant>) -> Option<IpAddr> {
        let mut limit = self.config.resolve_timeout;
        if let Some(deadline) = deadline {
            limit = limit.min(deadline.saturating_duration_since(Instant::now()));
        }

        match timeout(limit, self.connector.resolve(host)).await {
            Ok(Ok(ip)) => {
                if host != ip.to_string() {
                    info!("Resolved {host} to {ip}");
                }
                Some(ip)
            }
            Ok(Err(e)) => {
                warn!("Failed to resolve {host}: {e}");
                None
            }
            Err(_elapsed) => {
                warn!("Timed out resolving {host}");
                None
            }
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
