#![cfg(test)]
use std::time::{Duration, Instant};

use portsweep_common::config::ScanConfig;
use portsweep_common::error::ValidationError;
use portsweep_common::network::target::ScanRequest;
use portsweep_common::report::{PortResult, PortStatus, ScanReport};
use portsweep_core::scanner::PortScanner;
use tokio::sync::mpsc;

use crate::util::{self, Listener, LOOPBACK};

fn assert_well_formed(report: &ScanReport, start: u16, end: u16) {
    let expected: Vec<u16> = (start..=end).collect();
    let ports: Vec<u16> = report.results.iter().map(|r| r.port).collect();
    assert_eq!(ports, expected, "results must cover the range in ascending order");

    let summary = &report.summary;
    assert_eq!(summary.total_scanned as usize, report.results.len());
    assert_eq!(summary.open_ports + summary.closed_ports, summary.total_scanned);
}

/// Scanning a range with nothing listening reports every port closed.
#[tokio::test]
async fn scan_low_ports_on_loopback_are_closed() {
    let scanner = PortScanner::new();

    let report = scanner.scan_range(LOOPBACK, "1-10").await.unwrap();

    assert_well_formed(&report, 1, 10);
    assert_eq!(report.summary.open_ports, 0);
    assert_eq!(report.summary.closed_ports, 10);
    assert!(report.summary.warning.is_none());
}

#[tokio::test]
async fn scan_finds_listening_port() {
    let listener = Listener::spawn().await.unwrap();
    let scanner = PortScanner::new();

    let report = scanner.scan_range(LOOPBACK, &listener.range()).await.unwrap();

    assert_eq!(report.results, vec![PortResult::open(listener.port)]);
    assert_eq!(report.summary.open_ports, 1);
    assert_eq!(report.summary.closed_ports, 0);
}

#[tokio::test]
async fn scan_resolves_localhost_by_name() {
    let listener = Listener::spawn().await.unwrap();
    let scanner = PortScanner::new();

    let report = scanner.scan_range("localhost", &listener.range()).await.unwrap();

    assert_eq!(report.results[0].status, PortStatus::Open);
}

#[tokio::test]
async fn scan_reports_refused_port_closed_without_code() {
    let port = util::closed_port().await.unwrap();
    let request = ScanRequest::new(LOOPBACK, port, port).unwrap();

    let report = PortScanner::new().scan(&request).await;

    assert_eq!(report.results, vec![PortResult::closed(port)]);
}

#[tokio::test]
async fn scan_mixed_range_around_listener() {
    let listener = Listener::spawn().await.unwrap();
    let start = listener.port.saturating_sub(2).max(1);
    let end = listener.port.saturating_add(2);
    let request = ScanRequest::new(LOOPBACK, start, end).unwrap();

    let report = PortScanner::new().scan(&request).await;

    assert_well_formed(&report, start, end);
    let listened = report.results.iter().find(|r| r.port == listener.port).unwrap();
    assert!(listened.is_open());
}

#[tokio::test]
async fn scan_rejects_inverted_range() {
    let result = PortScanner::new().scan_range(LOOPBACK, "5-1").await;

    assert_eq!(result.unwrap_err(), ValidationError::InvertedRange { start: 5, end: 1 });
}

#[tokio::test]
async fn scan_rejects_unsafe_host() {
    let result = PortScanner::new().scan_range("localhost; rm -rf /", "1-10").await;

    assert!(matches!(result, Err(ValidationError::InvalidHost(_))));
}

#[tokio::test]
async fn scan_large_range_carries_warning() {
    let config = ScanConfig::default().with_probe_timeout(Duration::from_millis(500));
    let scanner = PortScanner::with_config(config);

    let report = scanner.scan_range(LOOPBACK, "1-2000").await.unwrap();

    assert_well_formed(&report, 1, 2000);
    assert_eq!(report.summary.total_scanned, 2000);
    let warning = report.summary.warning.as_deref().unwrap();
    assert!(warning.contains("2000 ports"));
}

#[tokio::test]
async fn repeated_scans_agree() {
    let listener = Listener::spawn().await.unwrap();
    let port = util::closed_port().await.unwrap();
    let scanner = PortScanner::new();

    let first = scanner.scan_range(LOOPBACK, &listener.range()).await.unwrap();
    let second = scanner.scan_range(LOOPBACK, &listener.range()).await.unwrap();
    assert_eq!(first.results, second.results);

    let request = ScanRequest::new(LOOPBACK, port, port).unwrap();
    let first = scanner.scan(&request).await;
    let second = scanner.scan(&request).await;
    assert_eq!(first.results, second.results);
}

/// A black-holed or unreachable address settles within roughly one probe timeout.
#[tokio::test]
async fn scan_unroutable_host_settles_within_timeout() {
    let config = ScanConfig::default().with_probe_timeout(Duration::from_millis(300));
    let scanner = PortScanner::with_config(config);

    let started = Instant::now();
    let report = scanner.scan_range("10.255.255.1", "80-84").await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(2), "took {:?}", started.elapsed());
    assert_well_formed(&report, 80, 84);
    assert_eq!(report.summary.open_ports, 0);
}

#[tokio::test]
async fn concurrent_scans_are_independent() {
    let listener = Listener::spawn().await.unwrap();
    let closed = util::closed_port().await.unwrap();
    let scanner = PortScanner::new();

    let open_request = ScanRequest::new(LOOPBACK, listener.port, listener.port).unwrap();
    let closed_request = ScanRequest::new(LOOPBACK, closed, closed).unwrap();

    let (open_report, closed_report) =
        tokio::join!(scanner.scan(&open_request), scanner.scan(&closed_request));

    assert_eq!(open_report.summary.open_ports, 1);
    assert_eq!(closed_report.summary.open_ports, 0);
}

#[tokio::test]
async fn streaming_scan_matches_report() {
    let listener = Listener::spawn().await.unwrap();
    let request = ScanRequest::new(LOOPBACK, listener.port, listener.port).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let report = PortScanner::new().scan_streaming(&request, tx).await;

    let mut streamed = Vec::new();
    while let Some(result) = rx.recv().await {
        streamed.push(result);
    }
    assert_eq!(streamed, report.results);
}

#[tokio::test]
async fn report_serializes_to_response_shape() {
    let listener = Listener::spawn().await.unwrap();

    let report = PortScanner::new()
        .scan_range(LOOPBACK, &listener.range())
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["results"][0]["port"], listener.port);
    assert_eq!(json["results"][0]["status"], "open");
    assert!(json["results"][0].get("errorCode").is_none());
    assert_eq!(json["summary"]["totalScanned"], 1);
    assert_eq!(json["summary"]["openPorts"], 1);
    assert_eq!(json["summary"]["closedPorts"], 0);
    assert!(json["summary"]["scanTime"].is_string());
    assert!(json["summary"]["warning"].is_null());
}
