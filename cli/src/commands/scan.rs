use std::time::{Duration, Instant};

use colored::*;
use portsweep_common::network::target::ScanRequest;
use portsweep_common::report::ScanReport;
use portsweep_core::scanner::PortScanner;
use tokio::sync::mpsc;
use tracing::{Instrument, warn};

use super::ScanArgs;
use crate::sprint;
use crate::terminal::{colors, format, print, progress};

const KEY_WIDTH: usize = 7;

pub async fn scan(args: ScanArgs) -> anyhow::Result<()> {
    let request: ScanRequest = ScanRequest::parse(&args.host, &args.port_range)?;
    let scanner = PortScanner::with_config(args.to_config());

    if !args.json {
        print::header("starting scanner");
        scan_begins(&request, &args);
    }

    let span = progress::scan_span(request.port_count())?;
    let (tx, rx) = mpsc::unbounded_channel();

    let start_time: Instant = Instant::now();
    let (report, ()) = tokio::join!(
        scanner.scan_streaming(&request, tx).instrument(span.clone()),
        progress::track(span.clone(), rx),
    );
    drop(span);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    scan_ends(&request, &report, start_time.elapsed(), args.open_only);
    Ok(())
}

fn scan_begins(request: &ScanRequest, args: &ScanArgs) {
    print::aligned_line("Target", request.host(), KEY_WIDTH);
    print::aligned_line(
        "Ports",
        format!("{} ({})", request.range(), format::count(request.port_count(), "port")),
        KEY_WIDTH,
    );
    print::aligned_line("Timeout", format!("{}ms", args.timeout_ms), KEY_WIDTH);
    let concurrency: String = match args.concurrency {
        0 => "unbounded".to_string(),
        n => n.to_string(),
    };
    print::aligned_line("Workers", concurrency, KEY_WIDTH);
}

fn scan_ends(request: &ScanRequest, report: &ScanReport, total_time: Duration, open_only: bool) {
    sprint!();
    print::header(&format!("results for {}", request.host()));

    if report.summary.open_ports == 0 {
        print::no_results();
    }
    print_results(request, report, open_only);

    if let Some(warning) = &report.summary.warning {
        warn!("{warning}");
    }

    print_summary(report, total_time);
}

fn print_results(request: &ScanRequest, report: &ScanReport, open_only: bool) {
    let details: Vec<(String, ColoredString)> = report
        .results
        .iter()
        .filter(|result| !open_only || result.is_open())
        .map(format::result_to_detail)
        .collect();

    if details.is_empty() {
        return;
    }

    print::tree_head(0, &format!("{} ports {}", request.host(), request.range()));
    print::as_tree_one_level(details);
}

fn print_summary(report: &ScanReport, total_time: Duration) {
    let summary = &report.summary;
    let open: ColoredString = format::count(summary.open_ports, "open port").bold().green();
    let closed: ColoredString = format!("{} closed", summary.closed_ports).color(colors::PORT_CLOSED);
    let output: String = format!(
        "Scan Complete: {open}, {closed} of {} in {}",
        format::count(summary.total_scanned, "port"),
        format::elapsed(total_time)
    );

    let errored: usize = report.errored_ports().count();
    if errored > 0 {
        warn!("{errored} ports failed with a connection error other than a refusal or timeout");
    }

    print::fat_separator();
    print::centerln(&output);
    print::end_of_program();
}
