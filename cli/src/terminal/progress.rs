use colored::*;
use indicatif::ProgressStyle;
use portsweep_common::report::PortResult;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{Span, info, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::format;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Creates the span whose progress bar tracks a scan of `total` ports.
pub fn scan_span(total: u32) -> anyhow::Result<Span> {
    let span = info_span!("scan", indicatif.pb_show = true);

    let style = ProgressStyle::with_template(
        "{spinner:.blue} {msg} [{bar:32.green/white}] {pos}/{len} ports ({eta})",
    )?
    .tick_strings(TICK_STRINGS)
    .progress_chars("━╸━");

    span.pb_set_style(&style);
    span.pb_set_length(u64::from(total));
    span.pb_set_message("Probing");
    Ok(span)
}

/// Advances the bar for every streamed result and announces open ports
/// as they are found. Returns once the scanner drops its sender.
pub async fn track(span: Span, mut rx: UnboundedReceiver<PortResult>) {
    let mut open: u32 = 0;

    while let Some(result) = rx.recv().await {
        span.pb_inc(1);
        if result.is_open() {
            open += 1;
            info!("Discovered open port {}", format::port_label(result.port).green().bold());
            span.pb_set_message(&format!("{} so far", format::count(open, "open port")));
        }
    }
}
