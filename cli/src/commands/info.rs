use portsweep_common::config::ScanConfig;
use portsweep_common::network::target::LARGE_RANGE_THRESHOLD;

use crate::terminal::print;

const KEY_WIDTH: usize = 14;

/// Prints the version and the settings a scan uses without overrides.
pub fn info(cfg: &ScanConfig) {
    print::aligned_line("Version", env!("CARGO_PKG_VERSION"), KEY_WIDTH);
    print::aligned_line("Scan type", "tcp connect", KEY_WIDTH);
    print::aligned_line(
        "Probe timeout",
        format!("{}ms", cfg.probe_timeout.as_millis()),
        KEY_WIDTH,
    );

    let in_flight: String = if cfg.is_bounded() {
        cfg.max_in_flight.to_string()
    } else {
        "unbounded".to_string()
    };
    print::aligned_line("Max in flight", in_flight, KEY_WIDTH);
    print::aligned_line(
        "Resolve limit",
        format!("{}s", cfg.resolve_timeout.as_secs()),
        KEY_WIDTH,
    );

    let deadline: String = match cfg.scan_deadline {
        Some(limit) => format!("{}s", limit.as_secs()),
        None => "none".to_string(),
    };
    print::aligned_line("Scan deadline", deadline, KEY_WIDTH);
    print::aligned_line(
        "Warn above",
        format!("{LARGE_RANGE_THRESHOLD} ports"),
        KEY_WIDTH,
    );
    print::end_of_program();
}
