use crate::terminal::colors;
use colored::*;
use portsweep_common::report::{PortResult, PortStatus};
use std::time::Duration;

pub fn status_to_colored(status: PortStatus) -> ColoredString {
    match status {
        PortStatus::Open => status.as_str().color(colors::PORT_OPEN).bold(),
        PortStatus::Closed => status.as_str().color(colors::PORT_CLOSED),
    }
}

/// `22/tcp` style label for a result.
pub fn port_label(port: u16) -> String {
    format!("{port}/tcp")
}

/// Key/value pair for one result, e.g. (`"22/tcp"`, `open`).
///
/// Closed ports that failed for a reason other than a refusal or a timeout
/// carry their error code in brackets.
pub fn result_to_detail(result: &PortResult) -> (String, ColoredString) {
    let status: ColoredString = status_to_colored(result.status);
    let value: ColoredString = match &result.error_code {
        Some(code) => format!("{} {}", status, format!("({code})").color(colors::ERROR_CODE)).normal(),
        None => status,
    };
    (port_label(result.port), value)
}

pub fn elapsed(duration: Duration) -> ColoredString {
    format!("{:.2}s", duration.as_secs_f64()).bold().yellow()
}

pub fn count(n: u32, unit: &str) -> String {
    let unit = if n == 1 { unit.to_string() } else { format!("{unit}s") };
    format!("{n} {unit}")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_to_detail_labels_port() {
        colored::control::set_override(false);

        let (key, value) = result_to_detail(&PortResult::open(22));
        assert_eq!(key, "22/tcp");
        assert_eq!(value.to_string(), "open");

        let (_, value) = result_to_detail(&PortResult::closed_with_code(81, "HostUnreachable"));
        assert_eq!(value.to_string(), "closed (HostUnreachable)");
    }

    #[test]
    fn test_count_pluralizes() {
        assert_eq!(count(1, "port"), "1 port");
        assert_eq!(count(0, "port"), "0 ports");
        assert_eq!(count(1000, "port"), "1000 ports");
    }
}
