use std::time::Duration;

/// Per-probe connect timeout used when nothing else is configured.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1000);
/// Upper bound on concurrently pending connects.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 512;
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// How long a single connect may take before the port counts as closed.
    pub probe_timeout: Duration,
    /// Maximum number of connects in flight at once.
    ///
    /// `0` disables the cap and launches every probe at once.
    pub max_in_flight: usize,
    /// Bound on the one-off host name lookup that precedes probing.
    pub resolve_timeout: Duration,
    /// Optional wall-clock limit for the whole scan.
    ///
    /// Ports still pending when it fires are reported closed.
    pub scan_deadline: Option<Duration>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            scan_deadline: None,
        }
    }
}

impl ScanConfig {
    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn with_resolve_timeout(mut self, resolve_timeout: Duration) -> Self {
        self.resolve_timeout = resolve_timeout;
        self
    }

    pub fn with_scan_deadline(mut self, scan_deadline: Option<Duration>) -> Self {
        self.scan_deadline = scan_deadline;
        self
    }

    /// Whether probes are throttled by [`ScanConfig::max_in_flight`].
    pub fn is_bounded(&self) -> bool {
        self.max_in_flight > 0
    }
}
