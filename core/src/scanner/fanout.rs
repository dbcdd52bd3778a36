use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use portsweep_common::network::range::PortRange;
use portsweep_common::report::PortResult;
use tokio::sync::{Semaphore, mpsc::UnboundedSender};
use tokio::task::{self, JoinError, JoinSet};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};

use super::{PROBE_ABORTED, SCAN_DEADLINE_EXCEEDED};
use crate::network::tcp::{self, Connector};

/// Probes every port of `range` on `ip` and returns one result per port.
///
/// One task is spawned per port. When `max_in_flight` is set, tasks wait on a
/// semaphore before opening their socket, which bounds the number of open
/// descriptors without serializing the probes themselves. Caps above
/// [`Semaphore::MAX_PERMITS`] are clamped to it.
pub(super) async fn probe_range<C>(
    connector: Arc<C>,
    ip: IpAddr,
    range: PortRange,
    probe_timeout: Duration,
    max_in_flight: Option<usize>,
    deadline: Option<Instant>,
    sink: Option<&UnboundedSender<PortResult>>,
) -> Vec<PortResult>
where
    C: Connector + 'static,
{
    let semaphore: Option<Arc<Semaphore>> =
        max_in_flight.map(|n| Arc::new(Semaphore::new(n.min(Semaphore::MAX_PERMITS))));
    let mut tasks: JoinSet<PortResult> = JoinSet::new();
    let mut task_ports: HashMap<task::Id, u16> = HashMap::with_capacity(range.len() as usize);

    for port in range {
        let connector = connector.clone();
        let semaphore = semaphore.clone();

        let handle = tasks.spawn(async move {
            let _permit = match semaphore {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };
            tcp::probe(connector.as_ref(), SocketAddr::new(ip, port), probe_timeout).await
        });
        task_ports.insert(handle.id(), port);
    }

    let mut collector = Collector::new(range, sink);
    let mut deadline_hit = false;

    loop {
        let next = match deadline {
            Some(deadline) => match timeout_at(deadline, tasks.join_next()).await {
                Ok(next) => next,
                Err(_elapsed) => {
                    warn!("Scan deadline reached with {} probes outstanding", tasks.len());
                    deadline_hit = true;
                    break;
                }
            },
            None => tasks.join_next().await,
        };

        let Some(joined) = next else { break };
        match joined {
            Ok(result) => collector.accept(result),
            Err(e) => collector.reject(&task_ports, &e),
        }
    }

    if deadline_hit {
        tasks.abort_all();
        // Drain so every aborted probe has dropped its socket before returning.
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => collector.accept(result),
                Err(e) if e.is_cancelled() => {}
                Err(e) => collector.reject(&task_ports, &e),
            }
        }
    }

    // Only probes cut short by the deadline are left unsettled here.
    let code: &str = if deadline_hit { SCAN_DEADLINE_EXCEEDED } else { PROBE_ABORTED };
    collector.finish(code)
}

/// Gathers results in completion order and tracks which ports have settled.
struct Collector<'a> {
    range: PortRange,
    settled: Vec<bool>,
    results: Vec<PortResult>,
    sink: Option<&'a UnboundedSender<PortResult>>,
}

impl<'a> Collector<'a> {
    fn new(range: PortRange, sink: Option<&'a UnboundedSender<PortResult>>) -> Self {
        let len: usize = range.len() as usize;
        Self {
            range,
            settled: vec![false; len],
            results: Vec::with_capacity(len),
            sink,
        }
    }

    fn accept(&mut self, result: PortResult) {
        let idx: usize = usize::from(result.port - self.range.start());
        if std::mem::replace(&mut self.settled[idx], true) {
            return;
        }
        emit(self.sink, &result);
        self.results.push(result);
    }

    /// Settles the port of a probe task that died without a result.
    fn reject(&mut self, task_ports: &HashMap<task::Id, u16>, e: &JoinError) {
        match task_ports.get(&e.id()) {
            Some(&port) => {
                warn!("Probe of port {port} failed: {e}");
                self.accept(PortResult::closed_with_code(port, PROBE_ABORTED));
            }
            None => warn!("Probe task failed: {e}"),
        }
    }

    /// Reports every port that never settled as closed with `code`.
    fn finish(mut self, code: &str) -> Vec<PortResult> {
        let missing: Vec<u16> = self
            .range
            .iter()
            .zip(self.settled.iter())
            .filter(|(_, settled)| !**settled)
            .map(|(port, _)| port)
            .collect();

        if !missing.is_empty() {
            debug!("{} ports reported as {code}", missing.len());
        }

        for port in missing {
            self.accept(PortResult::closed_with_code(port, code));
        }
        self.results
    }
}

pub(super) fn emit(sink: Option<&UnboundedSender<PortResult>>, result: &PortResult) {
    if let Some(sink) = sink {
        // A dropped receiver only means nobody is watching progress.
        let _ = sink.send(result.clone());
    }
}
