//! Background refresh worker
//!
//! The caller issues refresh requests through a [`RefreshHandle`]; a spawned
//! task runs check cycles and posts results back. Each request gets a
//! generation number, and results from superseded generations are dropped
//! when read, so a slow cycle never overwrites a newer one.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::check::report::ToolReport;
use crate::check::runner::Checker;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Refresh worker has stopped")]
    Stopped,
}

/// Reports produced by one refresh cycle
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub generation: u64,
    pub reports: Vec<ToolReport>,
}

pub struct RefreshWorker;

impl RefreshWorker {
    /// Spawn the worker task; it stops when the returned handle is dropped
    pub fn spawn(checker: Arc<Checker>) -> RefreshHandle {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<u64>();
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(mut generation) = request_rx.recv().await {
                // Coalesce requests that queued up while the last cycle ran
                while let Ok(newer) = request_rx.try_recv() {
                    generation = newer;
                }

                debug!("Starting refresh generation {}", generation);
                let reports = checker.run().await;

                if result_tx
                    .send(RefreshOutcome {
                        generation,
                        reports,
                    })
                    .is_err()
                {
                    break;
                }
            }
            info!("Refresh worker stopped");
        });

        RefreshHandle {
            requests: request_tx,
            results: result_rx,
            latest_requested: 0,
            latest_delivered: 0,
        }
    }
}

/// Caller side of the refresh worker
pub struct RefreshHandle {
    requests: mpsc::UnboundedSender<u64>,
    results: mpsc::UnboundedReceiver<RefreshOutcome>,
    latest_requested: u64,
    latest_delivered: u64,
}

impl RefreshHandle {
    /// Ask for a new check cycle; returns its generation number
    pub fn request_refresh(&mut self) -> Result<u64, WorkerError> {
        let generation = self.latest_requested + 1;
        self.requests
            .send(generation)
            .map_err(|_| WorkerError::Stopped)?;
        self.latest_requested = generation;
        Ok(generation)
    }

    /// Whether the most recent request has not been delivered yet
    ///
    /// Periodic callers should skip requesting while this is true; a new
    /// request makes the in-flight result stale.
    pub fn is_pending(&self) -> bool {
        self.latest_delivered < self.latest_requested
    }

    /// Whether the outcome belongs to the most recent request
    pub fn is_current(&self, outcome: &RefreshOutcome) -> bool {
        outcome.generation == self.latest_requested
    }

    /// Wait for the result of the most recent request, discarding stale ones
    ///
    /// Returns None once the worker has stopped.
    pub async fn next_current(&mut self) -> Option<RefreshOutcome> {
        while let Some(outcome) = self.results.recv().await {
            if self.is_current(&outcome) {
                self.latest_delivered = outcome.generation;
                return Some(outcome);
            }
            debug!(
                "Discarding stale refresh generation {} (latest {})",
                outcome.generation, self.latest_requested
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::check::runner::RegistryMap;
    use crate::tool::error::ProbeError;
    use crate::tool::probe::{LocalProbe, MockLocalProbe};
    use crate::tool::types::{RemoteSource, ToolSpec, VersionAdapter};
    use crate::version::registry::MockRegistry;
    use crate::version::types::RegistryType;

    fn checker<P: LocalProbe + 'static>(probe: P, latest: &'static str) -> Arc<Checker> {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_latest_version()
            .returning(move |_| Ok(latest.to_string()));

        let mut registries: RegistryMap = HashMap::new();
        registries.insert(RegistryType::GitHub, Arc::new(registry));

        let tool = ToolSpec {
            name: "nuclei".to_string(),
            binary: "nuclei".to_string(),
            version_args: vec!["-version".to_string()],
            adapter: VersionAdapter::ProjectDiscovery,
            source: RemoteSource::Github("projectdiscovery/nuclei".to_string()),
            install: None,
        };

        Arc::new(Checker::new(Arc::new(probe), registries, vec![tool]))
    }

    #[tokio::test]
    async fn request_refresh_delivers_reports() {
        let mut probe = MockLocalProbe::new();
        probe
            .expect_installed_version()
            .returning(|_| Ok("v3.1.0".to_string()));

        let mut handle = RefreshWorker::spawn(checker(probe, "v3.3.7"));

        let generation = handle.request_refresh().unwrap();
        let outcome = handle.next_current().await.unwrap();

        assert_eq!(generation, 1);
        assert_eq!(outcome.generation, 1);
        assert_eq!(outcome.reports.len(), 1);
        assert!(outcome.reports[0].update_needed);
    }

    #[tokio::test]
    async fn next_current_discards_results_of_superseded_requests() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut probe = MockLocalProbe::new();
        probe.expect_installed_version().returning(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok("v3.3.7".to_string())
        });

        let mut handle = RefreshWorker::spawn(checker(probe, "v3.3.7"));

        handle.request_refresh().unwrap();
        handle.request_refresh().unwrap();
        let latest = handle.request_refresh().unwrap();

        let outcome = handle.next_current().await.unwrap();

        assert_eq!(outcome.generation, latest);
        assert!(handle.is_current(&outcome));
        assert!(calls.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn is_current_rejects_older_generation() {
        let mut probe = MockLocalProbe::new();
        probe
            .expect_installed_version()
            .returning(|_| Ok("v3.3.7".to_string()));

        let mut handle = RefreshWorker::spawn(checker(probe, "v3.3.7"));
        handle.request_refresh().unwrap();
        handle.request_refresh().unwrap();

        let stale = RefreshOutcome {
            generation: 1,
            reports: vec![],
        };

        assert!(!handle.is_current(&stale));

        // Drain so the worker finishes before the runtime shuts down
        let outcome = tokio::time::timeout(Duration::from_secs(5), handle.next_current())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.generation, 2);
    }

    /// Probe whose version command takes longer than the refresh cadence
    struct SlowProbe {
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl LocalProbe for SlowProbe {
        async fn installed_version(&self, _tool: &ToolSpec) -> Result<String, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok("v3.1.0".to_string())
        }
    }

    #[tokio::test]
    async fn slow_cycles_are_delivered_when_ticks_wait_for_pending_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe = SlowProbe {
            delay: Duration::from_millis(200),
            calls: Arc::clone(&calls),
        };
        let mut handle = RefreshWorker::spawn(checker(probe, "v3.3.7"));
        let mut ticker = tokio::time::interval(Duration::from_millis(20));

        let mut delivered = Vec::new();
        let watch = async {
            while delivered.len() < 2 {
                tokio::select! {
                    _ = ticker.tick() => {
                        if !handle.is_pending() {
                            handle.request_refresh().unwrap();
                        }
                    }
                    outcome = handle.next_current() => {
                        delivered.push(outcome.unwrap().generation);
                    }
                }
            }
        };
        tokio::time::timeout(Duration::from_secs(5), watch)
            .await
            .unwrap();

        assert_eq!(delivered, vec![1, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!handle.is_pending());
    }

    #[tokio::test]
    async fn is_pending_tracks_outstanding_request() {
        let mut probe = MockLocalProbe::new();
        probe
            .expect_installed_version()
            .returning(|_| Ok("v3.3.7".to_string()));

        let mut handle = RefreshWorker::spawn(checker(probe, "v3.3.7"));
        assert!(!handle.is_pending());

        handle.request_refresh().unwrap();
        assert!(handle.is_pending());

        handle.next_current().await.unwrap();
        assert!(!handle.is_pending());
    }
}
