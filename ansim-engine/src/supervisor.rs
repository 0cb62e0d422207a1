//! Location stream supervisor.
//!
//! The supervisor owns the subscription to the position source and runs the
//! detection loop: one consumer task receives fixes over the channel,
//! applies the movement sampling filter, evaluates the fix against a zone
//! snapshot, and hands selected alerts to the dispatcher. Each accepted fix
//! runs through detection and dedup to completion before the next fix is
//! taken from the channel, so membership updates never interleave.

use std::sync::Arc;

use log::{debug, info, trace, warn};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use ansim_core::detector::LocationFix;
use ansim_core::geo::distance_meters;
use ansim_core::monitor::{MonitorSettings, ZoneMonitor};

use crate::dispatch::AlertDispatcher;
use crate::error::SubscribeError;
use crate::registry::SharedZones;
use crate::source::{FixReceiver, PositionSource, SourceConfig};

/// Movement-based sampling filter.
///
/// Remembers the last accepted fix and rejects fixes that moved less than
/// the threshold since then. The first fix is always accepted. This reduces
/// evaluation frequency, it is not a correctness filter.
#[derive(Debug)]
pub struct SamplingFilter {
    min_distance_m: f64,
    last_accepted: Option<LocationFix>,
}

impl SamplingFilter {
    /// Create a filter with the given minimum displacement in meters.
    pub fn new(min_distance_m: f64) -> Self {
        SamplingFilter {
            min_distance_m,
            last_accepted: None,
        }
    }

    /// Decide whether a fix reaches the detector, updating the baseline
    /// when it does.
    pub fn accept(&mut self, fix: &LocationFix) -> bool {
        if let Some(last) = &self.last_accepted {
            let moved = distance_meters(last.coordinate, fix.coordinate);
            if moved < self.min_distance_m {
                trace!("dropping fix {:.1} m from last accepted", moved);
                return false;
            }
        }
        self.last_accepted = Some(*fix);
        true
    }
}

/// Configuration and collaborators for a supervised detection loop.
pub struct StreamSupervisor {
    zones: SharedZones,
    dispatcher: Arc<dyn AlertDispatcher>,
    config: SourceConfig,
    settings: MonitorSettings,
}

impl StreamSupervisor {
    /// Create a supervisor with default source config and monitor policy.
    pub fn new(zones: SharedZones, dispatcher: Arc<dyn AlertDispatcher>) -> Self {
        StreamSupervisor {
            zones,
            dispatcher,
            config: SourceConfig::default(),
            settings: MonitorSettings::default(),
        }
    }

    /// Override the source configuration.
    pub fn with_config(mut self, config: SourceConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the alerting policy.
    pub fn with_settings(mut self, settings: MonitorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Subscribe to the source and start the detection loop on its own
    /// task.
    ///
    /// Subscription failures (notably permission denial) surface here and
    /// are not retried; nothing is spawned in that case.
    pub async fn spawn<S>(self, source: &S) -> Result<SupervisorHandle, SubscribeError>
    where
        S: PositionSource + ?Sized,
    {
        let fixes = source.subscribe(&self.config).await?;
        info!(
            "location stream subscribed ({:?} accuracy, {} m sampling)",
            self.config.accuracy, self.config.min_distance_m
        );

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_loop(self, fixes, cancel.child_token()));

        Ok(SupervisorHandle {
            cancel,
            task: Some(task),
        })
    }
}

async fn run_loop(supervisor: StreamSupervisor, mut fixes: FixReceiver, cancel: CancellationToken) {
    let mut monitor = ZoneMonitor::new(supervisor.settings);
    let mut filter = SamplingFilter::new(supervisor.config.min_distance_m);
    let mut dispatches: JoinSet<()> = JoinSet::new();

    loop {
        let fix = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("detection loop cancelled");
                break;
            }
            fix = fixes.recv() => match fix {
                Some(fix) => fix,
                None => {
                    debug!("position source closed the fix stream");
                    break;
                }
            },
        };

        // Reap finished dispatch tasks without waiting on the pending ones
        while dispatches.try_join_next().is_some() {}

        if !filter.accept(&fix) {
            continue;
        }

        let zones = supervisor.zones.snapshot().await;
        let outcome = monitor.observe(&fix, &zones);

        for alert in outcome.alerts {
            let dispatcher = Arc::clone(&supervisor.dispatcher);
            dispatches.spawn(async move {
                if let Err(err) = dispatcher.dispatch(&alert).await {
                    warn!("dropping alert for zone {}: {}", alert.zone_id, err);
                }
            });
        }
    }

    // Let in-flight dispatches finish before the task ends
    while dispatches.join_next().await.is_some() {}
}

/// Handle to a running supervisor task.
///
/// Dropping the handle also tears the loop down.
#[derive(Debug)]
pub struct SupervisorHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SupervisorHandle {
    /// Stop consuming fixes and wait for the loop to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Wait for the loop to end on its own (source closed the stream).
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Whether the loop has ended.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }
}

impl Drop for SupervisorHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
