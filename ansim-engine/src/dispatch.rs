//! Alert dispatcher boundary.
//!
//! User-visible notification lives behind [`AlertDispatcher`] so the
//! detection loop stays testable without a real notification subsystem.
//! The engine invokes a dispatcher at most once per zone entry and never
//! retries a failed dispatch.

use async_trait::async_trait;
use log::info;

use ansim_core::monitor::Alert;

use crate::error::DispatchError;

/// Delivers alerts to the user.
#[async_trait]
pub trait AlertDispatcher: Send + Sync {
    /// Present one alert. Failures are reported once and not retried.
    async fn dispatch(&self, alert: &Alert) -> Result<(), DispatchError>;
}

/// Dispatcher that only logs the alert.
///
/// Stand-in for platforms where no notifier is wired up yet; it never
/// fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDispatcher;

#[async_trait]
impl AlertDispatcher for LogDispatcher {
    async fn dispatch(&self, alert: &Alert) -> Result<(), DispatchError> {
        info!(
            "alert for zone {}: {} - {}",
            alert.zone_id, alert.title, alert.body
        );
        Ok(())
    }
}
