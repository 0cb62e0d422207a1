//! Position source boundary.
//!
//! The platform's location service is abstracted behind [`PositionSource`]
//! so the detection loop can run against anything that delivers fixes over
//! a channel - a device GPS wrapper in production, a scripted sender in
//! tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::SubscribeError;

pub use ansim_core::detector::LocationFix;

/// Requested positioning accuracy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyTier {
    /// Best available fix quality
    #[default]
    High,
    /// Balanced power/accuracy trade-off
    Balanced,
    /// Coarse, low-power fixes
    Low,
}

/// Subscription parameters handed to the position source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    /// Desired accuracy tier
    pub accuracy: AccuracyTier,
    /// Minimum displacement in meters between fixes forwarded to the
    /// detector. The supervisor enforces this even if the source does not.
    pub min_distance_m: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            accuracy: AccuracyTier::High,
            min_distance_m: 10.0,
        }
    }
}

/// Receiving end of a fix subscription.
pub type FixReceiver = mpsc::Receiver<LocationFix>;

/// A source of position fixes.
///
/// Permission state is signalled distinctly from "no fix yet": a denied
/// subscription fails with [`SubscribeError::PermissionDenied`], while a
/// granted one returns a receiver that simply stays empty until the first
/// fix arrives. Dropping the sending side ends the stream.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Subscribe to position updates.
    async fn subscribe(&self, config: &SourceConfig) -> Result<FixReceiver, SubscribeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_matches_field_observations() {
        let config = SourceConfig::default();
        assert_eq!(config.accuracy, AccuracyTier::High);
        assert_eq!(config.min_distance_m, 10.0);
    }

    #[test]
    fn test_config_json_shape() {
        let config = SourceConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["accuracy"], "high");
        assert_eq!(json["minDistanceM"], 10.0);
    }
}
