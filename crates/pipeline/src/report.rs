//! Run outcome types.

use routewatch_core::route::UnhealthyRoute;
use routewatch_core::types::RunId;
use serde::Serialize;

/// Overall outcome of one completed check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Every considered route passed the health rules.
    Healthy,
    /// At least one route was flagged.
    Unhealthy,
}

/// Summary of one completed check run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: RunId,
    /// Routes considered by the run (after any managed-fleet filtering).
    pub total_routes: usize,
    /// Flagged routes in classification order.
    pub unhealthy: Vec<UnhealthyRoute>,
}

impl RunReport {
    pub fn unhealthy_count(&self) -> usize {
        self.unhealthy.len()
    }

    pub fn status(&self) -> RunStatus {
        if self.unhealthy.is_empty() {
            RunStatus::Healthy
        } else {
            RunStatus::Unhealthy
        }
    }
}
