//! Scheduled check runs.
//!
//! Spawns a background task that drives the health check pipeline on a
//! fixed interval using `tokio::time::interval`. Only started when
//! `CHECK_INTERVAL_SECS` is configured; the HTTP trigger stays available
//! either way.

use std::time::Duration;

use routewatch_pipeline::{run_check, CheckDeps, RunOptions};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Run the scheduled check loop.
///
/// Each tick drives one full pipeline run over the managed fleet. A failed
/// run is logged and the loop keeps going. Runs until `cancel` is
/// triggered. Overlap with an HTTP-triggered run is harmless since every
/// run is independent.
pub async fn run(state: AppState, interval_secs: u64, cancel: CancellationToken) {
    let Some(gateway) = state.gateway.as_deref() else {
        tracing::warn!("Scheduled checks disabled: gateway credentials are not configured");
        return;
    };

    tracing::info!(interval_secs, "Scheduled check job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Scheduled check job stopping");
                break;
            }
            _ = interval.tick() => {
                let deps = CheckDeps {
                    gateway,
                    pool: &state.pool,
                    slack: state.slack.as_deref(),
                    owners: &state.owners,
                };
                match run_check(&deps, RunOptions { managed_only: true }).await {
                    Ok(report) => {
                        tracing::info!(
                            run_id = %report.run_id,
                            total_routes = report.total_routes,
                            unhealthy_count = report.unhealthy_count(),
                            "Scheduled check completed"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Scheduled check failed");
                    }
                }
            }
        }
    }
}
