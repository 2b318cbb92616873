//! The run coordinator.

use chrono::Utc;
use routewatch_core::health::evaluate_route;
use routewatch_core::owners::OwnerTable;
use routewatch_core::route::UnhealthyRoute;
use routewatch_gateway::{GatewayClient, GatewayError};
use routewatch_slack::SlackClient;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::notify::send_alert;
use crate::persist::persist_unhealthy;
use crate::report::RunReport;

/// Collaborators for a check run, constructed once at process start and
/// passed in by reference so tests can substitute their own.
pub struct CheckDeps<'a> {
    pub gateway: &'a GatewayClient,
    pub pool: &'a PgPool,
    pub slack: Option<&'a SlackClient>,
    pub owners: &'a OwnerTable,
}

/// Per-invocation switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Consider only routes explicitly marked as managed. Filtered-out
    /// routes are excluded entirely, not counted as healthy.
    pub managed_only: bool,
}

/// Execute one check run: fetch → filter → classify → persist → notify.
///
/// A fetch failure short-circuits the run and is the only error this
/// function returns. Once unhealthy routes exist, persistence and
/// notification both run; each is best-effort and neither can prevent the
/// other. A fully healthy fleet skips both.
pub async fn run_check(
    deps: &CheckDeps<'_>,
    options: RunOptions,
) -> Result<RunReport, GatewayError> {
    let run_id = Uuid::new_v4();
    info!(%run_id, managed_only = options.managed_only, "Starting route health check");

    let mut routes = deps.gateway.list_routes().await?;
    if options.managed_only {
        routes.retain(|route| route.is_managed());
    }
    let total_routes = routes.len();

    // One timestamp for the whole batch keeps the classification and its
    // log output deterministic.
    let now = Utc::now();
    let unhealthy: Vec<UnhealthyRoute> = routes
        .into_iter()
        .filter_map(|route| {
            let issues = evaluate_route(&route, now);
            UnhealthyRoute::from_route(route, issues, run_id)
        })
        .collect();

    info!(
        %run_id,
        total_routes,
        unhealthy_count = unhealthy.len(),
        "Classification complete"
    );

    if unhealthy.is_empty() {
        return Ok(RunReport {
            run_id,
            total_routes,
            unhealthy,
        });
    }

    let inserted = persist_unhealthy(deps.pool, &unhealthy, run_id).await;
    info!(%run_id, inserted, "Persistence finished");

    send_alert(deps.slack, deps.owners, &unhealthy, run_id).await;

    Ok(RunReport {
        run_id,
        total_routes,
        unhealthy,
    })
}
