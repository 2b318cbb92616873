//! Handlers for check runs and the unhealthy-route log.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use routewatch_core::route::UnhealthyRoute;
use routewatch_core::types::RunId;
use routewatch_db::models::unhealthy_route::UnhealthyRouteRow;
use routewatch_db::repositories::UnhealthyRouteRepo;
use routewatch_pipeline::{run_check, CheckDeps, RunOptions, RunReport, RunStatus};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the unhealthy-route log endpoint.
#[derive(Debug, Deserialize)]
pub struct UnhealthyLogQuery {
    /// Return only rows recorded under this run.
    pub run_id: Option<Uuid>,
    /// How many hours of history to return (default: 24). Ignored when
    /// `run_id` is given.
    pub hours: Option<i64>,
}

/// Response body for a triggered check run.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub status: RunStatus,
    pub run_id: RunId,
    pub total_routes: usize,
    pub unhealthy_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unhealthy_routes: Vec<UnhealthyRoute>,
}

impl From<RunReport> for CheckResponse {
    fn from(report: RunReport) -> Self {
        Self {
            status: report.status(),
            run_id: report.run_id,
            total_routes: report.total_routes,
            unhealthy_count: report.unhealthy_count(),
            unhealthy_routes: report.unhealthy,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/checks
///
/// Run one health check over the managed fleet and return the outcome.
/// A gateway fetch failure surfaces as 502; persistence and notification
/// problems are logged inside the pipeline and do not fail the request.
pub async fn trigger_check(State(state): State<AppState>) -> AppResult<Json<CheckResponse>> {
    let Some(gateway) = state.gateway.as_deref() else {
        return Err(AppError::InternalError(
            "gateway credentials are not configured".to_string(),
        ));
    };

    let deps = CheckDeps {
        gateway,
        pool: &state.pool,
        slack: state.slack.as_deref(),
        owners: &state.owners,
    };
    let report = run_check(&deps, RunOptions { managed_only: true }).await?;

    Ok(Json(CheckResponse::from(report)))
}

/// GET /api/v1/routes/unhealthy
///
/// List recorded unhealthy routes, either for one run (`?run_id=`) or for
/// a recent window (`?hours=`, default 24).
pub async fn list_unhealthy(
    State(state): State<AppState>,
    Query(query): Query<UnhealthyLogQuery>,
) -> AppResult<Json<DataResponse<Vec<UnhealthyRouteRow>>>> {
    let rows = match query.run_id {
        Some(run_id) => UnhealthyRouteRepo::list_by_run(&state.pool, run_id).await?,
        None => {
            let hours = query.hours.unwrap_or(24);
            if !(1..=168).contains(&hours) {
                return Err(AppError::BadRequest(
                    "hours must be between 1 and 168".to_string(),
                ));
            }
            let since = Utc::now() - Duration::hours(hours);
            UnhealthyRouteRepo::list_recent(&state.pool, since).await?
        }
    };
    Ok(Json(DataResponse { data: rows }))
}
