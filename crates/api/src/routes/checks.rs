//! Route definitions for check runs and the unhealthy-route log.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::checks;
use crate::state::AppState;

/// Routes mounted at `/api/v1`.
///
/// ```text
/// POST /checks            -> trigger_check
/// GET  /routes/unhealthy  -> list_unhealthy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checks", post(checks::trigger_check))
        .route("/routes/unhealthy", get(checks::list_unhealthy))
}
