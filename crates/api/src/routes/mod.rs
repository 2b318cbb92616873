pub mod checks;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /checks                     trigger a check run (POST)
/// /routes/unhealthy           unhealthy-route log (GET, ?run_id= or ?hours=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(checks::router())
}
