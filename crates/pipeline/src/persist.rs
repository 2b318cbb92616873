//! Best-effort persistence of unhealthy routes.

use routewatch_core::route::UnhealthyRoute;
use routewatch_core::types::RunId;
use routewatch_db::models::unhealthy_route::CreateUnhealthyRoute;
use routewatch_db::repositories::UnhealthyRouteRepo;
use sqlx::PgPool;
use tracing::{error, warn};

/// Append unhealthy routes to the log. Returns how many rows were written.
///
/// Best-effort by contract: the whole batch runs over one acquired
/// connection, each insert fails independently, and no error escapes this
/// function. An empty batch acquires nothing.
pub async fn persist_unhealthy(pool: &PgPool, records: &[UnhealthyRoute], run_id: RunId) -> usize {
    if records.is_empty() {
        return 0;
    }

    let mut conn = match pool.acquire().await {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                %run_id,
                error = %err,
                "Could not acquire database connection, skipping persistence"
            );
            return 0;
        }
    };

    let mut inserted = 0;
    for record in records {
        let row = CreateUnhealthyRoute::from_unhealthy(record);
        match UnhealthyRouteRepo::insert(&mut *conn, &row).await {
            Ok(_) => inserted += 1,
            Err(err) => {
                warn!(
                    %run_id,
                    route_id = %row.route_id,
                    error = %err,
                    "Failed to persist unhealthy route"
                );
            }
        }
    }

    inserted
}
