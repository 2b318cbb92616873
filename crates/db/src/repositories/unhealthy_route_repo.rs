//! Repository for the `unhealthy_routes` table (append-only log).

use routewatch_core::types::{RunId, Timestamp};
use sqlx::PgPool;

use crate::models::unhealthy_route::{CreateUnhealthyRoute, UnhealthyRouteRow};

/// Column list for `unhealthy_routes` SELECT queries (includes `id` and `created_at`).
const COLUMNS: &str = "\
    id, run_id, route_id, route_name, phone_number, \
    country, app_version, battery, charging, last_active_time, \
    issues, created_at";

/// Column list for `unhealthy_routes` INSERT statements (excludes auto-generated `id` and `created_at`).
const INSERT_COLUMNS: &str = "\
    run_id, route_id, route_name, phone_number, country, \
    app_version, battery, charging, last_active_time, issues";

/// Provides query operations for the unhealthy route log.
pub struct UnhealthyRouteRepo;

impl UnhealthyRouteRepo {
    /// Insert one observation.
    ///
    /// Takes any Postgres executor so the caller can run a whole batch over
    /// one acquired connection. Duplicate (run_id, route_id) pairs are
    /// rejected by the `uq_unhealthy_routes_run_route` constraint.
    pub async fn insert<'e, E>(
        executor: E,
        row: &CreateUnhealthyRoute,
    ) -> Result<UnhealthyRouteRow, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO unhealthy_routes ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UnhealthyRouteRow>(&query)
            .bind(row.run_id)
            .bind(&row.route_id)
            .bind(&row.route_name)
            .bind(&row.phone_number)
            .bind(&row.country)
            .bind(&row.app_version)
            .bind(row.battery)
            .bind(row.charging)
            .bind(row.last_active_time)
            .bind(&row.issues)
            .fetch_one(executor)
            .await
    }

    /// All observations for one run, in insertion order.
    pub async fn list_by_run(
        pool: &PgPool,
        run_id: RunId,
    ) -> Result<Vec<UnhealthyRouteRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM unhealthy_routes \
             WHERE run_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, UnhealthyRouteRow>(&query)
            .bind(run_id)
            .fetch_all(pool)
            .await
    }

    /// Observations recorded at or after the cutoff, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<UnhealthyRouteRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM unhealthy_routes \
             WHERE created_at >= $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, UnhealthyRouteRow>(&query)
            .bind(since)
            .fetch_all(pool)
            .await
    }

    /// Number of observations recorded for one run.
    pub async fn count_for_run(pool: &PgPool, run_id: RunId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM unhealthy_routes WHERE run_id = $1")
                .bind(run_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
