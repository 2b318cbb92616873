//! Unhealthy route log entity model and insert DTO.

use routewatch_core::route::{placeholder_route_id, UnhealthyRoute};
use routewatch_core::types::{RunId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `unhealthy_routes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UnhealthyRouteRow {
    pub id: i64,
    pub run_id: RunId,
    pub route_id: Option<String>,
    pub route_name: Option<String>,
    pub phone_number: Option<String>,
    pub country: Option<String>,
    pub app_version: Option<String>,
    pub battery: Option<f64>,
    pub charging: Option<bool>,
    pub last_active_time: Option<i64>,
    /// JSON array of issue strings, never empty.
    pub issues: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending one unhealthy route observation.
#[derive(Debug, Clone)]
pub struct CreateUnhealthyRoute {
    pub run_id: RunId,
    pub route_id: String,
    pub route_name: Option<String>,
    pub phone_number: Option<String>,
    pub country: Option<String>,
    pub app_version: Option<String>,
    pub battery: Option<f64>,
    pub charging: Option<bool>,
    pub last_active_time: Option<i64>,
    pub issues: serde_json::Value,
}

impl CreateUnhealthyRoute {
    /// Build the insert row for one unhealthy route.
    ///
    /// A route that arrived without an id gets a synthesized placeholder so
    /// the row still carries a unique tracing key.
    pub fn from_unhealthy(unhealthy: &UnhealthyRoute) -> Self {
        let route = &unhealthy.route;
        Self {
            run_id: unhealthy.run_id,
            route_id: route.id.clone().unwrap_or_else(placeholder_route_id),
            route_name: route.name.clone(),
            phone_number: route.phone_number.clone(),
            country: route.country.clone(),
            app_version: route.app_version.clone(),
            battery: route.battery,
            charging: route.charging,
            last_active_time: route.last_active_time,
            issues: serde_json::Value::from(unhealthy.issues.clone()),
        }
    }
}
