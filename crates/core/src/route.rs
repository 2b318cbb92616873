//! Route records as reported by the telephony gateway, and the unhealthy
//! classification wrapper the pipeline carries through persist/notify.

use serde::{Deserialize, Serialize};

use crate::types::RunId;

/// Prefix for synthesized ids of routes the gateway reported without one.
const PLACEHOLDER_ID_PREFIX: &str = "unknown";

/// A device/route as reported by the gateway's device-status API.
///
/// Owned by the gateway; every field is optional because the upstream
/// payload omits anything the device has not reported yet. This system
/// never mutates a record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    /// Gateway-assigned route identifier.
    pub id: Option<String>,
    /// Display name; also the owner-table lookup key.
    pub name: Option<String>,
    /// Phone number on this route.
    pub phone_number: Option<String>,
    /// Country the line is registered in.
    pub country: Option<String>,
    /// Version of the gateway app running on the device.
    pub app_version: Option<String>,
    /// Battery percentage (0–100) if the device reports one.
    pub battery: Option<f64>,
    /// Whether the device was charging at report time.
    pub charging: Option<bool>,
    /// Last time the device reported in, epoch seconds.
    pub last_active_time: Option<i64>,
    /// Management flag: `true` marks the route as part of the managed fleet.
    pub managed: Option<bool>,
}

impl RouteRecord {
    /// Whether the route is explicitly marked as managed.
    ///
    /// Only an explicit `true` counts; `false` and absent are both
    /// excluded by the managed-only filter.
    pub fn is_managed(&self) -> bool {
        self.managed == Some(true)
    }

    /// Name if present, else the gateway id, else `"unknown"`: the label
    /// used for this route in alert lines.
    pub fn display_label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("unknown")
    }
}

/// A route that failed at least one health rule during a run.
///
/// Carries the originating [`RouteRecord`] untouched, the issues in
/// rule-evaluation order, and the run it was observed under. Immutable
/// once created; the issue list is never empty because construction goes
/// through [`UnhealthyRoute::from_route`].
#[derive(Debug, Clone, Serialize)]
pub struct UnhealthyRoute {
    /// The gateway record exactly as fetched.
    #[serde(flatten)]
    pub route: RouteRecord,
    /// Detected issues in rule order; never empty.
    pub issues: Vec<String>,
    /// Run this observation belongs to (correlation only, not serialized
    /// per-record; the report carries it once).
    #[serde(skip)]
    pub run_id: RunId,
}

impl UnhealthyRoute {
    /// Build an unhealthy route from a classified record.
    ///
    /// Returns `None` when `issues` is empty; a record with no issues is
    /// healthy and must not enter the persist/notify stages.
    pub fn from_route(route: RouteRecord, issues: Vec<String>, run_id: RunId) -> Option<Self> {
        if issues.is_empty() {
            return None;
        }
        Some(Self {
            route,
            issues,
            run_id,
        })
    }
}

/// Synthesize a unique placeholder id for a route reported without one.
///
/// Rows still need a unique tracing key under the per-run unique
/// constraint; the v4-UUID suffix keeps placeholders from colliding with
/// each other, including across concurrent runs.
pub fn placeholder_route_id() -> String {
    format!("{PLACEHOLDER_ID_PREFIX}-{}", uuid::Uuid::new_v4())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
