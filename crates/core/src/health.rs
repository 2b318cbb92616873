//! Health rule evaluation for gateway routes.
//!
//! Pure logic, no I/O. The caller fetches the route list and passes each
//! record in together with the current time; rules run in a fixed order so
//! issue lists and log output stay deterministic.

use crate::route::RouteRecord;
use crate::types::Timestamp;

/// Battery percentage below which a route is critical regardless of
/// charging state.
const CRITICAL_BATTERY_PERCENT: f64 = 20.0;

/// Battery percentage below which a route is flagged when it is also
/// explicitly not charging.
const LOW_BATTERY_PERCENT: f64 = 30.0;

/// Minutes of silence before a route counts as stale.
///
/// TODO: confirm this window with ops. One minute alerts on a single
/// missed check-in, far tighter than the battery thresholds' granularity.
const STALE_AFTER_MINUTES: f64 = 1.0;

/// Evaluate one route against the health rules.
///
/// Returns the detected issues in rule order (staleness first, then
/// battery); an empty vec means the route is healthy. Evaluated
/// independently per record, with no cross-record state.
pub fn evaluate_route(route: &RouteRecord, now: Timestamp) -> Vec<String> {
    let mut issues = Vec::new();

    // Rule 1: connectivity staleness.
    match route.last_active_time {
        None | Some(0) => issues.push("Never reported active".to_string()),
        Some(last_active) => {
            let elapsed_ms = now.timestamp_millis() as f64 - (last_active as f64) * 1000.0;
            let minutes_ago = elapsed_ms / 60_000.0;
            if minutes_ago > STALE_AFTER_MINUTES {
                issues.push(format!("Last active {minutes_ago:.1} minutes ago"));
            }
        }
    }

    // Rule 2: battery. Only evaluated when the device reported a level;
    // the two branches are mutually exclusive.
    if let Some(battery) = route.battery {
        if battery < CRITICAL_BATTERY_PERCENT {
            issues.push(format!("Critical battery level ({battery}%)"));
        } else if battery < LOW_BATTERY_PERCENT && route.charging == Some(false) {
            issues.push(format!("Battery low and not charging ({battery}%)"));
        }
    }

    issues
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
