//! Alert composition and delivery.

use routewatch_core::owners::OwnerTable;
use routewatch_core::route::UnhealthyRoute;
use routewatch_core::types::RunId;
use routewatch_slack::{mention, SlackClient};
use tracing::{error, info, warn};

/// Compose the alert for one run: a header line naming the run, then one
/// line per route in input order.
///
/// Each route line reads
/// `• {mention}{name-or-id} ({phone-or-"unknown"}): {issues}` where the
/// mention prefix appears only when the owner table resolves the route's
/// display name.
pub fn format_alert_message(
    records: &[UnhealthyRoute],
    owners: &OwnerTable,
    run_id: RunId,
) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(format!("Unhealthy routes detected (run {run_id}):"));

    for record in records {
        let mention_prefix = record
            .route
            .name
            .as_deref()
            .and_then(|name| owners.resolve(name))
            .map(|owner| format!("{} ", mention(owner)))
            .unwrap_or_default();
        let phone = record.route.phone_number.as_deref().unwrap_or("unknown");

        lines.push(format!(
            "• {mention_prefix}{} ({phone}): {}",
            record.route.display_label(),
            record.issues.join(", ")
        ));
    }

    lines.join("\n")
}

/// Deliver the alert for one run, if Slack is configured.
///
/// Never propagates an error: a missing client downgrades to a warning,
/// and a delivery failure is logged and swallowed.
pub async fn send_alert(
    slack: Option<&SlackClient>,
    owners: &OwnerTable,
    records: &[UnhealthyRoute],
    run_id: RunId,
) {
    let Some(client) = slack else {
        warn!(%run_id, "Slack is not configured, skipping alert");
        return;
    };

    let message = format_alert_message(records, owners, run_id);
    match client.post_message(&message).await {
        Ok(()) => info!(%run_id, routes = records.len(), "Alert delivered"),
        Err(err) => error!(%run_id, error = %err, "Failed to deliver alert"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routewatch_core::route::RouteRecord;

    fn unhealthy(name: Option<&str>, id: Option<&str>, phone: Option<&str>) -> UnhealthyRoute {
        UnhealthyRoute::from_route(
            RouteRecord {
                id: id.map(str::to_string),
                name: name.map(str::to_string),
                phone_number: phone.map(str::to_string),
                ..Default::default()
            },
            vec![
                "Critical battery level (15%)".to_string(),
                "Last active 5.0 minutes ago".to_string(),
            ],
            uuid::Uuid::new_v4(),
        )
        .unwrap()
    }

    fn owners() -> OwnerTable {
        let path = std::env::temp_dir().join(format!("owners-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{"Router-A": "U123"}"#).unwrap();
        let table = OwnerTable::load(&path);
        std::fs::remove_file(&path).unwrap();
        table
    }

    #[test]
    fn header_names_the_run() {
        let run_id = uuid::Uuid::new_v4();
        let message = format_alert_message(&[], &OwnerTable::empty(), run_id);
        assert_eq!(message, format!("Unhealthy routes detected (run {run_id}):"));
    }

    #[test]
    fn mapped_owner_gets_a_mention_prefix() {
        let records = [unhealthy(Some("Router-A"), Some("r-1"), Some("+15550001111"))];
        let message = format_alert_message(&records, &owners(), uuid::Uuid::new_v4());

        let line = message.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "• <@U123> Router-A (+15550001111): Critical battery level (15%), Last active 5.0 minutes ago"
        );
    }

    #[test]
    fn unmapped_name_gets_no_mention() {
        let records = [unhealthy(Some("Router-Z"), Some("r-1"), Some("+15550001111"))];
        let message = format_alert_message(&records, &owners(), uuid::Uuid::new_v4());

        let line = message.lines().nth(1).unwrap();
        assert!(line.starts_with("• Router-Z ("));
        assert!(!line.contains("<@"));
    }

    #[test]
    fn missing_name_falls_back_to_id_and_skips_lookup() {
        let records = [unhealthy(None, Some("r-7"), None)];
        let message = format_alert_message(&records, &owners(), uuid::Uuid::new_v4());

        let line = message.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "• r-7 (unknown): Critical battery level (15%), Last active 5.0 minutes ago"
        );
    }

    #[test]
    fn lines_follow_input_order() {
        let records = [
            unhealthy(Some("Router-B"), Some("r-2"), None),
            unhealthy(Some("Router-A"), Some("r-1"), None),
        ];
        let message = format_alert_message(&records, &OwnerTable::empty(), uuid::Uuid::new_v4());

        let lines: Vec<_> = message.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("• Router-B"));
        assert!(lines[2].starts_with("• Router-A"));
    }

    #[tokio::test]
    async fn send_alert_without_client_returns_quietly() {
        let records = [unhealthy(Some("Router-A"), Some("r-1"), None)];
        send_alert(None, &OwnerTable::empty(), &records, uuid::Uuid::new_v4()).await;
    }
}
