//! `routewatch-checker` -- one-shot route health check.
//!
//! Fetches the route list from the telephony gateway, classifies every
//! route, records unhealthy ones, and posts a Slack alert when configured.
//! Intended for cron or manual runs; exits non-zero when the upstream
//! fetch fails.
//!
//! # Environment variables
//!
//! | Variable             | Required | Default        | Description                         |
//! |----------------------|----------|----------------|-------------------------------------|
//! | `GATEWAY_BASE_URL`   | yes      | --             | Gateway API base URL                |
//! | `GATEWAY_API_KEY`    | yes      | --             | API key (basic-auth username)       |
//! | `GATEWAY_PROJECT_ID` | yes      | --             | Project whose routes are checked    |
//! | `DB_*`               | no       | local defaults | Postgres connection settings        |
//! | `SLACK_BOT_TOKEN`    | no       | --             | Bot token; alerts disabled if unset |
//! | `SLACK_CHANNEL_ID`   | no       | --             | Alert channel; disabled if unset    |
//! | `OWNERS_FILE`        | no       | `owners.json`  | Route-name to Slack-user mapping    |

use routewatch_core::owners::OwnerTable;
use routewatch_gateway::{GatewayClient, GatewayConfig};
use routewatch_pipeline::{run_check, CheckDeps, RunOptions};
use routewatch_slack::{SlackClient, SlackConfig};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routewatch_checker=info,routewatch_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let gateway_config = GatewayConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Gateway credentials are required");
        std::process::exit(1);
    });
    let gateway = GatewayClient::new(gateway_config);

    let db_config = routewatch_db::DbConfig::from_env();
    let pool = routewatch_db::create_pool(&db_config);

    match routewatch_db::health_check(&pool).await {
        Ok(()) => {
            if let Err(e) = routewatch_db::run_migrations(&pool).await {
                tracing::error!(error = %e, "Failed to apply database migrations");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Database unreachable, unhealthy routes will not be recorded");
        }
    }

    let slack = SlackConfig::from_env().map(SlackClient::new);
    if slack.is_none() {
        tracing::warn!("Slack not configured, alert delivery disabled");
    }

    let owners = OwnerTable::from_env();

    let deps = CheckDeps {
        gateway: &gateway,
        pool: &pool,
        slack: slack.as_ref(),
        owners: &owners,
    };

    // The one-shot run considers the whole fleet, managed or not.
    match run_check(&deps, RunOptions::default()).await {
        Ok(report) => {
            for record in &report.unhealthy {
                tracing::warn!(
                    route = %record.route.display_label(),
                    issues = ?record.issues,
                    "Unhealthy route"
                );
            }
            tracing::info!(
                run_id = %report.run_id,
                total_routes = report.total_routes,
                unhealthy_count = report.unhealthy_count(),
                status = ?report.status(),
                "Check complete"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Check failed: could not fetch routes from gateway");
            std::process::exit(1);
        }
    }
}
