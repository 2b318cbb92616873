use std::sync::Arc;

use routewatch_core::owners::OwnerTable;
use routewatch_gateway::GatewayClient;
use routewatch_slack::SlackClient;
use sqlx::PgPool;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: PgPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Gateway API client, absent when the gateway credentials are not
    /// configured. Check runs fail per-request in that case; the rest of
    /// the API stays up.
    pub gateway: Option<Arc<GatewayClient>>,
    /// Slack client, absent when notifications are not configured.
    pub slack: Option<Arc<SlackClient>>,
    /// Route-name to Slack-user owner mapping, loaded once at startup.
    pub owners: Arc<OwnerTable>,
}
