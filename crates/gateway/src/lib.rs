//! REST client for the telephony gateway's device-status API.
//!
//! One endpoint matters to this service: the per-project phone/route list.
//! The client issues a single bounded request per check run and never
//! retries; failure handling belongs to the pipeline.

pub mod client;
pub mod config;

pub use client::{routes_from_payload, GatewayClient, GatewayError};
pub use config::{GatewayConfig, GatewayConfigError};
