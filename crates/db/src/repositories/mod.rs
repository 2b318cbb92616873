//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Reads take `&PgPool`; the insert path takes any Postgres executor so a
//! batch can run over a single acquired connection.

pub mod unhealthy_route_repo;

pub use unhealthy_route_repo::UnhealthyRouteRepo;
