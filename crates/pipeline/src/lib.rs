//! The route health check pipeline.
//!
//! [`run_check`] drives one invocation end to end: fetch the route list
//! from the gateway, optionally filter to the managed fleet, classify each
//! route, then persist and notify. A fetch failure short-circuits the run;
//! the two side-effecting stages are each best-effort so a failure in one
//! cannot suppress the other.

pub mod notify;
pub mod persist;
pub mod report;
pub mod run;

pub use report::{RunReport, RunStatus};
pub use run::{run_check, CheckDeps, RunOptions};
