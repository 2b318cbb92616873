//! Background jobs spawned from the server entrypoint.

pub mod check_interval;
