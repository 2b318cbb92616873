//! HTTP request handlers.

pub mod checks;
