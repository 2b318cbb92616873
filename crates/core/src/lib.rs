//! Domain logic for routewatch: route records, health rules, and the
//! owner lookup table.
//!
//! Everything in this crate is pure apart from [`owners::OwnerTable::load`]
//! reading its JSON file once at startup. Fetching, persistence, and
//! notification live in their own crates.

pub mod health;
pub mod owners;
pub mod route;
pub mod types;
