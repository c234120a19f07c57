//! Core traits for the AutoDNS workspace
//!
//! - [`ZoneApi`]: read zones and apply record batches against a backend

pub mod zone_api;

pub use zone_api::ZoneApi;
