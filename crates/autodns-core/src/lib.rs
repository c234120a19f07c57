// # autodns-core
//
// Core library for managing AutoDNS zones and records from an
// infrastructure-as-code host.
//
// ## Architecture Overview
//
// - **ZoneApi**: Trait for reading zones and applying record batches
// - **model**: Wire types (`Zone`, `Record`, `ZoneStream`, `ZoneId`)
// - **resources**: Lifecycle adapters the host calls (`autodns_record`,
//   `autodns_zone`)
// - **MemoryZoneApi**: In-memory backend for tests and dry runs
// - **ClientConfig**: Endpoint, context and credentials resolution
//
// The HTTP implementation of `ZoneApi` lives in `autodns-client`.
//
// ## Design Principles
//
// 1. **Thin**: Requests are translated, never computed. Updates pass the
//    caller's old/new lists through as one stream batch.
// 2. **Single-shot**: No retries, no backoff, no caching.
// 3. **Fail early**: Malformed zone ids are rejected before any I/O.

pub mod config;
pub mod error;
pub mod memory;
pub mod model;
pub mod resources;
pub mod traits;

// Re-export core types for convenience
pub use config::{ClientConfig, ConfigOverrides};
pub use error::{Error, Result};
pub use memory::MemoryZoneApi;
pub use model::{ApiResponse, Record, Zone, ZoneId, ZoneStream};
pub use resources::{Provider, RecordModel, RecordResource, ZoneDataSource, ZoneModel};
pub use traits::ZoneApi;
