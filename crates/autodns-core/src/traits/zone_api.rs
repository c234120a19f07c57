// # Zone API Trait
//
// Defines the interface between the lifecycle adapters and a zone backend.
//
// ## Implementations
//
// - Live AutoDNS API: `autodns-client` crate
// - In-memory: `autodns_core::memory::MemoryZoneApi`
//
// ## Usage
//
// ```rust,ignore
// use autodns_core::{Record, ZoneApi};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let api = /* ZoneApi implementation */;
//
//     let zone = api.get_zone("example.com").await?;
//     api.create_records(&zone.id(), &[Record::new("www", 60, "A", "192.0.2.1")])
//         .await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Record, Zone};

/// Trait for zone backends
///
/// Zone ids are `origin@virtualNameServer` strings. Every method taking a
/// zone id must reject a malformed one with
/// [`Error::InvalidZoneId`](crate::Error::InvalidZoneId) before doing any
/// I/O.
///
/// # Thread Safety
///
/// Implementations are shared across async tasks behind an `Arc`.
///
/// # Single-shot
///
/// Each call is one attempt. Implementations do not retry, back off or
/// cache; the caller sees every failure.
///
/// # Mutations
///
/// `create_records`, `update_records` and `delete_records` only report
/// success or failure. Callers that need the resulting state re-read it
/// with [`get_records`](ZoneApi::get_records).
#[async_trait]
pub trait ZoneApi: Send + Sync {
    /// Resolve an origin to its zone
    ///
    /// Exactly one zone must match; zero or several matches is a
    /// [`Error::Lookup`](crate::Error::Lookup).
    async fn get_zone(&self, origin: &str) -> Result<Zone>;

    /// Fetch every record of a zone
    async fn get_records(&self, zone_id: &str) -> Result<Vec<Record>>;

    /// Add records (adds-only batch)
    async fn create_records(&self, zone_id: &str, records: &[Record]) -> Result<()>;

    /// Remove `old_records` and add `new_records` in one batch
    ///
    /// No diffing happens here. `old_records` must be exactly what is stored
    /// remotely; a stale list removes the wrong records or none at all.
    async fn update_records(
        &self,
        zone_id: &str,
        old_records: &[Record],
        new_records: &[Record],
    ) -> Result<()>;

    /// Remove records (removals-only batch)
    async fn delete_records(&self, zone_id: &str, records: &[Record]) -> Result<()>;

    /// Backend name (for logging)
    fn backend_name(&self) -> &'static str;
}
