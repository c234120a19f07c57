// # Memory Zone Backend
//
// In-memory implementation of ZoneApi.
//
// ## Purpose
//
// Behaves like the AutoDNS stream API without touching the network:
// - Useful for contract tests of the lifecycle adapters
// - Backs `autodnsctl --backend memory` for dry runs
//
// ## Stream semantics
//
// A stream batch is applied under one write lock: removals first, then
// additions. A removal matches a stored record on name, type, value and
// preference (ttl is ignored). An addition identical to a stored record
// replaces it, so re-submitting a batch does not duplicate records.
//
// Nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Record, Zone, ZoneId, ZoneStream};
use crate::traits::ZoneApi;

/// In-memory zone backend
///
/// Zones are stored in a HashMap keyed by origin, protected by a RwLock.
/// Clones share the same zones.
///
/// # Example
///
/// ```rust,no_run
/// use autodns_core::memory::MemoryZoneApi;
/// use autodns_core::{Record, Zone, ZoneApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = MemoryZoneApi::new();
///     api.insert_zone(Zone {
///         origin: "example.com".into(),
///         name_server_group: "ns14.net".into(),
///         virtual_name_server: "a.ns14.net".into(),
///         records: Vec::new(),
///     })
///     .await;
///
///     api.create_records("example.com@a.ns14.net", &[Record::new("", 60, "A", "192.0.2.1")])
///         .await?;
///     assert_eq!(api.get_records("example.com@a.ns14.net").await?.len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryZoneApi {
    zones: Arc<RwLock<HashMap<String, Zone>>>,
}

impl MemoryZoneApi {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a zone
    pub async fn insert_zone(&self, zone: Zone) {
        let mut guard = self.zones.write().await;
        guard.insert(zone.origin.clone(), zone);
    }

    /// Snapshot of a zone, if present
    pub async fn zone(&self, origin: &str) -> Option<Zone> {
        self.zones.read().await.get(origin).cloned()
    }

    /// Number of zones held
    pub async fn len(&self) -> usize {
        self.zones.read().await.len()
    }

    /// Check if no zone is held
    pub async fn is_empty(&self) -> bool {
        self.zones.read().await.is_empty()
    }

    async fn apply(&self, zone_id: &str, stream: ZoneStream) -> Result<()> {
        let id: ZoneId = zone_id.parse()?;

        let mut guard = self.zones.write().await;
        let zone = guard
            .get_mut(&id.origin)
            .ok_or_else(|| Error::lookup(format!("zone {} does not exist", id.origin)))?;

        for rem in &stream.rems {
            if let Some(pos) = zone.records.iter().position(|r| same_record(r, rem)) {
                zone.records.remove(pos);
            }
        }

        for add in stream.adds {
            match zone.records.iter().position(|r| same_record(r, &add)) {
                Some(pos) => zone.records[pos] = add,
                None => zone.records.push(add),
            }
        }

        debug!(
            "Applied stream to {}: {} record(s) now in zone",
            id.origin,
            zone.records.len()
        );
        Ok(())
    }
}

/// Record identity inside a zone (ttl is not part of it)
fn same_record(a: &Record, b: &Record) -> bool {
    a.is_in_set(&b.name, &b.record_type) && a.value == b.value && a.pref == b.pref
}

#[async_trait]
impl ZoneApi for MemoryZoneApi {
    async fn get_zone(&self, origin: &str) -> Result<Zone> {
        let guard = self.zones.read().await;
        let matches: Vec<&Zone> = guard.values().filter(|z| z.origin == origin).collect();

        match matches.as_slice() {
            [zone] => Ok((*zone).clone()),
            _ => Err(Error::lookup(format!(
                "origin {} does not exist or more than one result has been returned ({} found)",
                origin,
                matches.len()
            ))),
        }
    }

    async fn get_records(&self, zone_id: &str) -> Result<Vec<Record>> {
        let id: ZoneId = zone_id.parse()?;

        let guard = self.zones.read().await;
        guard
            .get(&id.origin)
            .filter(|z| z.virtual_name_server == id.virtual_name_server)
            .map(|z| z.records.clone())
            .ok_or_else(|| Error::lookup(format!("zone {} does not exist", id)))
    }

    async fn create_records(&self, zone_id: &str, records: &[Record]) -> Result<()> {
        self.apply(zone_id, ZoneStream::adds(records)).await
    }

    async fn update_records(
        &self,
        zone_id: &str,
        old_records: &[Record],
        new_records: &[Record],
    ) -> Result<()> {
        self.apply(zone_id, ZoneStream::replace(old_records, new_records))
            .await
    }

    async fn delete_records(&self, zone_id: &str, records: &[Record]) -> Result<()> {
        self.apply(zone_id, ZoneStream::removals(records)).await
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
