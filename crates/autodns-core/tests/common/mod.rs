//! Test doubles and common utilities for lifecycle contract tests

#![allow(dead_code)]

use autodns_core::error::Result;
use autodns_core::memory::MemoryZoneApi;
use autodns_core::model::{Record, Zone};
use autodns_core::traits::ZoneApi;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const ORIGIN: &str = "example.com";
pub const ZONE_ID: &str = "example.com@a.ns14.net";

/// One backend call as seen by the double
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetZone(String),
    GetRecords(String),
    Create {
        zone_id: String,
        adds: Vec<Record>,
    },
    Update {
        zone_id: String,
        rems: Vec<Record>,
        adds: Vec<Record>,
    },
    Delete {
        zone_id: String,
        rems: Vec<Record>,
    },
}

/// A ZoneApi that records every call before delegating to a memory backend
pub struct RecordingZoneApi {
    inner: MemoryZoneApi,
    calls: Arc<Mutex<Vec<Call>>>,
    mutation_count: Arc<AtomicUsize>,
}

impl RecordingZoneApi {
    pub fn new(inner: MemoryZoneApi) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
            mutation_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of create/update/delete calls
    pub fn mutation_count(&self) -> usize {
        self.mutation_count.load(Ordering::SeqCst)
    }

    /// The wrapped memory backend
    pub fn inner(&self) -> &MemoryZoneApi {
        &self.inner
    }

    fn push(&self, call: Call) {
        if matches!(call, Call::Create { .. } | Call::Update { .. } | Call::Delete { .. }) {
            self.mutation_count.fetch_add(1, Ordering::SeqCst);
        }
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl ZoneApi for RecordingZoneApi {
    async fn get_zone(&self, origin: &str) -> Result<Zone> {
        self.push(Call::GetZone(origin.to_string()));
        self.inner.get_zone(origin).await
    }

    async fn get_records(&self, zone_id: &str) -> Result<Vec<Record>> {
        self.push(Call::GetRecords(zone_id.to_string()));
        self.inner.get_records(zone_id).await
    }

    async fn create_records(&self, zone_id: &str, records: &[Record]) -> Result<()> {
        self.push(Call::Create {
            zone_id: zone_id.to_string(),
            adds: records.to_vec(),
        });
        self.inner.create_records(zone_id, records).await
    }

    async fn update_records(
        &self,
        zone_id: &str,
        old_records: &[Record],
        new_records: &[Record],
    ) -> Result<()> {
        self.push(Call::Update {
            zone_id: zone_id.to_string(),
            rems: old_records.to_vec(),
            adds: new_records.to_vec(),
        });
        self.inner
            .update_records(zone_id, old_records, new_records)
            .await
    }

    async fn delete_records(&self, zone_id: &str, records: &[Record]) -> Result<()> {
        self.push(Call::Delete {
            zone_id: zone_id.to_string(),
            rems: records.to_vec(),
        });
        self.inner.delete_records(zone_id, records).await
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

/// The zone every contract test starts from
pub fn test_zone() -> Zone {
    Zone {
        origin: ORIGIN.to_string(),
        name_server_group: "ns14.net".to_string(),
        virtual_name_server: "a.ns14.net".to_string(),
        records: vec![
            Record::new("", 86400, "NS", "a.ns14.net"),
            Record::new("www", 300, "CNAME", "example.com"),
        ],
    }
}

/// A recording backend seeded with [`test_zone`]
pub async fn seeded_api() -> Arc<RecordingZoneApi> {
    let memory = MemoryZoneApi::new();
    memory.insert_zone(test_zone()).await;
    Arc::new(RecordingZoneApi::new(memory))
}

pub fn values(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}
