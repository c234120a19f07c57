//! `autodns_zone`: read-only view of a zone by origin

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::model::{Record, Zone};
use crate::traits::ZoneApi;

/// Zone state as the host stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneModel {
    /// `origin@virtualNameServer`, usable as a record set's `zone_id`
    pub id: String,
    pub origin: String,
    pub name_server_group: String,
    pub virtual_name_server: String,
    pub records: Vec<Record>,
}

impl From<Zone> for ZoneModel {
    fn from(zone: Zone) -> Self {
        Self {
            id: zone.id(),
            origin: zone.origin,
            name_server_group: zone.name_server_group,
            virtual_name_server: zone.virtual_name_server,
            records: zone.records,
        }
    }
}

/// Lifecycle adapter for `autodns_zone`
#[derive(Clone)]
pub struct ZoneDataSource {
    api: Arc<dyn ZoneApi>,
}

impl ZoneDataSource {
    /// Suffix after the provider type name
    pub const TYPE_SUFFIX: &'static str = "zone";

    pub fn new(api: Arc<dyn ZoneApi>) -> Self {
        Self { api }
    }

    /// Look the zone up by origin
    pub async fn read(&self, origin: &str) -> Result<ZoneModel> {
        let zone = self.api.get_zone(origin).await?;
        info!(
            "Read zone {} ({} record(s))",
            zone.id(),
            zone.records.len()
        );
        Ok(zone.into())
    }
}
