//! Host-facing lifecycle adapters
//!
//! The orchestration host owns schema, planning and state. It calls into
//! these adapters for the actual work:
//!
//! - [`RecordResource`]: Create / Read / Update / Delete / Import of one
//!   record set (`autodns_record`)
//! - [`ZoneDataSource`]: Read of a zone by origin (`autodns_zone`)
//!
//! Both share one backend, typically a single `AutoDnsClient` per process.

pub mod record;
pub mod zone;

pub use record::{RecordModel, RecordResource};
pub use zone::{ZoneDataSource, ZoneModel};

use crate::traits::ZoneApi;
use std::sync::Arc;

/// Type name prefix the host registers resources under
pub const PROVIDER_TYPE_NAME: &str = "autodns";

/// Entry point handed to the host after configuration
#[derive(Clone)]
pub struct Provider {
    api: Arc<dyn ZoneApi>,
}

impl Provider {
    /// Wrap a configured backend
    pub fn new(api: Arc<dyn ZoneApi>) -> Self {
        Self { api }
    }

    /// `autodns_record` resource
    pub fn record_resource(&self) -> RecordResource {
        RecordResource::new(Arc::clone(&self.api))
    }

    /// `autodns_zone` data source
    pub fn zone_data_source(&self) -> ZoneDataSource {
        ZoneDataSource::new(Arc::clone(&self.api))
    }

    /// Resource type names
    pub fn resource_names(&self) -> Vec<String> {
        vec![format!("{}_{}", PROVIDER_TYPE_NAME, RecordResource::TYPE_SUFFIX)]
    }

    /// Data source type names
    pub fn data_source_names(&self) -> Vec<String> {
        vec![format!("{}_{}", PROVIDER_TYPE_NAME, ZoneDataSource::TYPE_SUFFIX)]
    }

    /// Name of the backend in use
    pub fn backend_name(&self) -> &'static str {
        self.api.backend_name()
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("backend", &self.api.backend_name())
            .finish()
    }
}
