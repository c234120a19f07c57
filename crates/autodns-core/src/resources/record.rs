//! `autodns_record`: one record set of a zone
//!
//! A record set is every record in a zone sharing the same name and type.
//! The AutoDNS API has no record ids, so the set is addressed as
//! `<zone_id>__<name>__<type>`; an apex set has an empty name segment
//! (`example.com@a.ns14.net____A`).
//!
//! Each entry of `values` becomes one API record. MX values are written as
//! `"<pref> <host>"` and split into the record's `pref` and `value`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::Record;
use crate::traits::ZoneApi;

const ID_SEPARATOR: &str = "__";

/// Record set state as the host stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordModel {
    /// `<zone_id>__<name>__<type>`
    #[serde(default)]
    pub id: String,

    /// `origin@virtualNameServer`
    pub zone_id: String,

    /// Subdomain label, empty for the apex
    #[serde(default)]
    pub name: String,

    /// Time-to-live in seconds
    pub ttl: u32,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,

    /// One entry per record
    pub values: Vec<String>,
}

impl RecordModel {
    /// Create a model with its id filled in
    pub fn new(
        zone_id: impl Into<String>,
        name: impl Into<String>,
        ttl: u32,
        record_type: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        let mut model = Self {
            id: String::new(),
            zone_id: zone_id.into(),
            name: name.into(),
            ttl,
            record_type: record_type.into(),
            values,
        };
        model.id = model.compute_id();
        model
    }

    /// `<zone_id>__<name>__<type>`
    pub fn compute_id(&self) -> String {
        format_id(&self.zone_id, &self.name, &self.record_type)
    }

    /// Whether moving from `self` to `planned` needs destroy + create
    ///
    /// A stream batch is scoped to one zone, so only a zone change forces
    /// replacement.
    pub fn requires_replace(&self, planned: &RecordModel) -> bool {
        self.zone_id != planned.zone_id
    }

    /// API records for this set, one per value
    pub fn to_records(&self) -> Vec<Record> {
        self.values
            .iter()
            .map(|value| self.record_for(value))
            .collect()
    }

    fn record_for(&self, value: &str) -> Record {
        let mut tokens = value.split_whitespace();
        if is_mx(&self.record_type)
            && let (Some(pref), Some(host), None) = (tokens.next(), tokens.next(), tokens.next())
            && let Ok(pref) = pref.parse::<u32>()
        {
            return Record::new(&self.name, self.ttl, &self.record_type, host).with_pref(pref);
        }
        // Anything else goes out untouched; the API validates it
        Record::new(&self.name, self.ttl, &self.record_type, value)
    }

    /// The entry of `values` that produces `record`, spelled as stored
    fn stored_value(&self, record: &Record) -> Option<&String> {
        self.values.iter().find(|value| {
            let planned = self.record_for(value);
            planned.value == record.value && planned.pref == record.pref
        })
    }

    fn with_id(mut self) -> Self {
        self.id = self.compute_id();
        self
    }
}

/// Format a record set id
pub fn format_id(zone_id: &str, name: &str, record_type: &str) -> String {
    format!(
        "{zone_id}{sep}{name}{sep}{record_type}",
        sep = ID_SEPARATOR
    )
}

/// Split a record set id into (zone_id, name, type)
pub fn parse_id(id: &str) -> Result<(String, String, String)> {
    let parts: Vec<&str> = id.split(ID_SEPARATOR).collect();
    match parts.as_slice() {
        [zone_id, name, record_type] if !zone_id.is_empty() && !record_type.is_empty() => Ok((
            zone_id.to_string(),
            name.to_string(),
            record_type.to_string(),
        )),
        _ => Err(Error::invalid_input(format!(
            "record id '{}' must have the format <zone_id>__<name>__<type>",
            id
        ))),
    }
}

fn is_mx(record_type: &str) -> bool {
    record_type.eq_ignore_ascii_case("MX")
}

/// Render one API record as a `values` entry
pub fn render_value(record: &Record) -> String {
    match record.pref {
        Some(pref) if is_mx(&record.record_type) => format!("{} {}", pref, record.value),
        _ => record.value.clone(),
    }
}

/// Lifecycle adapter for `autodns_record`
#[derive(Clone)]
pub struct RecordResource {
    api: Arc<dyn ZoneApi>,
}

impl RecordResource {
    /// Suffix after the provider type name
    pub const TYPE_SUFFIX: &'static str = "record";

    pub fn new(api: Arc<dyn ZoneApi>) -> Self {
        Self { api }
    }

    /// Create the planned record set
    ///
    /// The API does not echo the result, so the returned state is the plan
    /// with its id filled in.
    pub async fn create(&self, plan: &RecordModel) -> Result<RecordModel> {
        info!(
            "Creating record set {} ({} value(s))",
            plan.compute_id(),
            plan.values.len()
        );
        self.api
            .create_records(&plan.zone_id, &plan.to_records())
            .await?;
        Ok(plan.clone().with_id())
    }

    /// Refresh state from the zone
    ///
    /// Returns `Ok(None)` when no record of the set is left, so the host can
    /// drop it from state.
    pub async fn read(&self, state: &RecordModel) -> Result<Option<RecordModel>> {
        let records = self.api.get_records(&state.zone_id).await?;
        let matching: Vec<&Record> = records
            .iter()
            .filter(|r| r.is_in_set(&state.name, &state.record_type))
            .collect();

        let Some(first) = matching.first() else {
            warn!(
                "Record set {} no longer exists in zone {}",
                state.compute_id(),
                state.zone_id
            );
            return Ok(None);
        };

        Ok(Some(
            RecordModel {
                id: String::new(),
                zone_id: state.zone_id.clone(),
                name: state.name.clone(),
                ttl: first.ttl,
                record_type: state.record_type.clone(),
                values: matching
                    .iter()
                    .map(|r| {
                        state
                            .stored_value(r)
                            .cloned()
                            .unwrap_or_else(|| render_value(r))
                    })
                    .collect(),
            }
            .with_id(),
        ))
    }

    /// Replace `prior` with `plan` in a single batch
    ///
    /// `prior` must be the state the host last stored; it is sent as the
    /// removal list verbatim.
    pub async fn update(&self, prior: &RecordModel, plan: &RecordModel) -> Result<RecordModel> {
        if prior.requires_replace(plan) {
            return Err(Error::invalid_input(format!(
                "record set cannot move from zone {} to zone {} in place",
                prior.zone_id, plan.zone_id
            )));
        }

        info!(
            "Updating record set {} -> {}",
            prior.compute_id(),
            plan.compute_id()
        );
        self.api
            .update_records(&plan.zone_id, &prior.to_records(), &plan.to_records())
            .await?;
        Ok(plan.clone().with_id())
    }

    /// Remove every record of the set
    pub async fn delete(&self, state: &RecordModel) -> Result<()> {
        info!("Deleting record set {}", state.compute_id());
        self.api
            .delete_records(&state.zone_id, &state.to_records())
            .await
    }

    /// Import an existing record set by id
    pub async fn import(&self, id: &str) -> Result<RecordModel> {
        let (zone_id, name, record_type) = parse_id(id)?;
        let stub = RecordModel::new(zone_id, name, 0, record_type, Vec::new());

        self.read(&stub)
            .await?
            .ok_or_else(|| Error::not_found(format!("record set {} does not exist", id)))
    }
}
