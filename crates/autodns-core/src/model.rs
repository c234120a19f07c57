//! Wire and domain types for the AutoDNS zone API
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! { "data": [ ... ] }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Response wrapper used by every AutoDNS endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// Payload items; a missing or `null` payload reads as empty
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A DNS resource record as the AutoDNS API represents it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Subdomain label, empty for the zone apex
    #[serde(default)]
    pub name: String,

    /// Time-to-live in seconds
    #[serde(default)]
    pub ttl: u32,

    /// Record type (A, AAAA, TXT, MX, ...)
    #[serde(rename = "type")]
    pub record_type: String,

    /// Type-dependent value
    pub value: String,

    /// Preference / priority (MX, SRV)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pref: Option<u32>,
}

impl Record {
    /// Create a record without preference
    pub fn new(
        name: impl Into<String>,
        ttl: u32,
        record_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ttl,
            record_type: record_type.into(),
            value: value.into(),
            pref: None,
        }
    }

    /// Set the preference
    pub fn with_pref(mut self, pref: u32) -> Self {
        self.pref = Some(pref);
        self
    }

    /// Whether this record belongs to the (name, type) record set
    pub fn is_in_set(&self, name: &str, record_type: &str) -> bool {
        self.name == name && self.record_type.eq_ignore_ascii_case(record_type)
    }
}

/// A zone snapshot as returned by search or zone info requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone origin, e.g. `example.com`
    pub origin: String,

    /// Nameserver group label, e.g. `ns14.net`
    #[serde(default)]
    pub name_server_group: String,

    /// Virtual nameserver serving the zone, e.g. `a.ns14.net`
    #[serde(default)]
    pub virtual_name_server: String,

    /// Records in API order
    #[serde(rename = "resourceRecords", default)]
    pub records: Vec<Record>,
}

impl Zone {
    /// Composite `origin@virtualNameServer` identifier
    pub fn id(&self) -> String {
        format!("{}@{}", self.origin, self.virtual_name_server)
    }
}

/// Parsed `origin@virtualNameServer` zone identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneId {
    /// Zone origin
    pub origin: String,
    /// Virtual nameserver
    pub virtual_name_server: String,
}

impl ZoneId {
    /// Build from parts
    pub fn new(origin: impl Into<String>, virtual_name_server: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            virtual_name_server: virtual_name_server.into(),
        }
    }
}

impl FromStr for ZoneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('@').collect();
        match parts.as_slice() {
            [origin, vns] if !origin.is_empty() && !vns.is_empty() => Ok(Self::new(*origin, *vns)),
            _ => Err(Error::invalid_zone_id(s)),
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.origin, self.virtual_name_server)
    }
}

/// Mutation payload for `POST /zone/{origin}/_stream`
///
/// The API applies `rems` and `adds` together as one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStream {
    /// Records to add
    #[serde(default)]
    pub adds: Vec<Record>,

    /// Records to remove
    #[serde(default)]
    pub rems: Vec<Record>,
}

impl ZoneStream {
    /// Adds-only batch (create)
    pub fn adds(records: &[Record]) -> Self {
        Self {
            adds: records.to_vec(),
            rems: Vec::new(),
        }
    }

    /// Removals-only batch (delete)
    pub fn removals(records: &[Record]) -> Self {
        Self {
            adds: Vec::new(),
            rems: records.to_vec(),
        }
    }

    /// Replace `old` with `new` in a single round trip (update)
    pub fn replace(old: &[Record], new: &[Record]) -> Self {
        Self {
            adds: new.to_vec(),
            rems: old.to_vec(),
        }
    }
}

/// One filter clause of a zone search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneFilter {
    pub key: String,
    pub value: String,
    pub operator: String,
}

/// Body of `POST /zone/_search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSearch {
    pub filters: Vec<ZoneFilter>,
}

impl ZoneSearch {
    /// `origin EQUAL <origin>`
    pub fn origin_equals(origin: impl Into<String>) -> Self {
        Self {
            filters: vec![ZoneFilter {
                key: "origin".to_string(),
                value: origin.into(),
                operator: "EQUAL".to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zone_id_parses_origin_and_nameserver() {
        let id: ZoneId = "example.com@a.ns14.net".parse().unwrap();
        assert_eq!(id.origin, "example.com");
        assert_eq!(id.virtual_name_server, "a.ns14.net");
        assert_eq!(id.to_string(), "example.com@a.ns14.net");
    }

    #[test]
    fn zone_id_rejects_malformed_input() {
        for bad in ["example.com", "a@b@c", "@a.ns14.net", "example.com@", "", "@"] {
            let err = bad.parse::<ZoneId>().unwrap_err();
            assert!(
                matches!(err, Error::InvalidZoneId(ref s) if s == bad),
                "expected InvalidZoneId for {:?}, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn envelope_treats_null_and_missing_data_as_empty() {
        let null: ApiResponse<Zone> = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(null.data.is_empty());

        let missing: ApiResponse<Zone> =
            serde_json::from_value(json!({"stid": "20240101-app1"})).unwrap();
        assert!(missing.data.is_empty());

        let wrong = serde_json::from_value::<ApiResponse<Zone>>(json!({"data": "oops"}));
        assert!(wrong.is_err());
    }

    #[test]
    fn record_omits_missing_pref() {
        let a = serde_json::to_value(Record::new("www", 60, "A", "1.1.1.1")).unwrap();
        assert_eq!(a, json!({"name": "www", "ttl": 60, "type": "A", "value": "1.1.1.1"}));

        let mx = serde_json::to_value(Record::new("", 60, "MX", "mail.example.com").with_pref(10))
            .unwrap();
        assert_eq!(mx["pref"], json!(10));
    }

    #[test]
    fn zone_decodes_api_field_names() {
        let body = json!({
            "data": [{
                "origin": "example.com",
                "nameServerGroup": "ns14.net",
                "virtualNameServer": "a.ns14.net",
                "resourceRecords": [
                    {"name": "", "ttl": 60, "type": "A", "value": "2.2.2.2"},
                    {"name": "", "ttl": 60, "type": "MX", "value": "mx.example.com", "pref": 10}
                ],
                "created": "2024-01-01T00:00:00.000+0100"
            }]
        });

        let resp: ApiResponse<Zone> = serde_json::from_value(body).unwrap();
        let zone = &resp.data[0];
        assert_eq!(zone.id(), "example.com@a.ns14.net");
        assert_eq!(zone.name_server_group, "ns14.net");
        assert_eq!(zone.records.len(), 2);
        assert_eq!(zone.records[1].pref, Some(10));
    }

    #[test]
    fn envelope_without_data_is_empty() {
        let resp: ApiResponse<serde_json::Value> =
            serde_json::from_value(json!({"stid": "20240101-app1-1"})).unwrap();
        assert!(resp.data.is_empty());
    }

    #[test]
    fn stream_constructors_fill_expected_sides() {
        let old = [Record::new("", 60, "A", "2.2.2.2")];
        let new = [Record::new("", 90, "A", "4.4.4.4")];

        assert!(ZoneStream::adds(&new).rems.is_empty());
        assert!(ZoneStream::removals(&old).adds.is_empty());

        let replace = ZoneStream::replace(&old, &new);
        assert_eq!(replace.rems, old.to_vec());
        assert_eq!(replace.adds, new.to_vec());

        let body = serde_json::to_value(ZoneStream::adds(&new)).unwrap();
        assert_eq!(body["rems"], json!([]));
    }

    #[test]
    fn search_filters_on_origin() {
        let body = serde_json::to_value(ZoneSearch::origin_equals("example.com")).unwrap();
        assert_eq!(
            body,
            json!({"filters": [{"key": "origin", "value": "example.com", "operator": "EQUAL"}]})
        );
    }
}
