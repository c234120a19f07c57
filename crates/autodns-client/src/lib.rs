// # AutoDNS API Client
//
// This crate provides the HTTP implementation of `autodns_core::ZoneApi`
// against the AutoDNS (InterNetX Domainrobot) JSON API.
//
// ## Behaviour
//
// - One HTTP request per call, single attempt (no retry, no backoff)
// - All requests of one client are serialized by a single lock held from
//   header injection until the response body has been read
// - HTTP timeout fixed at 10 seconds
// - Malformed zone ids are rejected before a request is built
// - Non-200 answers surface status code and raw body verbatim
// - Transport errors carry the full cause chain of the underlying error
//
// ## Security
//
// - The password never appears in logs or in `Debug` output
// - Username, endpoint and context are logged
//
// ## API Reference
//
// - Zone search: POST `/zone/_search`
//   `{"filters":[{"key":"origin","value":"example.com","operator":"EQUAL"}]}`
// - Zone info: GET `/zone/{origin}/{virtualNameServer}`
// - Record batch: POST `/zone/{origin}/_stream` `{"adds":[...],"rems":[...]}`
// - Every response: `{"data":[...]}`

use async_trait::async_trait;
use autodns_core::config::ClientConfig;
use autodns_core::model::{ApiResponse, Record, Zone, ZoneId, ZoneSearch, ZoneStream};
use autodns_core::resources::Provider;
use autodns_core::traits::ZoneApi;
use autodns_core::{Error, Result};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Default HTTP timeout for API requests (10 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Tenant context header
pub const CONTEXT_HEADER: &str = "X-Domainrobot-Context";

/// AutoDNS API client
///
/// Created once at configuration time and shared (behind an `Arc`) by every
/// resource for the life of the process.
///
/// # Concurrency
///
/// At most one request is in flight per client. Callers may invoke methods
/// from many tasks; they queue on the internal lock. Dropping a pending
/// future (cancellation, `tokio::time::timeout`) aborts its request and
/// releases the lock.
pub struct AutoDnsClient {
    /// HTTP client for API requests
    http: reqwest::Client,

    /// Base URL, e.g. `https://api.autodns.com/v1`
    host_url: String,

    /// `X-Domainrobot-Context` value
    context: String,

    username: String,

    /// ⚠️ NEVER log this value
    password: String,

    /// Serializes every request of this client
    lock: Mutex<()>,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for AutoDnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoDnsClient")
            .field("host_url", &self.host_url)
            .field("context", &self.context)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

impl AutoDnsClient {
    /// Create a new client
    ///
    /// Fails with [`Error::Config`] when the configuration is incomplete or
    /// the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            host_url: config.base_url(),
            context: config.context.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            lock: Mutex::new(()),
        })
    }

    /// Base URL requests are sent to
    pub fn host_url(&self) -> &str {
        &self.host_url
    }

    /// Join `path` onto the base URL
    ///
    /// Origins and nameservers are inserted as-is; they are plain DNS labels
    /// and need no percent-encoding.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.host_url, path.trim_start_matches('/'))
    }

    /// Perform one authenticated exchange and unwrap the `data` envelope
    ///
    /// The lock is held across header injection, send and body read.
    async fn request<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<Vec<T>> {
        let _guard = self.lock.lock().await;

        let response = req
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTEXT_HEADER, &self.context)
            .send()
            .await
            .map_err(|e| Error::transport(error_chain(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(error_chain(&e)))?;

        if status != StatusCode::OK {
            debug!("AutoDNS answered {}", status);
            return Err(Error::api(status.as_u16(), body));
        }

        let envelope: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|e| Error::decode(e.to_string()))?;
        Ok(envelope.data)
    }

    /// Send a stream batch for the zone
    async fn stream(&self, zone_id: &str, stream: &ZoneStream) -> Result<()> {
        let id: ZoneId = zone_id.parse()?;

        let url = self.url(&format!("zone/{}/_stream", id.origin));
        debug!(
            "POST {} ({} add(s), {} removal(s))",
            url,
            stream.adds.len(),
            stream.rems.len()
        );

        self.request::<serde_json::Value>(json_body(self.http.post(&url), stream)?)
            .await?;
        Ok(())
    }
}

/// Attach `body` as JSON, failing with [`Error::Json`] before anything is sent
fn json_body<B: Serialize>(
    req: reqwest::RequestBuilder,
    body: &B,
) -> Result<reqwest::RequestBuilder> {
    let bytes = serde_json::to_vec(body)?;
    Ok(req.header(CONTENT_TYPE, "application/json").body(bytes))
}

/// Display text of `err` followed by every source, `: `-separated
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

#[async_trait]
impl ZoneApi for AutoDnsClient {
    async fn get_zone(&self, origin: &str) -> Result<Zone> {
        let url = self.url("zone/_search");
        debug!("POST {} (origin EQUAL {})", url, origin);

        let zones: Vec<Zone> = self
            .request(json_body(
                self.http.post(&url),
                &ZoneSearch::origin_equals(origin),
            )?)
            .await?;

        let count = zones.len();
        match <[Zone; 1]>::try_from(zones) {
            Ok([zone]) => Ok(zone),
            Err(_) => Err(Error::lookup(format!(
                "origin {} does not exist or more than one result has been returned by the API ({} found)",
                origin, count
            ))),
        }
    }

    async fn get_records(&self, zone_id: &str) -> Result<Vec<Record>> {
        let id: ZoneId = zone_id.parse()?;

        let url = self.url(&format!("zone/{}/{}", id.origin, id.virtual_name_server));
        debug!("GET {}", url);

        let zones: Vec<Zone> = self.request(self.http.get(&url)).await?;
        zones
            .into_iter()
            .next()
            .map(|zone| zone.records)
            .ok_or_else(|| Error::lookup(format!("zone {} returned no data", id)))
    }

    async fn create_records(&self, zone_id: &str, records: &[Record]) -> Result<()> {
        self.stream(zone_id, &ZoneStream::adds(records)).await?;
        info!("Created {} record(s) in {}", records.len(), zone_id);
        Ok(())
    }

    async fn update_records(
        &self,
        zone_id: &str,
        old_records: &[Record],
        new_records: &[Record],
    ) -> Result<()> {
        self.stream(zone_id, &ZoneStream::replace(old_records, new_records))
            .await?;
        info!(
            "Replaced {} record(s) with {} record(s) in {}",
            old_records.len(),
            new_records.len(),
            zone_id
        );
        Ok(())
    }

    async fn delete_records(&self, zone_id: &str, records: &[Record]) -> Result<()> {
        self.stream(zone_id, &ZoneStream::removals(records)).await?;
        info!("Deleted {} record(s) from {}", records.len(), zone_id);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "autodns"
    }
}

/// Build a client from configuration and hand it to the lifecycle adapters
///
/// Both the record resource and the zone data source share this one client.
pub fn configure(config: &ClientConfig) -> Result<Provider> {
    info!(
        endpoint = %config.endpoint,
        context = %config.context,
        username = %config.username,
        "configuring AutoDNS client"
    );

    let client = AutoDnsClient::new(config)?;
    let provider = Provider::new(Arc::new(client));

    info!("configured AutoDNS client successfully");
    Ok(provider)
}
