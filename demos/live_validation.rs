// # AutoDNS Live Validation Tool
//
// Drives one apex A record set through its whole lifecycle against a real
// AutoDNS account: create, read, update, read, delete, read.
//
// ## Usage
//
// ```bash
// AUTODNS_USERNAME=user \
// AUTODNS_PASSWORD=secret \
// AUTODNS_CONTEXT=1 \
// AUTODNS_ENDPOINT=api.demo.autodns.com/v1 \
// TF_AUTODNS_ZONE_ID=example.com@a.ns14.net \
// cargo run -p demos --bin live_validation
// ```
//
// ## Environment Variables
//
// Required:
// - `AUTODNS_USERNAME`, `AUTODNS_PASSWORD`: API credentials
// - `TF_AUTODNS_ZONE_ID` (or `AUTODNS_ZONE_ID`): zone to test in,
//   `origin@virtualNameServer`
//
// Optional:
// - `AUTODNS_ENDPOINT`, `AUTODNS_CONTEXT`: see autodnsctl
//
// The zone must not already hold an apex A record set.

use autodns_core::config::{ClientConfig, ConfigOverrides};
use autodns_core::model::ZoneId;
use autodns_core::resources::RecordModel;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("=== AutoDNS live validation ===");

    let zone_id = env::var("TF_AUTODNS_ZONE_ID")
        .or_else(|_| env::var("AUTODNS_ZONE_ID"))
        .unwrap_or_else(|_| {
            tracing::error!("TF_AUTODNS_ZONE_ID environment variable is required");
            std::process::exit(1);
        });
    let origin = zone_id.parse::<ZoneId>()?.origin;

    let config = ClientConfig::resolve(&ConfigOverrides::default())?;
    tracing::warn!("Running in LIVE mode - will make actual DNS changes in {}", origin);
    tracing::info!("Configuration:");
    tracing::info!("  Endpoint: {}", config.endpoint);
    tracing::info!("  Context: {}", config.context);
    tracing::info!("  Zone ID: {}", zone_id);

    tracing::info!("\n--- Step 1: Configuring provider ---");
    let provider = autodns_client::configure(&config)?;
    let zone = provider.zone_data_source().read(&origin).await?;
    if zone.id != zone_id {
        tracing::error!(
            "✗ Zone {} resolves to {}, not {}",
            origin,
            zone.id,
            zone_id
        );
        std::process::exit(1);
    }
    tracing::info!("✓ Zone found with {} record(s)", zone.records.len());

    let records = provider.record_resource();

    tracing::info!("\n--- Step 2: Create apex A ---");
    let plan = RecordModel::new(&zone_id, "", 60, "A", vec!["2.2.2.2".to_string()]);
    let state = records.create(&plan).await?;
    expect_state(&records.read(&state).await?, 60, "2.2.2.2")?;
    tracing::info!("✓ Created {}", state.id);

    tracing::info!("\n--- Step 3: Update apex A ---");
    let plan = RecordModel::new(&zone_id, "", 90, "A", vec!["4.4.4.4".to_string()]);
    let state = records.update(&state, &plan).await?;
    expect_state(&records.read(&state).await?, 90, "4.4.4.4")?;
    tracing::info!("✓ Updated {}", state.id);

    tracing::info!("\n--- Step 4: Delete apex A ---");
    records.delete(&state).await?;
    if records.read(&state).await?.is_some() {
        tracing::error!("✗ Record set {} still exists after delete", state.id);
        std::process::exit(1);
    }
    tracing::info!("✓ Deleted {}", state.id);

    tracing::info!("\n=== Validation Summary ===");
    tracing::info!("✓ Zone lookup: OK");
    tracing::info!("✓ Create / update / delete: OK");
    tracing::info!("✓ Security: password not logged");

    Ok(())
}

fn expect_state(
    read: &Option<RecordModel>,
    ttl: u32,
    value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match read {
        Some(model) if model.ttl == ttl && model.values == [value.to_string()] => Ok(()),
        Some(model) => Err(format!(
            "expected ttl {} with [{}], read ttl {} with {:?}",
            ttl, value, model.ttl, model.values
        )
        .into()),
        None => Err("record set is missing after write".into()),
    }
}
