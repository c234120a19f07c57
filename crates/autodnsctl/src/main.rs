// # autodnsctl
//
// Thin entrypoint driving the AutoDNS lifecycle adapters. It:
// 1. Resolves configuration (flags over environment over defaults)
// 2. Initializes logging (stderr) and the runtime
// 3. Builds the backend (live API or in-memory)
// 4. Runs one operation and prints the resulting state as JSON on stdout
//
// All zone and record logic lives in autodns-core / autodns-client.
//
// ## Configuration
//
// - `AUTODNS_ENDPOINT` / `--endpoint`: API endpoint (default api.autodns.com/v1)
// - `AUTODNS_CONTEXT` / `--context`: tenant context (default 4, demo system is 1)
// - `AUTODNS_USERNAME` / `--username`: API user (required)
// - `AUTODNS_PASSWORD` / `--password`: API password (required)
// - `AUTODNS_LOG_LEVEL` / `--log-level`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export AUTODNS_USERNAME=user
// export AUTODNS_PASSWORD=secret
//
// autodnsctl zone example.com
// autodnsctl record create --zone example.com@a.ns14.net --ttl 60 --type A --value 2.2.2.2
// autodnsctl record update --zone example.com@a.ns14.net --ttl 90 --type A --value 4.4.4.4
// autodnsctl record delete 'example.com@a.ns14.net____A'
// ```

use anyhow::{Context, Result};
use autodns_core::config::{ClientConfig, ConfigOverrides};
use autodns_core::memory::MemoryZoneApi;
use autodns_core::model::Zone;
use autodns_core::resources::{Provider, RecordModel};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

const ENV_LOG_LEVEL: &str = "AUTODNS_LOG_LEVEL";

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum CtlExitCode {
    /// Operation succeeded
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Operation failed (API, transport, lookup)
    RuntimeError = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, Parser)]
#[command(name = "autodnsctl", version, about = "Manage AutoDNS zone records")]
struct Cli {
    /// API endpoint (overrides AUTODNS_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Tenant context (overrides AUTODNS_CONTEXT)
    #[arg(long, global = true)]
    context: Option<String>,

    /// API username (overrides AUTODNS_USERNAME)
    #[arg(long, global = true)]
    username: Option<String>,

    /// API password (overrides AUTODNS_PASSWORD)
    #[arg(long, global = true)]
    password: Option<String>,

    /// Backend to run against
    #[arg(long, value_enum, default_value_t = Backend::Live, global = true)]
    backend: Backend,

    /// JSON array of zones loaded into the memory backend
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    /// Log level (overrides AUTODNS_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// AutoDNS HTTP API
    Live,
    /// In-process zones, nothing leaves the machine
    Memory,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read a zone by origin
    Zone { origin: String },

    /// Manage a record set
    #[command(subcommand)]
    Record(RecordCommand),
}

#[derive(Debug, Subcommand)]
enum RecordCommand {
    /// Import a record set by `<zone_id>__<name>__<type>`
    Get { id: String },

    /// Create a record set
    Create(RecordArgs),

    /// Replace a record set's records in one batch
    Update {
        /// Id of the set being replaced (defaults to the planned set's id)
        #[arg(long)]
        from: Option<String>,

        #[command(flatten)]
        args: RecordArgs,
    },

    /// Delete a record set by id
    Delete { id: String },
}

#[derive(Debug, Args)]
struct RecordArgs {
    /// Zone id, `origin@virtualNameServer`
    #[arg(long)]
    zone: String,

    /// Subdomain label, empty for the apex
    #[arg(long, default_value = "")]
    name: String,

    /// Time-to-live in seconds
    #[arg(long)]
    ttl: u32,

    /// Record type (A, AAAA, TXT, MX, ...)
    #[arg(long = "type")]
    record_type: String,

    /// Record value; repeat for several records (MX: "10 mx.example.com")
    #[arg(long = "value", required = true)]
    values: Vec<String>,
}

impl RecordArgs {
    fn to_model(&self) -> RecordModel {
        RecordModel::new(
            &self.zone,
            &self.name,
            self.ttl,
            &self.record_type,
            self.values.clone(),
        )
    }
}

fn parse_log_level(value: &str) -> Result<Level> {
    match value.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => anyhow::bail!(
            "log level '{}' is not valid. Valid levels: trace, debug, info, warn, error",
            other
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var(ENV_LOG_LEVEL).ok())
        .unwrap_or_else(|| "warn".to_string());
    let log_level = match parse_log_level(&log_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    // stdout carries the JSON result, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        let provider = match build_provider(&cli).await {
            Ok(provider) => provider,
            Err(e) => {
                eprintln!("Configuration error: {:#}", e);
                return CtlExitCode::ConfigError;
            }
        };

        match execute(&provider, &cli.command).await {
            Ok(output) => {
                println!("{}", output);
                CtlExitCode::Success
            }
            Err(e) => {
                error!("Operation failed: {:#}", e);
                eprintln!("Error: {:#}", e);
                CtlExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Build the backend selected on the command line
async fn build_provider(cli: &Cli) -> Result<Provider> {
    match cli.backend {
        Backend::Live => {
            let overrides = ConfigOverrides {
                endpoint: cli.endpoint.clone(),
                context: cli.context.clone(),
                username: cli.username.clone(),
                password: cli.password.clone(),
            };
            let config = ClientConfig::resolve(&overrides)?;
            Ok(autodns_client::configure(&config)?)
        }
        Backend::Memory => {
            warn!("Running against the memory backend - no changes leave this process");
            let api = MemoryZoneApi::new();

            if let Some(ref path) = cli.seed {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read seed file {}", path.display()))?;
                let zones: Vec<Zone> = serde_json::from_str(&raw)
                    .with_context(|| format!("seed file {} is not a JSON array of zones", path.display()))?;
                for zone in zones {
                    info!("Seeding zone {}", zone.id());
                    api.insert_zone(zone).await;
                }
            }

            Ok(Provider::new(Arc::new(api)))
        }
    }
}

/// Run one operation and render its resulting state
async fn execute(provider: &Provider, command: &Command) -> Result<String> {
    let value = match command {
        Command::Zone { origin } => {
            let zone = provider.zone_data_source().read(origin).await?;
            serde_json::to_value(zone)?
        }
        Command::Record(cmd) => {
            let records = provider.record_resource();
            match cmd {
                RecordCommand::Get { id } => serde_json::to_value(records.import(id).await?)?,
                RecordCommand::Create(args) => {
                    serde_json::to_value(records.create(&args.to_model()).await?)?
                }
                RecordCommand::Update { from, args } => {
                    let plan = args.to_model();
                    let prior_id = from.clone().unwrap_or_else(|| plan.id.clone());
                    let prior = records
                        .import(&prior_id)
                        .await
                        .with_context(|| format!("failed to read current state of {}", prior_id))?;
                    serde_json::to_value(records.update(&prior, &plan).await?)?
                }
                RecordCommand::Delete { id } => {
                    let state = records.import(id).await?;
                    records.delete(&state).await?;
                    serde_json::to_value(state)?
                }
            }
        }
    };

    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autodns_core::model::Record;

    async fn memory_provider() -> Provider {
        let api = MemoryZoneApi::new();
        api.insert_zone(Zone {
            origin: "example.com".to_string(),
            name_server_group: "ns14.net".to_string(),
            virtual_name_server: "a.ns14.net".to_string(),
            records: vec![Record::new("", 60, "A", "2.2.2.2")],
        })
        .await;
        Provider::new(Arc::new(api))
    }

    #[test]
    fn test_cli_parses_record_create() {
        let cli = Cli::try_parse_from([
            "autodnsctl",
            "--backend",
            "memory",
            "record",
            "create",
            "--zone",
            "example.com@a.ns14.net",
            "--ttl",
            "60",
            "--type",
            "MX",
            "--value",
            "10 foo",
            "--value",
            "30 baz",
        ])
        .unwrap();

        assert_eq!(cli.backend, Backend::Memory);
        match cli.command {
            Command::Record(RecordCommand::Create(args)) => {
                let model = args.to_model();
                assert_eq!(model.id, "example.com@a.ns14.net____MX");
                assert_eq!(model.values, vec!["10 foo".to_string(), "30 baz".to_string()]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_log_level_validation() {
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert!(parse_log_level("verbose").is_err());
    }

    #[tokio::test]
    async fn test_update_reads_prior_then_replaces() {
        let provider = memory_provider().await;
        let cli = Cli::try_parse_from([
            "autodnsctl",
            "record",
            "update",
            "--zone",
            "example.com@a.ns14.net",
            "--ttl",
            "90",
            "--type",
            "A",
            "--value",
            "4.4.4.4",
        ])
        .unwrap();

        let out = execute(&provider, &cli.command).await.unwrap();
        let state: RecordModel = serde_json::from_str(&out).unwrap();
        assert_eq!(state.ttl, 90);

        let zone = provider.zone_data_source().read("example.com").await.unwrap();
        assert_eq!(zone.records, vec![Record::new("", 90, "A", "4.4.4.4")]);
    }

    #[tokio::test]
    async fn test_delete_of_missing_set_fails() {
        let provider = memory_provider().await;
        let cli = Cli::try_parse_from([
            "autodnsctl",
            "record",
            "delete",
            "example.com@a.ns14.net__nope__TXT",
        ])
        .unwrap();

        assert!(execute(&provider, &cli.command).await.is_err());
    }
}
