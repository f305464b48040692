//! CLI command implementations

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::aggregation::AggregationQuery;
use crate::content::{ContentRepository, MemoryContentRepository, PublicFileUrlGenerator};
use crate::http_server::{HttpServer, RestServiceState};
use crate::record_store::{FileRecordStore, MemoryRecordStore, RecordStore};
use crate::resource::{IdAllocator, RecordResource};

use super::args::{Cli, Command};
use super::config::{Config, StoreBackend};
use super::errors::{CliError, CliResult};

/// Parse arguments, set up logging and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Aggregate { config } => aggregate(&config),
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Write a default configuration file. Refuses to overwrite.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path));
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let encoded = serde_json::to_string_pretty(&Config::default())?;
    fs::write(config_path, encoded)?;

    info!("Wrote default configuration to {}", config_path.display());
    Ok(())
}

fn open_store(config: &Config) -> CliResult<Arc<dyn RecordStore>> {
    match config.store.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryRecordStore::new())),
        StoreBackend::File => {
            let store = FileRecordStore::open(&config.store.path)?;
            info!(
                records = store.get_all()?.len(),
                "Opened record store {}",
                store.path().display()
            );
            Ok(Arc::new(store))
        }
    }
}

fn open_content(config: &Config) -> CliResult<Arc<dyn ContentRepository>> {
    match &config.content.fixture_path {
        Some(path) => {
            let repo = MemoryContentRepository::from_fixture(path)?;
            info!("Loaded content fixture {}", path.display());
            Ok(Arc::new(repo))
        }
        None => Ok(Arc::new(MemoryContentRepository::new())),
    }
}

fn build_directory(config: &Config) -> CliResult<AggregationQuery> {
    let urls = PublicFileUrlGenerator::new(
        config.content.base_url.clone(),
        config.content.public_path.clone(),
    );

    Ok(AggregationQuery::new(
        open_content(config)?,
        Arc::new(urls),
        config.content.aggregation.clone(),
    ))
}

/// Wire the record resource and the directory query from configuration
pub fn build_state(config: &Config) -> CliResult<Arc<RestServiceState>> {
    let ids = IdAllocator::new(config.id_strategy);
    let records = RecordResource::new(open_store(config)?, ids);
    let directory = build_directory(config)?;

    let settings = directory.settings();
    info!(
        id_strategy = ?ids.strategy(),
        parent_type = %settings.parent_type,
        broken_references = ?settings.broken_references,
        "Record resource and directory ready"
    );
    Ok(Arc::new(RestServiceState::new(records, directory)))
}

/// Start the HTTP server
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let state = build_state(&config)?;
    let server = HttpServer::new(config.http.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Print the encoded teacher directory to stdout
pub fn aggregate(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let encoded = build_directory(&config)?.execute_encoded()?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", encoded)?;
    Ok(())
}
