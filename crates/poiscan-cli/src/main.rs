mod lists;
mod scan;

use anyhow::Context as _;
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use poiscan_places::PlacesClient;
use poiscan_scan::{FileStore, ScanOrchestrator, SystemClock};
use tracing_subscriber::EnvFilter;

use crate::lists::{BlacklistCommands, CacheCommands, WhitelistCommands};
use crate::scan::CacheMode;

pub(crate) type Orchestrator = ScanOrchestrator<PlacesClient, FileStore, SystemClock>;

#[derive(Debug, Parser)]
#[command(name = "poiscan")]
#[command(about = "Find nearby places with missing listing data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage the stored Places API key
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Scan the area shown by a Google Maps URL
    Scan {
        /// Map URL containing an `@lat,lng,zoomz` segment
        #[arg(long)]
        url: String,
        /// What to do when a fresh cached result exists
        #[arg(long, value_enum, default_value_t = CacheMode::Ask)]
        cache: CacheMode,
    },
    /// Hide individual places from future results
    Whitelist {
        #[command(subcommand)]
        command: WhitelistCommands,
    },
    /// Exclude place types from future requests
    Blacklist {
        #[command(subcommand)]
        command: BlacklistCommands,
    },
    /// Inspect or clear cached scan results
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Debug, Subcommand)]
enum KeyCommands {
    /// Store an API key
    Set { key: String },
    /// Forget the stored API key
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = poiscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut orch = build_orchestrator(&config)?;

    match cli.command {
        Commands::Key { command } => run_key(&orch, command)?,
        Commands::Scan { url, cache } => scan::run_scan(&mut orch, &url, cache).await?,
        Commands::Whitelist { command } => lists::run_whitelist(&mut orch, command)?,
        Commands::Blacklist { command } => lists::run_blacklist(&mut orch, command)?,
        Commands::Cache { command } => lists::run_cache(&mut orch, command)?,
    }

    Ok(())
}

fn build_orchestrator(config: &poiscan_core::AppConfig) -> anyhow::Result<Orchestrator> {
    let client = PlacesClient::with_base_url(
        &config.places_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build Places client")?;

    let store = FileStore::new(&config.store_path);
    let orch = ScanOrchestrator::new(client, store, SystemClock)
        .with_context(|| format!("failed to open store {}", config.store_path.display()))?
        .with_max_age(max_age_from_secs(config.cache_max_age_secs)?);

    if let Some(key) = config.places_api_key.as_deref() {
        if orch.credentials().api_key()?.is_none() && orch.credentials().set_api_key(key)? {
            tracing::info!("stored API key from POISCAN_PLACES_API_KEY");
        }
    }

    Ok(orch)
}

fn max_age_from_secs(secs: u64) -> anyhow::Result<TimeDelta> {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(|| anyhow::anyhow!("POISCAN_CACHE_MAX_AGE_SECS={secs} is out of range"))
}

fn run_key(orch: &Orchestrator, command: KeyCommands) -> anyhow::Result<()> {
    match command {
        KeyCommands::Set { key } => {
            if orch.credentials().set_api_key(&key)? {
                println!("API key saved");
            } else {
                anyhow::bail!("API key is empty");
            }
        }
        KeyCommands::Clear => {
            orch.credentials().clear_api_key()?;
            println!("API key cleared");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
