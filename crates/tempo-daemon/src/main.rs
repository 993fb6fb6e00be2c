// crates/tempo-daemon/src/main.rs
//
// Binary entrypoint for the Tempo daemon.
//
// Parses CLI arguments, loads configuration, initializes tracing, opens the
// state database, applies genesis on first start, and runs the block loop
// until interrupted or until a block fails.

use std::time::Duration;

use chrono::Utc;
use clap::Parser;

use tempo_daemon::chain::BlockRunner;
use tempo_daemon::config::DaemonConfig;
use tempo_daemon::state::{NodeState, NodeStateMachine};
use tempo_store::RocksStore;

/// Tempo daemon: runs the time-based inflation module over a simulated chain.
#[derive(Parser, Debug)]
#[command(name = "tempo-daemon", version = "0.1.0", about = "Tempo issuance node daemon")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.tempo/config.toml")]
    config: String,

    /// Override the configured data directory.
    #[arg(long)]
    data_dir: Option<String>,

    /// Override the configured block limit (0 = run until interrupted).
    #[arg(long)]
    max_blocks: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration from TOML file, falling back to defaults if the file
    // is not found. Tracing is not up yet, so keep the outcome for later.
    let config_path = expand_tilde(&args.config);
    let loaded = DaemonConfig::load(&config_path);
    // A missing file means defaults; a file that exists must be valid.
    if let Err(e) = &loaded {
        if std::path::Path::new(&config_path).exists() {
            return Err(format!("invalid config {}: {}", config_path, e).into());
        }
    }
    let mut daemon_config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => DaemonConfig::default(),
    };

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&daemon_config.log_level)),
        )
        .init();

    match loaded {
        Ok(_) => tracing::info!("Loaded configuration from {}", config_path),
        Err(e) => tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            config_path,
            e
        ),
    }

    // CLI flags override the config file values.
    if let Some(data_dir) = args.data_dir {
        daemon_config.data_dir = data_dir;
    }
    if let Some(max_blocks) = args.max_blocks {
        daemon_config.max_blocks = max_blocks;
    }

    tracing::info!("Tempo Daemon v0.1.0");
    tracing::info!("Data directory: {}", daemon_config.data_dir);
    tracing::info!(
        "Block interval: {}ms, block time: {}s",
        daemon_config.block_interval_ms,
        daemon_config.block_time_secs
    );

    let mut state_machine = NodeStateMachine::new();

    let data_dir = expand_tilde(&daemon_config.data_dir);
    std::fs::create_dir_all(&data_dir)?;
    let db_path = format!("{}/rocksdb", data_dir);
    let store = RocksStore::open(&db_path)?;
    tracing::info!("State database opened at {}", db_path);

    let runner = BlockRunner::new(
        &store,
        daemon_config.block_time_secs,
        daemon_config.bonded_drift_per_block,
    );

    let genesis_time = daemon_config.genesis_time.unwrap_or_else(Utc::now);
    let fresh = runner.init_genesis(
        &daemon_config.genesis,
        genesis_time,
        daemon_config.initial_supply,
        daemon_config.initial_bonded,
    )?;
    if fresh {
        tracing::info!("Genesis applied (genesis_time={})", genesis_time);
    } else {
        tracing::info!("Resuming from block {}", runner.height()?);
    }

    state_machine.transition(NodeState::Producing)?;

    let result = runner
        .run(
            Duration::from_millis(daemon_config.block_interval_ms),
            daemon_config.max_blocks,
        )
        .await;

    match result {
        Ok(produced) => {
            tracing::info!("Produced {} blocks", produced);
            let _ = state_machine.transition(NodeState::ShuttingDown);
            tracing::info!("Tempo daemon shut down gracefully");
            Ok(())
        }
        Err(e) => {
            let _ = state_machine.transition(NodeState::Halted);
            tracing::error!("Node halted at height {}", runner.height().unwrap_or_default());
            let _ = state_machine.transition(NodeState::ShuttingDown);
            Err(e)
        }
    }
}

/// Expand `~` at the start of a path to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
