// ABOUTME: Command-line arguments and configuration loading
// Priority: CLI args > environment variables > config file > defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use thiserror::Error;

use crate::app::notification::{DEFAULT_CAPACITY, DEFAULT_LIFETIME, DEFAULT_LIFETIME_MS};

pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{field} must be in range [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        min: u64,
        max: u64,
        value: u64,
    },
}

/// Chain-in-a-Box - terminal console for a blockchain node
#[derive(Parser, Debug)]
#[command(name = "chain-box")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal console for a blockchain node's HTTP API", long_about = None)]
pub struct CliArgs {
    /// Base URL of the node
    #[arg(long, env = "CHAIN_BOX_NODE_URL", global = true)]
    pub node_url: Option<String>,

    /// Request timeout in milliseconds (100-600000)
    #[arg(long, env = "CHAIN_BOX_TIMEOUT_MS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Path to a TOML config file
    #[arg(long, env = "CHAIN_BOX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the full chain
    Chain,
    /// Mine a new block
    Mine,
    /// Run the consensus algorithm against registered nodes
    Resolve,
    /// Submit a new transaction
    Tx {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        recipient: String,
        /// Parsed leniently; non-numeric input is sent as null
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },
    /// Register a peer node
    Register {
        address: String,
    },
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    pub node_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationSettings {
    pub capacity: Option<usize>,
    pub lifetime_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the default config file if present.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub node_url: String,
    pub timeout: Duration,
    pub notification_capacity: usize,
    pub notification_lifetime: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_url: DEFAULT_NODE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            notification_capacity: DEFAULT_CAPACITY,
            notification_lifetime: DEFAULT_LIFETIME,
        }
    }
}

impl Config {
    pub fn resolve(args: &CliArgs, file: FileConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let node_url = args
            .node_url
            .clone()
            .or(file.node_url)
            .unwrap_or(defaults.node_url);

        let timeout_ms = validate_in_range(
            "timeout_ms",
            args.timeout_ms.or(file.timeout_ms).unwrap_or(DEFAULT_TIMEOUT_MS),
            100,
            600_000,
        )?;

        let capacity = file
            .notifications
            .capacity
            .unwrap_or(defaults.notification_capacity);
        let capacity = validate_in_range(
            "notifications.capacity",
            u64::try_from(capacity).unwrap_or(u64::MAX),
            1,
            20,
        )?;

        let lifetime_ms = validate_in_range(
            "notifications.lifetime_ms",
            file.notifications.lifetime_ms.unwrap_or(DEFAULT_LIFETIME_MS),
            100,
            600_000,
        )?;

        Ok(Self {
            node_url,
            timeout: Duration::from_millis(timeout_ms),
            notification_capacity: usize::try_from(capacity).unwrap_or(DEFAULT_CAPACITY),
            notification_lifetime: Duration::from_millis(lifetime_ms),
        })
    }
}

fn validate_in_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<u64, ConfigError> {
    if value < min || value > max {
        Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    } else {
        Ok(value)
    }
}

pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".chain-box"))
        .unwrap_or_else(|| PathBuf::from(".chain-box"))
}

pub fn default_config_path() -> PathBuf {
    app_dir().join("config.toml")
}

/// Parses CLI args and merges them with the config file.
pub fn load() -> anyhow::Result<(Config, Option<Command>)> {
    let args = CliArgs::parse();
    let file = match args.config {
        Some(ref path) => FileConfig::load(path)?,
        None => FileConfig::load_default()?,
    };
    let config = Config::resolve(&args, file)?;
    Ok((config, args.command))
}
