//! Store configuration.

use serde::{Deserialize, Serialize};

/// Which backend holds the documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process store; contents are lost on restart.
    #[default]
    Memory,
    /// MongoDB.
    Mongo,
}

/// Document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// MongoDB connection string
    #[serde(default = "default_mongo_url")]
    pub mongo_url: String,
    /// Database name
    #[serde(default = "default_database")]
    pub database: String,
    /// Server selection / connect timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Interval between background health probes in seconds
    #[serde(default = "default_health_interval_secs")]
    pub health_interval_secs: u64,
}

fn default_mongo_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "feedback".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_health_interval_secs() -> u64 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            mongo_url: default_mongo_url(),
            database: default_database(),
            timeout_secs: default_timeout_secs(),
            health_interval_secs: default_health_interval_secs(),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "mongo" | "mongodb" => Ok(Self::Mongo),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}
