use thiserror::Error;

/// Problems with the sync configuration. All of them stop startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: missing required fields ({})", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Invalid configuration: sync[{index}] {reason}")]
    InvalidSyncPoint { index: usize, reason: String },
}
