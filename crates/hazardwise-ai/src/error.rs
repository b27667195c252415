use thiserror::Error;

/// Startup failures. Per-request calls on a built catalog never fail.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("synthetic corpus is empty: reference data has no cities or structure profiles")]
    EmptyCorpus,

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}
