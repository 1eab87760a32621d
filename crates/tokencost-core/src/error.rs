use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TcError {
    #[cfg(feature = "network")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("pricing API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog not found at {}", .0.display())]
    CatalogMissing(PathBuf),

    #[error("bad catalog entry {}: {source}", path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TcError>;
