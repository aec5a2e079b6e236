use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Invalid version {version:?}: {source}")]
    Parse {
        version: String,
        source: semver::Error,
    },

    #[error("Release not found: {0}")]
    NotFound(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Release index not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
