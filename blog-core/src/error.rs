use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("catalog parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid resource URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
