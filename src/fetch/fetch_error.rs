#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Blocked by site: {0}")]
    Blocked(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),
}
