use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("Invalid sign endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("HTTP client construction failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Sign request timed out")]
    Timeout,

    #[error("Unexpected status code: {0}")]
    Status(u16),

    #[error("Sign request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Malformed sign response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SignError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SignError::Timeout
        } else {
            SignError::Transport(err)
        }
    }
}
