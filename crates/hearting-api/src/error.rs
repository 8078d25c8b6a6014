use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend answered with http status {code}")]
    Status { code: u16, body: String },
    #[error("backend rejected the request with status `{status}`")]
    Rejected { status: String },
    #[error("backend reported success without a payload")]
    MissingData,
    #[error("malformed backend payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status code behind the failure, when the failure came from one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
