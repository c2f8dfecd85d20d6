use thiserror::Error;

/// Failure of a single backend request.
///
/// The variants only exist for diagnostics; callers treat them all as
/// "fetch failed".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }

    pub(crate) fn decode(url: &str, err: impl ToString) -> Self {
        FetchError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// Decode a JSON body already fetched from `url`.
pub fn decode_value<T: serde::de::DeserializeOwned>(
    url: &str,
    value: serde_json::Value,
) -> Result<T, FetchError> {
    serde_json::from_value(value).map_err(|e| FetchError::decode(url, e))
}
