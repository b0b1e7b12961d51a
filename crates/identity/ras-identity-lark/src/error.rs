//! Lark adapter error types.

use ras_identity_core::IdentityError;
use thiserror::Error;

pub type LarkResult<T> = Result<T, LarkError>;

#[derive(Debug, Error)]
pub enum LarkError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("Lark returned code {code}: {message}")]
    Upstream { code: i64, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl LarkError {
    pub(crate) fn decode(endpoint: &str, reason: impl ToString) -> Self {
        LarkError::Decode {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<LarkError> for IdentityError {
    fn from(err: LarkError) -> Self {
        match err {
            LarkError::Transport(e) => IdentityError::Transport(e.to_string()),
            err @ LarkError::Decode { .. } => IdentityError::Decode(err.to_string()),
            LarkError::Upstream { code, message } => IdentityError::Upstream { code, message },
            LarkError::Config(msg) => IdentityError::ProviderError(msg),
        }
    }
}
