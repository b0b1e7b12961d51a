//! Core identity provider traits and types.
//!
//! Every provider adapter turns an authorization code into the same
//! [`UserInfo`] shape and reports failures through [`IdentityError`], so the
//! caller can swap vendors without touching its session layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// Network or connection failure talking to the vendor.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The vendor answered with a body that could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The vendor reported a non-success application code.
    #[error("Upstream error {code}: {message}")]
    Upstream { code: i64, message: String },

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

pub type IdentityResult<T> = Result<T, IdentityError>;

/// Normalized user info returned by every provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub display_name: String,
    /// `<provider>-<canonical id>`
    pub username: String,
    pub email: String,
    pub avatar_url: String,
    /// Vendor specific identifiers kept for later correlation.
    pub extra: HashMap<String, String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn provider_id(&self) -> &str;

    async fn authenticate(&self, code: &str) -> IdentityResult<UserInfo>;
}
