//! Lark provider configuration types.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PROVIDER_ID: &str = "lark";

const APP_ACCESS_TOKEN_URL: &str =
    "https://open.feishu.cn/open-apis/auth/v3/app_access_token/internal";
const USER_ACCESS_TOKEN_URL: &str = "https://open.feishu.cn/open-apis/authen/v1/oidc/access_token";
const USER_INFO_URL: &str = "https://open.feishu.cn/open-apis/authen/v1/user_info";

/// Which Lark identifier becomes the canonical user id.
///
/// Unknown selectors are kept rather than rejected; they resolve to an empty
/// canonical id during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserIdType {
    #[default]
    UnionId,
    OpenId,
    UserId,
    Unrecognized(String),
}

impl UserIdType {
    pub fn as_str(&self) -> &str {
        match self {
            UserIdType::UnionId => "union_id",
            UserIdType::OpenId => "open_id",
            UserIdType::UserId => "user_id",
            UserIdType::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, UserIdType::Unrecognized(_))
    }
}

impl From<&str> for UserIdType {
    fn from(value: &str) -> Self {
        match value {
            "union_id" => UserIdType::UnionId,
            "open_id" => UserIdType::OpenId,
            "user_id" => UserIdType::UserId,
            other => UserIdType::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for UserIdType {
    fn from(value: String) -> Self {
        UserIdType::from(value.as_str())
    }
}

impl From<UserIdType> for String {
    fn from(value: UserIdType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for UserIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vendor endpoints used by the three step exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LarkEndpoints {
    pub app_access_token: String,
    pub user_access_token: String,
    pub user_info: String,
}

impl Default for LarkEndpoints {
    fn default() -> Self {
        Self {
            app_access_token: APP_ACCESS_TOKEN_URL.to_string(),
            user_access_token: USER_ACCESS_TOKEN_URL.to_string(),
            user_info: USER_INFO_URL.to_string(),
        }
    }
}

impl LarkEndpoints {
    /// Same paths as the defaults, rooted at another origin.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            app_access_token: format!("{}/open-apis/auth/v3/app_access_token/internal", base),
            user_access_token: format!("{}/open-apis/authen/v1/oidc/access_token", base),
            user_info: format!("{}/open-apis/authen/v1/user_info", base),
        }
    }
}

/// Lark provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LarkProviderConfig {
    #[serde(default = "default_provider_id")]
    pub provider_id: String,
    /// Lark `app_id`
    pub client_id: String,
    /// Lark `app_secret`
    pub client_secret: String,
    #[serde(default)]
    pub redirect_uri: String,
    #[serde(default)]
    pub user_id_type: UserIdType,
    #[serde(default)]
    pub endpoints: LarkEndpoints,
    /// Only used when the provider builds its own HTTP client.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_provider_id() -> String {
    DEFAULT_PROVIDER_ID.to_string()
}

fn default_http_timeout() -> u64 {
    30
}

impl LarkProviderConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        user_id_type: impl Into<UserIdType>,
    ) -> Self {
        Self {
            provider_id: default_provider_id(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            user_id_type: user_id_type.into(),
            endpoints: LarkEndpoints::default(),
            http_timeout_seconds: default_http_timeout(),
        }
    }

    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = provider_id.into();
        self
    }

    pub fn with_endpoints(mut self, endpoints: LarkEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }
}
