//! HTTP client for the three step Lark login exchange.

use crate::config::{LarkEndpoints, LarkProviderConfig};
use crate::error::{LarkError, LarkResult};
use crate::types::{
    AppAccessToken, AppAccessTokenResponse, ApiStatus, DataEnvelope, LarkUserProfile,
    UserAccessToken,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Talks to the Lark open platform on behalf of one configured app.
#[derive(Clone)]
pub struct LarkClient {
    http_client: Client,
    endpoints: LarkEndpoints,
    client_id: String,
    client_secret: String,
}

impl LarkClient {
    /// Wrap an existing transport. Timeouts and pooling are the transport's concern.
    pub fn new(http_client: Client, config: &LarkProviderConfig) -> Self {
        Self {
            http_client,
            endpoints: config.endpoints.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    /// Build a dedicated transport from the configured timeout.
    pub fn from_config(config: &LarkProviderConfig) -> LarkResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .map_err(|e| LarkError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::new(http_client, config))
    }

    /// Exchange app credentials for an app access token bound to `code`.
    pub async fn exchange_code_for_app_token(&self, code: &str) -> LarkResult<AppAccessToken> {
        let endpoint = &self.endpoints.app_access_token;
        let body = serde_json::json!({
            "app_id": self.client_id,
            "app_secret": self.client_secret,
        });

        let request = self.http_client.post(endpoint).body(body.to_string());
        let response: AppAccessTokenResponse = self.send(endpoint, request).await?;

        if response.app_access_token.is_empty() {
            return Err(LarkError::decode(endpoint, "missing app_access_token"));
        }

        AppAccessToken::from_response(response, code, endpoint)
    }

    /// Trade the code carried by `app_token` for a user access token.
    pub async fn exchange_for_user_access_token(
        &self,
        app_token: &AppAccessToken,
    ) -> LarkResult<UserAccessToken> {
        let endpoint = &self.endpoints.user_access_token;
        let body = serde_json::json!({
            "grant_type": "authorization_code",
            "code": app_token.authorization_code,
        });

        let request = self
            .http_client
            .post(endpoint)
            .bearer_auth(&app_token.access_token)
            .body(body.to_string());

        let envelope: DataEnvelope<UserAccessToken> = self.send(endpoint, request).await?;
        envelope
            .data
            .ok_or_else(|| LarkError::decode(endpoint, "missing data"))
    }

    pub async fn fetch_user_profile(
        &self,
        user_token: &UserAccessToken,
    ) -> LarkResult<LarkUserProfile> {
        let endpoint = &self.endpoints.user_info;
        let request = self
            .http_client
            .get(endpoint)
            .bearer_auth(&user_token.access_token);

        let envelope: DataEnvelope<LarkUserProfile> = self.send(endpoint, request).await?;
        envelope
            .data
            .ok_or_else(|| LarkError::decode(endpoint, "missing data"))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> LarkResult<T> {
        let response = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("Lark responded {} for {}", status, endpoint);
        decode_body(endpoint, &body)
    }
}

/// Decode a Lark body, checking the embedded status code before the payload.
///
/// The HTTP status is ignored; Lark reports failures through `code`.
pub(crate) fn decode_body<T: DeserializeOwned>(endpoint: &str, body: &str) -> LarkResult<T> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        error!("Undecodable response from {}: {}", endpoint, e);
        LarkError::decode(endpoint, e)
    })?;

    let status = ApiStatus::deserialize(&value).map_err(|e| LarkError::decode(endpoint, e))?;
    if status.code != 0 {
        error!(
            "Lark request to {} failed with code {}: {}",
            endpoint, status.code, status.msg
        );
        return Err(LarkError::Upstream {
            code: status.code,
            message: status.msg,
        });
    }

    T::deserialize(value).map_err(|e| LarkError::decode(endpoint, e))
}
