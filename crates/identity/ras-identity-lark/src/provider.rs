//! Lark identity provider implementation.

use crate::client::LarkClient;
use crate::config::{LarkProviderConfig, UserIdType};
use crate::error::LarkResult;
use crate::types::LarkUserProfile;
use async_trait::async_trait;
use ras_identity_core::{IdentityProvider, IdentityResult, UserInfo};
use reqwest::Client;
use std::collections::HashMap;
use tracing::{info, warn};

pub const USERNAME_PREFIX: &str = "lark";

pub const EXTRA_UNION_ID: &str = "larkUnionId";
pub const EXTRA_OPEN_ID: &str = "larkOpenId";
pub const EXTRA_USER_ID: &str = "larkUserId";

/// Lark provider that implements IdentityProvider
#[derive(Clone)]
pub struct LarkProvider {
    config: LarkProviderConfig,
    client: LarkClient,
}

impl LarkProvider {
    /// Create a provider with its own HTTP client.
    pub fn new(config: LarkProviderConfig) -> LarkResult<Self> {
        let client = LarkClient::from_config(&config)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a provider on top of a shared HTTP client.
    pub fn with_http_client(config: LarkProviderConfig, http_client: Client) -> Self {
        let client = LarkClient::new(http_client, &config);
        Self::with_client(config, client)
    }

    fn with_client(config: LarkProviderConfig, client: LarkClient) -> Self {
        if !config.user_id_type.is_recognized() {
            warn!(
                "Lark provider '{}' has unrecognized user id type '{}', canonical ids will be empty",
                config.provider_id, config.user_id_type
            );
        }

        Self { config, client }
    }

    pub fn config(&self) -> &LarkProviderConfig {
        &self.config
    }

    pub fn client(&self) -> &LarkClient {
        &self.client
    }

    /// Run the full code -> app token -> user token -> profile exchange.
    pub async fn authenticate(&self, code: &str) -> LarkResult<UserInfo> {
        let app_token = self.client.exchange_code_for_app_token(code).await?;
        let user_token = self.client.exchange_for_user_access_token(&app_token).await?;
        let profile = self.client.fetch_user_profile(&user_token).await?;

        let user_info = normalize(&profile, &self.config.user_id_type);

        info!(
            "Successfully authenticated Lark user for provider: {}",
            self.config.provider_id
        );

        Ok(user_info)
    }
}

/// Map a Lark profile onto the shared user info shape.
///
/// The canonical id is empty for an unrecognized selector. All three Lark ids
/// land in `extra` whichever one was chosen.
pub fn normalize(profile: &LarkUserProfile, user_id_type: &UserIdType) -> UserInfo {
    let canonical_id = match user_id_type {
        UserIdType::UnionId => profile.union_id.as_str(),
        UserIdType::OpenId => profile.open_id.as_str(),
        UserIdType::UserId => profile.user_id.as_str(),
        UserIdType::Unrecognized(_) => "",
    };

    let email = if profile.enterprise_email.is_empty() {
        profile.email.clone()
    } else {
        profile.enterprise_email.clone()
    };

    let extra = HashMap::from([
        (EXTRA_UNION_ID.to_string(), profile.union_id.clone()),
        (EXTRA_OPEN_ID.to_string(), profile.open_id.clone()),
        (EXTRA_USER_ID.to_string(), profile.user_id.clone()),
    ]);

    UserInfo {
        display_name: profile.name.clone(),
        username: format!("{}-{}", USERNAME_PREFIX, canonical_id),
        email,
        avatar_url: profile.avatar_url.clone(),
        extra,
    }
}

#[async_trait]
impl IdentityProvider for LarkProvider {
    fn provider_id(&self) -> &str {
        &self.config.provider_id
    }

    async fn authenticate(&self, code: &str) -> IdentityResult<UserInfo> {
        LarkProvider::authenticate(self, code)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> LarkUserProfile {
        LarkUserProfile {
            name: "zhangsan".to_string(),
            avatar_url: "www.feishu.cn/avatar/icon".to_string(),
            open_id: "ou-1".to_string(),
            union_id: "on-2".to_string(),
            user_id: "5d9".to_string(),
            email: "a@x.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_open_id_example() {
        let user = normalize(&sample_profile(), &UserIdType::OpenId);

        assert_eq!(user.username, "lark-ou-1");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.display_name, "zhangsan");
        assert_eq!(user.avatar_url, "www.feishu.cn/avatar/icon");
    }

    #[test]
    fn test_normalize_selects_each_id() {
        let profile = sample_profile();

        assert_eq!(normalize(&profile, &UserIdType::UnionId).username, "lark-on-2");
        assert_eq!(normalize(&profile, &UserIdType::UserId).username, "lark-5d9");
    }

    #[test]
    fn test_normalize_unrecognized_selector_degrades() {
        let selector = UserIdType::from("mobile");
        let user = normalize(&sample_profile(), &selector);

        assert_eq!(user.username, "lark-");
        assert_eq!(user.extra.len(), 3);
    }

    #[test]
    fn test_normalize_prefers_enterprise_email() {
        let profile = LarkUserProfile {
            enterprise_email: "demo@mail.com".to_string(),
            ..sample_profile()
        };

        let user = normalize(&profile, &UserIdType::OpenId);
        assert_eq!(user.email, "demo@mail.com");
    }

    #[test]
    fn test_normalize_extra_has_all_ids() {
        for selector in [
            UserIdType::UnionId,
            UserIdType::OpenId,
            UserIdType::UserId,
            UserIdType::from("nope"),
        ] {
            let user = normalize(&sample_profile(), &selector);

            assert_eq!(user.extra.len(), 3);
            assert_eq!(user.extra[EXTRA_UNION_ID], "on-2");
            assert_eq!(user.extra[EXTRA_OPEN_ID], "ou-1");
            assert_eq!(user.extra[EXTRA_USER_ID], "5d9");
        }
    }

    #[test]
    fn test_provider_id_from_config() {
        let config = LarkProviderConfig::new("cli_a1", "secret", "", "union_id")
            .with_provider_id("feishu-corp");
        let provider = LarkProvider::with_http_client(config, Client::new());

        assert_eq!(IdentityProvider::provider_id(&provider), "feishu-corp");
    }
}
