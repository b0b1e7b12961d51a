//! Lark open-platform wire types.

use chrono::{DateTime, Duration, Utc};
use crate::error::{LarkError, LarkResult};
use serde::{Deserialize, Serialize};

/// Status fields present on every Lark response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiStatus {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

/// Lark wraps user scoped payloads in a `data` object.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: Option<T>,
}

/// Body of the `app_access_token/internal` endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct AppAccessTokenResponse {
    #[serde(default)]
    pub app_access_token: String,
    #[serde(default)]
    pub tenant_access_token: String,
    /// Seconds until expiry.
    #[serde(default)]
    pub expire: i64,
}

/// Token authorizing the adapter itself, plus the code it was issued for.
///
/// The user token exchange needs the original authorization code, so it
/// travels with the app token instead of being looked up again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppAccessToken {
    pub access_token: String,
    pub token_type: String,
    pub tenant_access_token: String,
    pub expires_in: i64,
    pub expiry: DateTime<Utc>,
    pub authorization_code: String,
}

impl AppAccessToken {
    pub(crate) fn from_response(
        response: AppAccessTokenResponse,
        code: &str,
        endpoint: &str,
    ) -> LarkResult<Self> {
        let expiry = Duration::try_seconds(response.expire)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| LarkError::decode(endpoint, "expire out of range"))?;

        Ok(Self {
            access_token: response.app_access_token,
            token_type: "Bearer".to_string(),
            tenant_access_token: response.tenant_access_token,
            expires_in: response.expire,
            expiry,
            authorization_code: code.to_string(),
        })
    }
}

/// Token scoped to the authenticated end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccessToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_expires_in: i64,
    #[serde(default)]
    pub scope: String,
}

/// Profile returned by `authen/v1/user_info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LarkUserProfile {
    pub name: String,
    pub en_name: String,
    pub avatar_url: String,
    pub avatar_thumb: String,
    pub avatar_middle: String,
    pub avatar_big: String,
    pub open_id: String,
    pub union_id: String,
    pub email: String,
    pub enterprise_email: String,
    pub user_id: String,
    pub mobile: String,
    pub tenant_key: String,
    pub employee_no: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://lark.test/app_access_token";

    #[test]
    fn test_profile_tolerates_missing_fields() {
        let profile: LarkUserProfile = serde_json::from_value(serde_json::json!({
            "name": "zhangsan",
            "open_id": "ou-caecc734c2e3328a62489fe0648c4b98779515d3",
            "tenant_key": "736588c92lxf175d"
        }))
        .unwrap();

        assert_eq!(profile.name, "zhangsan");
        assert_eq!(profile.tenant_key, "736588c92lxf175d");
        assert!(profile.union_id.is_empty());
        assert!(profile.enterprise_email.is_empty());
    }

    #[test]
    fn test_app_token_carries_code_and_expiry() {
        let response: AppAccessTokenResponse = serde_json::from_value(serde_json::json!({
            "app_access_token": "t-g1044ghJRUIJJ5ZPPZMOHKWZISL33E4QSS3abcef",
            "code": 0,
            "expire": 7200,
            "msg": "ok",
            "tenant_access_token": "t-tenant"
        }))
        .unwrap();

        let before = Utc::now();
        let token = AppAccessToken::from_response(response, "auth-code-1", ENDPOINT).unwrap();

        assert_eq!(token.authorization_code, "auth-code-1");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.tenant_access_token, "t-tenant");
        assert_eq!(token.expires_in, 7200);
        assert!(token.expiry >= before + Duration::seconds(7200));
    }

    #[test]
    fn test_app_token_rejects_unrepresentable_expiry() {
        for expire in [i64::MAX, i64::MIN] {
            let response = AppAccessTokenResponse {
                app_access_token: "t-app".to_string(),
                tenant_access_token: String::new(),
                expire,
            };

            let result = AppAccessToken::from_response(response, "auth-code-1", ENDPOINT);
            assert!(matches!(result, Err(LarkError::Decode { .. })));
        }
    }

    #[test]
    fn test_user_access_token_requires_access_token() {
        let missing = serde_json::from_value::<UserAccessToken>(serde_json::json!({
            "refresh_token": "ur-6EyFQZyplb9URrOx5NtT_HM53zrJg59HXwy040400G.e"
        }));
        assert!(missing.is_err());
    }
}
