//! Lark (Feishu) identity provider adapter.
//!
//! Turns a Lark authorization code into a [`UserInfo`] by exchanging app
//! credentials for an app access token, trading the code for a user access
//! token, and reading the user's profile. The profile is normalized so that
//! the username is `lark-<canonical id>` and every Lark id variant is kept in
//! `extra` for later correlation.

mod client;
mod config;
mod error;
mod provider;
mod types;


pub use client::LarkClient;
pub use config::{DEFAULT_PROVIDER_ID, LarkEndpoints, LarkProviderConfig, UserIdType};
pub use error::{LarkError, LarkResult};
pub use provider::{
    EXTRA_OPEN_ID, EXTRA_UNION_ID, EXTRA_USER_ID, LarkProvider, USERNAME_PREFIX, normalize,
};
pub use types::{AppAccessToken, LarkUserProfile, UserAccessToken};

// Re-export common types for convenience
pub use ras_identity_core::{IdentityError, IdentityProvider, UserInfo};
