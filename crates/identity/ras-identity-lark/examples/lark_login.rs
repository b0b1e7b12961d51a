//! Example showing how to complete a Lark login from an authorization code
//!
//! Lark redirects the browser to `LARK_REDIRECT_URI?code=...`; pass that code
//! in as `LARK_AUTH_CODE` to run the exchange by hand.

use anyhow::{Context, Result};
use ras_identity_lark::{IdentityProvider, LarkProvider, LarkProviderConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let config = LarkProviderConfig::new(
        std::env::var("LARK_APP_ID").context("LARK_APP_ID environment variable is required")?,
        std::env::var("LARK_APP_SECRET")
            .context("LARK_APP_SECRET environment variable is required")?,
        std::env::var("LARK_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:3000/auth/lark/callback".to_string()),
        std::env::var("LARK_USER_ID_TYPE").unwrap_or_else(|_| "union_id".to_string()),
    );
    let code =
        std::env::var("LARK_AUTH_CODE").context("LARK_AUTH_CODE environment variable is required")?;

    let provider: Box<dyn IdentityProvider> =
        Box::new(LarkProvider::new(config).context("Failed to create Lark provider")?);

    let user = provider
        .authenticate(&code)
        .await
        .context("Lark authentication failed")?;

    info!("Authenticated {} via {}", user.username, provider.provider_id());
    println!("{}", serde_json::to_string_pretty(&user)?);

    Ok(())
}
