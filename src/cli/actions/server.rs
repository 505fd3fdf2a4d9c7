use crate::{
    api,
    auth::{AuthConfig, Authenticator},
    store::PgStore,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub password_key: SecretString,
    pub signing_key: SecretString,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the secrets are unusable, the database is unreachable, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        port = args.port,
        dsn = %redact_dsn(&args.dsn),
        version = env!("CARGO_PKG_VERSION"),
        commit = short_commit(crate::GIT_COMMIT_HASH),
        "starting fastfood-auth"
    );

    let config = AuthConfig::new(args.password_key, args.signing_key)
        .context("invalid authentication secrets")?;

    let store = Arc::new(
        PgStore::connect(&args.dsn)
            .await
            .context("failed to connect to database")?,
    );

    let authenticator = Authenticator::new(&config, store.clone(), store)
        .context("failed to build authenticator")?;

    api::new(args.port, Arc::new(authenticator)).await
}

fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("REDACTED"));
            }
            parsed.to_string()
        }
        Err(_) => "invalid-dsn".to_string(),
    }
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}
