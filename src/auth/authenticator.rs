//! Login and kiosk identification flows.
//!
//! Each flow is a short linear sequence with at most one store call per step,
//! awaited in order. Nothing is shared between requests except the keyed
//! hasher and issuer, which are read-only.

use super::{
    config::AuthConfig,
    cpf,
    error::{AuthError, ConfigError},
    password::CredentialHasher,
    token::TokenIssuer,
};
use crate::store::{AccountStore, KioskSessionStore};
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};
use tracing::{error, info, instrument, warn};

const EMAIL_FIELD: &str = "email";
const PASSWORD_FIELD: &str = "senha";

/// Login body, `{"Email": "...", "Senha": "..."}` with case-insensitive keys.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Parse a raw request body.
    ///
    /// A JSON `null` body or missing properties yield empty fields; anything
    /// that is not a JSON object with string (or null) values is rejected.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidFormat`] for malformed bodies.
    pub fn from_json(body: &[u8]) -> Result<Self, AuthError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| AuthError::InvalidFormat)?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self {
                email: string_property(&map, EMAIL_FIELD)?,
                password: string_property(&map, PASSWORD_FIELD)?,
            }),
            _ => Err(AuthError::InvalidFormat),
        }
    }
}

/// Case-insensitive property lookup; the last duplicate in document order wins.
fn string_property(map: &Map<String, Value>, name: &str) -> Result<String, AuthError> {
    match map
        .iter()
        .filter(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
        .last()
    {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(AuthError::InvalidFormat),
    }
}

pub struct Authenticator {
    accounts: Arc<dyn AccountStore>,
    sessions: Arc<dyn KioskSessionStore>,
    hasher: CredentialHasher,
    issuer: TokenIssuer,
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("hasher", &self.hasher)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// # Errors
    /// Returns an error if a configured secret cannot key its MAC.
    pub fn new(
        config: &AuthConfig,
        accounts: Arc<dyn AccountStore>,
        sessions: Arc<dyn KioskSessionStore>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            accounts,
            sessions,
            hasher: CredentialHasher::new(config.password_key())?,
            issuer: TokenIssuer::new(config.signing_key())?,
        })
    }

    #[must_use]
    pub fn accounts(&self) -> &Arc<dyn AccountStore> {
        &self.accounts
    }

    /// Credential login from a raw request body.
    ///
    /// # Errors
    /// See [`Authenticator::login_with`]; additionally `InvalidFormat`.
    pub async fn login(&self, body: &[u8]) -> Result<String, AuthError> {
        let credentials = Credentials::from_json(body)?;
        self.login_with(&credentials).await
    }

    /// # Errors
    /// `MissingField` if email or password is empty, `Unauthorized` if no
    /// account matches, `Upstream` if the store fails.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login_with(&self, credentials: &Credentials) -> Result<String, AuthError> {
        info!("processing credential login");

        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingField);
        }

        let password_hash = self.hasher.hash(&credentials.password);
        let account = self
            .accounts
            .login(&credentials.email, &password_hash)
            .await
            .map_err(upstream)?;

        let Some(account) = account else {
            warn!("account not found for email: {}", credentials.email);
            return Err(AuthError::Unauthorized);
        };

        info!("account authenticated: {}", account.name);
        Ok(self.issuer.issue_account(&account)?)
    }

    /// Kiosk identification, with or without a CPF.
    ///
    /// A well-formed CPF that matches no customer still gets a session (with
    /// the CPF recorded) and a kiosk token; only a missing CPF is anonymous.
    ///
    /// # Errors
    /// `InvalidCpf` if a supplied CPF fails validation, `Upstream` if a store
    /// fails.
    #[instrument(skip(self))]
    pub async fn identify(&self, cpf: Option<&str>) -> Result<String, AuthError> {
        info!(
            "processing kiosk identification, cpf: {}",
            cpf.unwrap_or("not provided")
        );

        let Some(raw) = cpf.filter(|raw| !raw.is_empty()) else {
            let session = self.sessions.create(None, None).await.map_err(upstream)?;
            info!("anonymous kiosk session created: {}", session.session_id);
            return Ok(self.issuer.issue_kiosk(session.session_id)?);
        };

        let cpf = cpf::clean(raw);
        if !cpf::is_valid(&cpf) {
            warn!("invalid cpf provided: {cpf}");
            return Err(AuthError::InvalidCpf);
        }

        let customer = self
            .accounts
            .customer_by_cpf(&cpf)
            .await
            .map_err(upstream)?;
        let session = self
            .sessions
            .create(customer.as_ref(), Some(&cpf))
            .await
            .map_err(upstream)?;

        let token = match &customer {
            Some(customer) => {
                info!(
                    "kiosk session {} linked to customer {}",
                    session.session_id, customer.id
                );
                self.issuer
                    .issue_linked_kiosk(&customer.account, session.session_id)?
            }
            None => {
                info!(
                    "kiosk session {} created for unknown cpf",
                    session.session_id
                );
                self.issuer.issue_kiosk(session.session_id)?
            }
        };

        Ok(token)
    }
}

fn upstream(err: anyhow::Error) -> AuthError {
    error!("store call failed: {err:#}");
    AuthError::Upstream(err)
}
