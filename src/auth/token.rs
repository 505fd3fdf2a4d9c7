//! Compact HS256 tokens with one of three fixed claim shapes.
//!
//! All shapes funnel into [`TokenIssuer::sign_at`], which stamps `nbf`/`iat`
//! with the issuance time and `exp` with issuance + [`TOKEN_TTL_SECONDS`].

use super::{
    error::{ConfigError, TokenError},
    models::{Account, Profile},
};
use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Fixed token lifetime (two hours).
pub const TOKEN_TTL_SECONDS: i64 = 2 * 60 * 60;

pub const ALG_HS256: &str = "HS256";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl TokenHeader {
    fn hs256() -> Self {
        Self {
            alg: ALG_HS256.to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Coarse role claim; downstream services enforce it, not this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Administrador,
    Cliente,
    IdentificacaoTotem,
}

impl Role {
    #[must_use]
    pub const fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Staff => Self::Administrador,
            Profile::Customer => Self::Cliente,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrador => "Administrador",
            Self::Cliente => "Cliente",
            Self::IdentificacaoTotem => "IdentificacaoTotem",
        }
    }
}

/// The identity part of a token. Exactly one shape per token.
///
/// Variant order matters for decoding: the widest shape is tried first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentityClaims {
    /// Kiosk session linked to a known customer account.
    LinkedKiosk {
        name: String,
        email: String,
        sub: String,
        #[serde(rename = "TokenAtendimento")]
        session: String,
        role: Role,
    },
    /// Credential login.
    Account {
        name: String,
        email: String,
        sub: String,
        role: Role,
    },
    /// Kiosk session without a resolved customer.
    Kiosk {
        #[serde(rename = "TokenAtendimento")]
        session: String,
        role: Role,
    },
}

impl IdentityClaims {
    #[must_use]
    pub fn account(account: &Account) -> Self {
        Self::Account {
            name: account.name.clone(),
            email: account.email.clone(),
            sub: account.id.to_string(),
            role: Role::for_profile(account.profile),
        }
    }

    #[must_use]
    pub fn linked_kiosk(account: &Account, session_id: Uuid) -> Self {
        Self::LinkedKiosk {
            name: account.name.clone(),
            email: account.email.clone(),
            sub: account.id.to_string(),
            session: session_id.to_string(),
            role: Role::IdentificacaoTotem,
        }
    }

    #[must_use]
    pub fn kiosk(session_id: Uuid) -> Self {
        Self::Kiosk {
            session: session_id.to_string(),
            role: Role::IdentificacaoTotem,
        }
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::LinkedKiosk { role, .. } | Self::Account { role, .. } | Self::Kiosk { role, .. } => {
                *role
            }
        }
    }

    /// Session id carried by kiosk tokens.
    #[must_use]
    pub fn session(&self) -> Option<&str> {
        match self {
            Self::LinkedKiosk { session, .. } | Self::Kiosk { session, .. } => Some(session),
            Self::Account { .. } => None,
        }
    }
}

/// Full claim set as serialized into the token body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: IdentityClaims,
    pub nbf: i64,
    pub exp: i64,
    pub iat: i64,
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, TokenError> {
    let bytes = Base64UrlUnpadded::decode_vec(s).map_err(|_| TokenError::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn split_token(token: &str) -> Result<(&str, &str, &str), TokenError> {
    let mut parts = token.split('.');
    let header = parts.next().ok_or(TokenError::Format)?;
    let claims = parts.next().ok_or(TokenError::Format)?;
    let signature = parts.next().ok_or(TokenError::Format)?;
    if parts.next().is_some() {
        return Err(TokenError::Format);
    }
    Ok((header, claims, signature))
}

/// Decode the claims without checking the signature.
///
/// # Errors
/// Returns an error if the token is malformed.
pub fn decode_unverified(token: &str) -> Result<Claims, TokenError> {
    let (_, claims_b64, _) = split_token(token)?;
    b64d_json(claims_b64)
}

/// Signs claim sets with a symmetric key derived from the configured secret.
#[derive(Clone)]
pub struct TokenIssuer {
    mac: HmacSha256,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("alg", &ALG_HS256)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// # Errors
    /// Returns an error if the signing secret is empty.
    pub fn new(secret: &SecretString) -> Result<Self, ConfigError> {
        let secret = secret.expose_secret();
        if secret.is_empty() {
            return Err(ConfigError::EmptySigningKey);
        }
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| ConfigError::InvalidKey("token signing"))?;
        Ok(Self { mac })
    }

    /// Token for a credential login.
    ///
    /// # Errors
    /// Returns an error if the claims cannot be encoded.
    pub fn issue_account(&self, account: &Account) -> Result<String, TokenError> {
        self.sign(IdentityClaims::account(account))
    }

    /// Token for a kiosk session linked to a customer account.
    ///
    /// # Errors
    /// Returns an error if the claims cannot be encoded.
    pub fn issue_linked_kiosk(
        &self,
        account: &Account,
        session_id: Uuid,
    ) -> Result<String, TokenError> {
        self.sign(IdentityClaims::linked_kiosk(account, session_id))
    }

    /// Token for a kiosk session with no customer.
    ///
    /// # Errors
    /// Returns an error if the claims cannot be encoded.
    pub fn issue_kiosk(&self, session_id: Uuid) -> Result<String, TokenError> {
        self.sign(IdentityClaims::kiosk(session_id))
    }

    fn sign(&self, identity: IdentityClaims) -> Result<String, TokenError> {
        self.sign_at(identity, Utc::now().timestamp())
    }

    /// Sign `identity` as if issued at `issued_at` (Unix seconds).
    ///
    /// # Errors
    /// Returns an error if the header or claims cannot be encoded.
    pub fn sign_at(&self, identity: IdentityClaims, issued_at: i64) -> Result<String, TokenError> {
        let claims = Claims {
            identity,
            nbf: issued_at,
            exp: issued_at + TOKEN_TTL_SECONDS,
            iat: issued_at,
        };

        let header_b64 = b64e_json(&TokenHeader::hs256())?;
        let claims_b64 = b64e_json(&claims)?;
        let signing_input = format!("{header_b64}.{claims_b64}");

        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        let signature_b64 = Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature_b64}"))
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// # Errors
    /// Returns an error if the token is malformed, uses another algorithm, has
    /// a bad signature, or `exp <= now`.
    pub fn verify(&self, token: &str, now_unix_seconds: i64) -> Result<Claims, TokenError> {
        let (header_b64, claims_b64, signature_b64) = split_token(token)?;

        let header: TokenHeader = b64d_json(header_b64)?;
        if header.alg != ALG_HS256 {
            return Err(TokenError::UnsupportedAlg(header.alg));
        }

        let signature =
            Base64UrlUnpadded::decode_vec(signature_b64).map_err(|_| TokenError::Base64)?;
        let mut mac = self.mac.clone();
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let claims: Claims = b64d_json(claims_b64)?;
        if claims.exp <= now_unix_seconds {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
