use thiserror::Error;

/// Reasons a login or kiosk identification request is rejected.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid request format")]
    InvalidFormat,
    #[error("email and password are required")]
    MissingField,
    #[error("invalid cpf")]
    InvalidCpf,
    #[error("account not found or invalid credentials")]
    Unauthorized,
    #[error("store failure: {0:#}")]
    Upstream(#[source] anyhow::Error),
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Failures while building, decoding or verifying a compact token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token format")]
    Format,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
}

/// Startup-time misconfiguration of the secrets.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("password hash key is missing or empty")]
    EmptyPasswordKey,
    #[error("token signing key is missing or empty")]
    EmptySigningKey,
    #[error("invalid key length for {0}")]
    InvalidKey(&'static str),
}
