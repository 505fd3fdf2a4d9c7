use super::error::ConfigError;
use secrecy::{ExposeSecret, SecretString};

/// Secrets consumed by the token core, passed explicitly at construction.
#[derive(Debug)]
pub struct AuthConfig {
    password_key: SecretString,
    signing_key: SecretString,
}

impl AuthConfig {
    /// # Errors
    /// Returns an error if either secret is empty.
    pub fn new(password_key: SecretString, signing_key: SecretString) -> Result<Self, ConfigError> {
        if password_key.expose_secret().is_empty() {
            return Err(ConfigError::EmptyPasswordKey);
        }
        if signing_key.expose_secret().is_empty() {
            return Err(ConfigError::EmptySigningKey);
        }
        Ok(Self {
            password_key,
            signing_key,
        })
    }

    #[must_use]
    pub fn password_key(&self) -> &SecretString {
        &self.password_key
    }

    #[must_use]
    pub fn signing_key(&self) -> &SecretString {
        &self.signing_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_password_key() {
        let result = AuthConfig::new(
            SecretString::default(),
            SecretString::from("signing".to_string()),
        );
        assert!(matches!(result, Err(ConfigError::EmptyPasswordKey)));
    }

    #[test]
    fn rejects_empty_signing_key() {
        let result = AuthConfig::new(
            SecretString::from("pepper".to_string()),
            SecretString::default(),
        );
        assert!(matches!(result, Err(ConfigError::EmptySigningKey)));
    }

    #[test]
    fn debug_does_not_leak_secrets() -> Result<(), ConfigError> {
        let config = AuthConfig::new(
            SecretString::from("pepper-key".to_string()),
            SecretString::from("signing-key".to_string()),
        )?;
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("pepper-key"));
        assert!(!rendered.contains("signing-key"));
        Ok(())
    }
}
