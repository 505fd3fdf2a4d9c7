use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_PASSWORD_KEY: &str = "password-key";
pub const ARG_SIGNING_KEY: &str = "signing-key";

// Env names are shared with the rest of the platform, hence the odd spelling.
const ENV_PASSWORD_KEY: &str = "SALT_KEY_PASSWORK";
const ENV_SIGNING_KEY: &str = "SecretKeyPassword";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PASSWORD_KEY)
                .long(ARG_PASSWORD_KEY)
                .help("HMAC key used to hash account passwords")
                .env(ENV_PASSWORD_KEY)
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_SIGNING_KEY)
                .long(ARG_SIGNING_KEY)
                .help("Secret used to sign access tokens (HS256)")
                .env(ENV_SIGNING_KEY)
                .hide_env_values(true)
                .required(true),
        )
}

#[derive(Debug)]
pub struct Options {
    pub password_key: SecretString,
    pub signing_key: SecretString,
}

impl Options {
    /// # Errors
    /// Returns an error if either secret is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let password_key = matches
            .get_one::<String>(ARG_PASSWORD_KEY)
            .cloned()
            .context("missing required argument: --password-key")?;
        let signing_key = matches
            .get_one::<String>(ARG_SIGNING_KEY)
            .cloned()
            .context("missing required argument: --signing-key")?;

        Ok(Self {
            password_key: SecretString::from(password_key),
            signing_key: SecretString::from(signing_key),
        })
    }
}
