use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::secrets;
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let secrets = secrets::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn,
        password_key: secrets.password_key,
        signing_key: secrets.signing_key,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn builds_server_action() -> Result<()> {
        temp_env::with_vars(
            [
                ("FASTFOOD_AUTH_PORT", None::<&str>),
                ("FASTFOOD_AUTH_DSN", None),
                ("SALT_KEY_PASSWORK", None),
                ("SecretKeyPassword", None),
            ],
            || {
                let matches = crate::cli::commands::new().try_get_matches_from(vec![
                    "fastfood-auth",
                    "--dsn",
                    "postgres://localhost:5432/fastfood",
                    "--password-key",
                    "pepper",
                    "--signing-key",
                    "signing",
                ])?;

                let Action::Server(args) = handler(&matches)?;
                assert_eq!(args.port, 8080);
                assert_eq!(args.dsn, "postgres://localhost:5432/fastfood");
                assert_eq!(args.password_key.expose_secret(), "pepper");
                assert_eq!(args.signing_key.expose_secret(), "signing");
                Ok(())
            },
        )
    }
}
