//! Token issuance core.
//!
//! Leaves first: [`password`] hashes credentials, [`cpf`] validates national
//! ids, [`token`] signs claim sets. [`authenticator`] ties them to the stores
//! and decides which of the three identity shapes a request receives.

pub mod authenticator;
pub mod config;
pub mod cpf;
pub mod error;
pub mod models;
pub mod password;
pub mod token;

pub use authenticator::{Authenticator, Credentials};
pub use config::AuthConfig;
pub use error::{AuthError, ConfigError, TokenError};
pub use models::{Account, Customer, KioskSession, Profile};
pub use password::CredentialHasher;
pub use token::{Claims, IdentityClaims, Role, TokenIssuer};
