//! Account and kiosk-session stores.
//!
//! The token core only sees these two capabilities. [`postgres`] backs them
//! with `sqlx`, [`memory`] keeps everything in-process.

pub mod memory;
pub mod postgres;

use crate::auth::models::{Account, Customer, KioskSession};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Account whose email and stored hash both match.
    async fn login(&self, email: &str, password_hash: &str) -> Result<Option<Account>>;

    /// Customer registered under an already-cleaned CPF.
    async fn customer_by_cpf(&self, cpf: &str) -> Result<Option<Customer>>;

    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> Result<()>;
}

#[async_trait]
pub trait KioskSessionStore: Send + Sync {
    /// Persist a new session, optionally linked to a customer and/or CPF.
    async fn create(&self, customer: Option<&Customer>, cpf: Option<&str>)
        -> Result<KioskSession>;

    async fn by_id(&self, session_id: Uuid) -> Result<Option<KioskSession>>;

    /// Most recently created session recorded for `cpf`.
    async fn latest_for_cpf(&self, cpf: &str) -> Result<Option<KioskSession>>;
}
