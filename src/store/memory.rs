//! In-process stores for tests and local runs.

use super::{AccountStore, KioskSessionStore};
use crate::auth::models::{Account, Customer, KioskSession};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<Vec<Account>>,
    customers: RwLock<Vec<Customer>>,
    sessions: RwLock<Vec<KioskSession>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_account(&self, account: Account) {
        self.accounts.write().await.push(account);
    }

    pub async fn insert_customer(&self, customer: Customer) {
        self.customers.write().await.push(customer);
    }

    /// Snapshot of every session created so far, oldest first.
    pub async fn sessions(&self) -> Vec<KioskSession> {
        self.sessions.read().await.clone()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn login(&self, email: &str, password_hash: &str) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .find(|account| account.email == email && account.password_hash == password_hash)
            .cloned())
    }

    async fn customer_by_cpf(&self, cpf: &str) -> Result<Option<Customer>> {
        Ok(self
            .customers
            .read()
            .await
            .iter()
            .find(|customer| customer.cpf == cpf)
            .cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl KioskSessionStore for MemoryStore {
    async fn create(
        &self,
        customer: Option<&Customer>,
        cpf: Option<&str>,
    ) -> Result<KioskSession> {
        let session = KioskSession {
            session_id: Uuid::new_v4(),
            customer_id: customer.map(|c| c.id),
            cpf: cpf.map(str::to_string),
            created_at: Utc::now(),
        };
        self.sessions.write().await.push(session.clone());
        Ok(session)
    }

    async fn by_id(&self, session_id: Uuid) -> Result<Option<KioskSession>> {
        Ok(self
            .sessions
            .read()
            .await
            .iter()
            .find(|session| session.session_id == session_id)
            .cloned())
    }

    async fn latest_for_cpf(&self, cpf: &str) -> Result<Option<KioskSession>> {
        // Later pushes win ties on created_at.
        Ok(self
            .sessions
            .read()
            .await
            .iter()
            .filter(|session| session.cpf.as_deref() == Some(cpf))
            .max_by_key(|session| session.created_at)
            .cloned())
    }
}
