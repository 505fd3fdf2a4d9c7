//! Postgres-backed stores (schema in `sql/schema.sql`).

use super::{AccountStore, KioskSessionStore};
use crate::auth::models::{Account, Customer, KioskSession, Profile};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    Connection, PgPool, Row,
};
use std::time::Duration;
use tracing::{info_span, Instrument, Span};
use uuid::Uuid;

fn query_span(operation: &str, statement: &str) -> Span {
    info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = operation,
        db.statement = statement
    )
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a small pool; the store does no pooling logic of its own.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await
            .context("Failed to connect to database")?;

        Ok(Self::new(pool))
    }
}

fn account_from_row(row: &PgRow) -> Result<Account> {
    let profile: String = row.try_get("profile")?;
    Ok(Account {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        profile: profile.parse::<Profile>().map_err(|e| anyhow!(e))?,
    })
}

fn session_from_row(row: &PgRow) -> Result<KioskSession> {
    Ok(KioskSession {
        session_id: row.try_get("session_id")?,
        customer_id: row.try_get("customer_id")?,
        cpf: row.try_get("cpf")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl AccountStore for PgStore {
    async fn login(&self, email: &str, password_hash: &str) -> Result<Option<Account>> {
        let query = r"
            SELECT id, name, email, password_hash, profile
            FROM accounts
            WHERE email = $1 AND password_hash = $2
        ";
        let row = sqlx::query(query)
            .bind(email)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .instrument(query_span("SELECT", query))
            .await
            .context("failed to lookup account")?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn customer_by_cpf(&self, cpf: &str) -> Result<Option<Customer>> {
        let query = r"
            SELECT c.id AS customer_id, c.cpf,
                   a.id, a.name, a.email, a.password_hash, a.profile
            FROM customers c
            JOIN accounts a ON a.id = c.account_id
            WHERE c.cpf = $1
        ";
        let row = sqlx::query(query)
            .bind(cpf)
            .fetch_optional(&self.pool)
            .instrument(query_span("SELECT", query))
            .await
            .context("failed to lookup customer by cpf")?;

        row.map(|row| {
            Ok(Customer {
                id: row.try_get("customer_id")?,
                cpf: row.try_get("cpf")?,
                account: account_from_row(&row)?,
            })
        })
        .transpose()
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self
            .pool
            .acquire()
            .instrument(info_span!(
                "db.acquire",
                db.system = "postgresql",
                db.operation = "ACQUIRE"
            ))
            .await
            .context("failed to acquire database connection")?;
        conn.ping()
            .instrument(info_span!(
                "db.ping",
                db.system = "postgresql",
                db.operation = "PING"
            ))
            .await
            .context("failed to ping database")
    }
}

#[async_trait]
impl KioskSessionStore for PgStore {
    async fn create(
        &self,
        customer: Option<&Customer>,
        cpf: Option<&str>,
    ) -> Result<KioskSession> {
        let query = r"
            INSERT INTO kiosk_sessions
                (session_id, customer_id, cpf)
            VALUES ($1, $2, $3)
            RETURNING session_id, customer_id, cpf, created_at
        ";
        let row = sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(customer.map(|c| c.id))
            .bind(cpf)
            .fetch_one(&self.pool)
            .instrument(query_span("INSERT", query))
            .await
            .context("failed to insert kiosk session")?;

        session_from_row(&row)
    }

    async fn by_id(&self, session_id: Uuid) -> Result<Option<KioskSession>> {
        let query = r"
            SELECT session_id, customer_id, cpf, created_at
            FROM kiosk_sessions
            WHERE session_id = $1
        ";
        let row = sqlx::query(query)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .instrument(query_span("SELECT", query))
            .await
            .context("failed to lookup kiosk session")?;

        row.as_ref().map(session_from_row).transpose()
    }

    async fn latest_for_cpf(&self, cpf: &str) -> Result<Option<KioskSession>> {
        let query = r"
            SELECT session_id, customer_id, cpf, created_at
            FROM kiosk_sessions
            WHERE cpf = $1
            ORDER BY created_at DESC
            LIMIT 1
        ";
        let row = sqlx::query(query)
            .bind(cpf)
            .fetch_optional(&self.pool)
            .instrument(query_span("SELECT", query))
            .await
            .context("failed to lookup latest kiosk session by cpf")?;

        row.as_ref().map(session_from_row).transpose()
    }
}
