//! Records read from (or created through) the stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Account profile; decides the role embedded in credential-login tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Staff,
    Customer,
}

impl Profile {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "staff" => Ok(Self::Staff),
            "customer" => Ok(Self::Customer),
            other => Err(format!("unknown profile: {other}")),
        }
    }
}

/// Stored account, read-only to the token core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile: Profile,
}

/// Customer record found by CPF, together with the account it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Customer {
    pub id: Uuid,
    pub cpf: String,
    pub account: Account,
}

/// Kiosk (atendimento) session. Created once, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KioskSession {
    pub session_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub cpf: Option<String>,
    pub created_at: DateTime<Utc>,
}
