//! # FastFood Auth (access tokens for ordering terminals and staff)
//!
//! `fastfood-auth` issues signed, time-limited access tokens for the fast-food
//! ordering platform. Every token carries exactly one of three identity shapes.
//!
//! ## Login Modes
//!
//! - **Credential login** (`POST /auth`): email + password. The password is
//!   hashed with a shared HMAC key and compared against the stored hash. Staff
//!   accounts receive the `Administrador` role, customers `Cliente`.
//! - **Kiosk identification by CPF** (`GET /auth/atendimento/{cpf}`): the CPF
//!   is checksum-validated, a kiosk session is recorded and the token carries
//!   the session id (`TokenAtendimento`) with the `IdentificacaoTotem` role.
//! - **Anonymous kiosk** (`GET /auth/atendimento`): no CPF, a bare session.
//!
//! ## Tokens
//!
//! Tokens are compact JWTs signed with HMAC-SHA256 and expire exactly two hours
//! after issuance. They are never persisted; downstream services verify them by
//! signature alone.

pub mod api;
pub mod auth;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
