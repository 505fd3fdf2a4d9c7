//! HTTP handlers. Token endpoints answer with a JSON string body: the token on
//! success, a short message on rejection.

pub mod atendimento;
pub mod auth;
pub mod health;

use crate::auth::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidFormat => (StatusCode::BAD_REQUEST, "Formato de dados inválido."),
            Self::MissingField => (StatusCode::BAD_REQUEST, "Email e senha são obrigatórios."),
            Self::InvalidCpf => (StatusCode::BAD_REQUEST, "CPF inválido"),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Usuário não encontrado ou credenciais inválidas.",
            ),
            Self::Upstream(_) | Self::Token(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao processar a requisição.",
            ),
        };
        (status, Json(message)).into_response()
    }
}

/// Turn a flow result into the response the endpoints share.
pub(crate) fn token_response(result: Result<String, AuthError>) -> Response {
    match result {
        Ok(token) => (StatusCode::OK, Json(token)).into_response(),
        Err(err) => err.into_response(),
    }
}
