use super::token_response;
use crate::auth::Authenticator;
use axum::{
    extract::{Extension, Path},
    response::Response,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/auth/atendimento",
    responses(
        (status = 200, description = "Anonymous kiosk token", body = String, content_type = "application/json")
    ),
    tag = "auth"
)]
pub async fn anonymous(auth: Extension<Arc<Authenticator>>) -> Response {
    token_response(auth.identify(None).await)
}

#[utoipa::path(
    get,
    path = "/auth/atendimento/{cpf}",
    params(
        ("cpf" = String, Path, description = "CPF, punctuation allowed")
    ),
    responses(
        (status = 200, description = "Kiosk token bound to a new session", body = String, content_type = "application/json"),
        (status = 400, description = "Invalid CPF", body = String)
    ),
    tag = "auth"
)]
pub async fn by_cpf(auth: Extension<Arc<Authenticator>>, Path(cpf): Path<String>) -> Response {
    token_response(auth.identify(Some(&cpf)).await)
}
