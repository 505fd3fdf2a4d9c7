use super::token_response;
use crate::auth::Authenticator;
use axum::{body::Bytes, extract::Extension, response::Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Documented login body. Property names match case-insensitively.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    email: String,
    senha: String,
}

#[utoipa::path(
    post,
    path = "/auth",
    request_body(content = LoginRequest, content_type = "application/json", description = "Account email and password"),
    responses(
        (status = 200, description = "Authenticated, body is the access token", body = String, content_type = "application/json"),
        (status = 400, description = "Malformed body or missing email/password", body = String),
        (status = 401, description = "Account not found or invalid credentials", body = String)
    ),
    tag = "auth"
)]
// The body is read raw: any content type is accepted as long as it parses as JSON.
pub async fn login(auth: Extension<Arc<Authenticator>>, body: Bytes) -> Response {
    token_response(auth.login(&body).await)
}
