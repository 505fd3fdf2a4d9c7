use super::handlers::{atendimento, auth, health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        atendimento::anonymous,
        atendimento::by_cpf,
        health::health,
    ),
    components(schemas(auth::LoginRequest, health::Health)),
    tags(
        (name = "auth", description = "Credential login and kiosk identification"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

/// `OpenAPI` document with Cargo metadata as the info block.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = env!("CARGO_PKG_NAME").to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc.info.description = Some(env!("CARGO_PKG_DESCRIPTION").to_string());
    doc
}
