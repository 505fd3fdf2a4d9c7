#![allow(clippy::unwrap_used, clippy::expect_used)]

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use fastfood_auth::{
    api,
    auth::{password, token, AuthConfig, Authenticator, Account, Customer, Profile, Role},
    store::MemoryStore,
};
use secrecy::SecretString;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const PASSWORD_KEY: &str = "pepper-key";
const SIGNING_KEY: &str = "signing-key-for-tests-0123456789";
const CUSTOMER_CPF: &str = "52998224725";

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
    staff: Account,
    customer: Customer,
}

async fn test_app() -> Result<TestApp> {
    let store = Arc::new(MemoryStore::new());

    let staff = Account {
        id: Uuid::new_v4(),
        name: "Gerente".to_string(),
        email: "gerente@fastfood.dev".to_string(),
        password_hash: password::hash("senha123", PASSWORD_KEY)?,
        profile: Profile::Staff,
    };
    store.insert_account(staff.clone()).await;

    let customer_account = Account {
        id: Uuid::new_v4(),
        name: "Maria".to_string(),
        email: "maria@example.com".to_string(),
        password_hash: password::hash("segredo", PASSWORD_KEY)?,
        profile: Profile::Customer,
    };
    store.insert_account(customer_account.clone()).await;

    let customer = Customer {
        id: Uuid::new_v4(),
        cpf: CUSTOMER_CPF.to_string(),
        account: customer_account,
    };
    store.insert_customer(customer.clone()).await;

    let config = AuthConfig::new(
        SecretString::from(PASSWORD_KEY.to_string()),
        SecretString::from(SIGNING_KEY.to_string()),
    )?;
    let authenticator = Authenticator::new(&config, store.clone(), store.clone())?;

    Ok(TestApp {
        router: api::router(Arc::new(authenticator)),
        store,
        staff,
        customer,
    })
}

async fn send(router: &Router, request: Request<Body>) -> Result<(StatusCode, Vec<u8>)> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, body.to_vec()))
}

fn post_auth(body: &str) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method(Method::POST)
        .uri("/auth")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?)
}

fn get(uri: &str) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())?)
}

fn json_string(body: &[u8]) -> String {
    serde_json::from_slice::<String>(body).expect("body should be a JSON string")
}

fn claims_of(token: &str) -> Value {
    let claims = token::decode_unverified(token).expect("token should decode");
    serde_json::to_value(claims).expect("claims should serialize")
}

#[tokio::test]
async fn login_with_empty_password_is_rejected() -> Result<()> {
    let app = test_app().await?;

    let (status, body) = send(
        &app.router,
        post_auth(r#"{"Email":"gerente@fastfood.dev","Senha":""}"#)?,
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_string(&body), "Email e senha são obrigatórios.");
    Ok(())
}

#[tokio::test]
async fn login_with_malformed_body_is_rejected() -> Result<()> {
    let app = test_app().await?;

    let (status, body) = send(&app.router, post_auth("{not json")?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_string(&body), "Formato de dados inválido.");
    Ok(())
}

#[tokio::test]
async fn login_with_unknown_email_is_unauthorized() -> Result<()> {
    let app = test_app().await?;

    let (status, body) = send(
        &app.router,
        post_auth(r#"{"Email":"ninguem@fastfood.dev","Senha":"senha123"}"#)?,
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_string(&body),
        "Usuário não encontrado ou credenciais inválidas."
    );
    Ok(())
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() -> Result<()> {
    let app = test_app().await?;

    let (status, _) = send(
        &app.router,
        post_auth(r#"{"email":"gerente@fastfood.dev","senha":"errada"}"#)?,
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn staff_login_issues_account_token() -> Result<()> {
    let app = test_app().await?;

    let (status, body) = send(
        &app.router,
        post_auth(r#"{"Email":"gerente@fastfood.dev","Senha":"senha123"}"#)?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let token = json_string(&body);
    assert_eq!(token.split('.').count(), 3);

    let claims = claims_of(&token);
    assert_eq!(claims["name"], "Gerente");
    assert_eq!(claims["email"], "gerente@fastfood.dev");
    assert_eq!(claims["sub"], app.staff.id.to_string());
    assert_eq!(claims["role"], Role::Administrador.as_str());
    assert!(claims.get("TokenAtendimento").is_none());

    let exp = claims["exp"].as_i64().expect("exp");
    let iat = claims["iat"].as_i64().expect("iat");
    assert_eq!(exp - iat, token::TOKEN_TTL_SECONDS);
    assert_eq!(claims["nbf"].as_i64(), Some(iat));
    Ok(())
}

#[tokio::test]
async fn anonymous_kiosk_token() -> Result<()> {
    let app = test_app().await?;

    for uri in ["/auth/atendimento", "/auth/atendimento/"] {
        let (status, body) = send(&app.router, get(uri)?).await?;
        assert_eq!(status, StatusCode::OK, "{uri}");

        let claims = claims_of(&json_string(&body));
        assert_eq!(claims["role"], Role::IdentificacaoTotem.as_str());
        assert!(claims["TokenAtendimento"].is_string());
        assert!(claims.get("name").is_none());
        assert!(claims.get("email").is_none());
    }

    let sessions = app.store.sessions().await;
    assert_eq!(sessions.len(), 2);
    assert!(sessions.iter().all(|s| s.cpf.is_none() && s.customer_id.is_none()));
    Ok(())
}

#[tokio::test]
async fn invalid_cpf_is_rejected() -> Result<()> {
    let app = test_app().await?;

    let (status, body) = send(&app.router, get("/auth/atendimento/123")?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_string(&body), "CPF inválido");
    assert!(app.store.sessions().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn known_customer_gets_linked_kiosk_token() -> Result<()> {
    let app = test_app().await?;

    let (status, body) = send(&app.router, get("/auth/atendimento/529.982.247-25")?).await?;
    assert_eq!(status, StatusCode::OK);

    let claims = claims_of(&json_string(&body));
    assert_eq!(claims["name"], "Maria");
    assert_eq!(claims["email"], "maria@example.com");
    assert_eq!(claims["sub"], app.customer.account.id.to_string());
    assert_eq!(claims["role"], Role::IdentificacaoTotem.as_str());

    let sessions = app.store.sessions().await;
    assert_eq!(sessions.len(), 1);
    assert_eq!(claims["TokenAtendimento"], sessions[0].session_id.to_string());
    assert_eq!(sessions[0].customer_id, Some(app.customer.id));
    assert_eq!(sessions[0].cpf.as_deref(), Some(CUSTOMER_CPF));
    Ok(())
}

#[tokio::test]
async fn unknown_customer_gets_fresh_session() -> Result<()> {
    let app = test_app().await?;

    let (status, body) = send(&app.router, get("/auth/atendimento/11144477735")?).await?;
    assert_eq!(status, StatusCode::OK);

    let claims = claims_of(&json_string(&body));
    assert_eq!(claims["role"], Role::IdentificacaoTotem.as_str());
    assert!(claims.get("name").is_none());

    let sessions = app.store.sessions().await;
    assert_eq!(sessions.len(), 1);
    assert_eq!(claims["TokenAtendimento"], sessions[0].session_id.to_string());
    assert_eq!(sessions[0].customer_id, None);
    assert_eq!(sessions[0].cpf.as_deref(), Some("11144477735"));
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let app = test_app().await?;

    let (status, body) = send(&app.router, get("/health")?).await?;

    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_slice(&body)?;
    assert_eq!(health["database"], "ok");
    assert_eq!(health["name"], env!("CARGO_PKG_NAME"));
    Ok(())
}

#[tokio::test]
async fn responses_carry_request_id() -> Result<()> {
    let app = test_app().await?;

    let response = app
        .router
        .clone()
        .oneshot(get("/auth/atendimento")?)
        .await?;

    assert!(response.headers().contains_key(api::REQUEST_ID_HEADER));
    Ok(())
}
