use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use bursar::bursar_config::{CorsConfig, JwtConfig};
use bursar::bursar_db::{MemoryStore, Repository};
use bursar::bursar_models::{Account, NewAccount};
use bursar::router::init_router;
use bursar::state::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Minimum bcrypt cost keeps seeded logins fast; verification reads the cost
/// from the digest.
const TEST_BCRYPT_COST: u32 = 4;

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub jwt_config: JwtConfig,
}

pub fn setup_test_app() -> TestApp {
    let store = MemoryStore::new();
    let jwt_config = JwtConfig::new(TEST_JWT_SECRET, 30);
    let cors_config = CorsConfig {
        allowed_origins: vec!["http://localhost".to_string()],
    };
    let state = AppState::new(store.clone(), jwt_config.clone(), cors_config);

    TestApp {
        router: init_router(state),
        store,
        jwt_config,
    }
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Inserts an account directly, bypassing the registration flow.
#[allow(dead_code)]
pub async fn create_test_account(store: &MemoryStore, email: &str, password: &str) -> Account {
    let password_digest = bcrypt::hash(password, TEST_BCRYPT_COST).unwrap();
    Repository::<Account>::create(
        store,
        &NewAccount {
            full_name: "Test Account".to_string(),
            email: email.to_string(),
            password_digest,
        },
    )
    .await
    .unwrap()
}

/// Inserts `count` accounts with a placeholder digest, for listing tests.
#[allow(dead_code)]
pub async fn seed_accounts(store: &MemoryStore, count: usize) -> Vec<Account> {
    let mut accounts = Vec::with_capacity(count);
    for i in 1..=count {
        let account = Repository::<Account>::create(
            store,
            &NewAccount {
                full_name: format!("Account {i:02}"),
                email: format!("account-{i:02}@test.com"),
                password_digest: "not-a-real-digest".to_string(),
            },
        )
        .await
        .unwrap();
        accounts.push(account);
    }
    accounts
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn authed_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
