#![allow(dead_code)]

use memo_server::{build_app, config::AuthSettings, db};
use poem::{Endpoint, http::header, test::{TestClient, TestResponse}};
use sea_orm::DbConn;

pub struct TestContext<E> {
    pub client: TestClient<E>,
    pub db: DbConn,
}

pub fn test_settings() -> AuthSettings {
    AuthSettings {
        secret_key: "test-secret".to_string(),
        bcrypt_cost: 4,
        session_ttl_hours: 24,
    }
}

pub async fn test_context() -> TestContext<impl Endpoint> {
    let db = db::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    TestContext {
        client: TestClient::new(build_app(db.clone(), test_settings())),
        db,
    }
}

pub async fn signup<E: Endpoint>(
    client: &TestClient<E>,
    username: &str,
    email: &str,
    password: &str,
) -> TestResponse {
    client
        .post("/signup")
        .form(&[("username", username), ("email", email), ("password", password)])
        .send()
        .await
}

pub async fn login<E: Endpoint>(client: &TestClient<E>, username: &str, password: &str) -> TestResponse {
    client
        .post("/login")
        .form(&[("username", username), ("password", password)])
        .send()
        .await
}

/// `name=value` part of the response's `Set-Cookie` header.
pub fn session_cookie_of(resp: &TestResponse) -> String {
    resp.0
        .headers()
        .get(header::SET_COOKIE)
        .expect("response has no Set-Cookie header")
        .to_str()
        .expect("Set-Cookie is not ascii")
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Signs a user up, logs in, and returns the cookie to send back.
pub async fn logged_in_user<E: Endpoint>(client: &TestClient<E>, username: &str) -> String {
    let email = format!("{}@example.com", username);
    signup(client, username, &email, "password123")
        .await
        .assert_status(poem::http::StatusCode::CREATED);

    let resp = login(client, username, "password123").await;
    resp.assert_status_is_ok();
    session_cookie_of(&resp)
}

pub async fn create_memo<E: Endpoint>(
    client: &TestClient<E>,
    cookie: &str,
    title: &str,
    content: &str,
) -> i64 {
    let resp = client
        .post("/memos/create")
        .header(header::COOKIE, cookie)
        .body_json(&serde_json::json!({ "title": title, "content": content }))
        .send()
        .await;
    resp.assert_status(poem::http::StatusCode::CREATED);
    resp.json().await.value().object().get("memo_id").i64()
}

pub async fn body_text(resp: TestResponse) -> String {
    resp.0
        .into_body()
        .into_string()
        .await
        .expect("body is not utf-8")
}
