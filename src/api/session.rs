use std::time::Duration as StdDuration;

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use poem::{Request, web::cookie::{Cookie, SameSite}};
use poem_openapi::{SecurityScheme, auth::ApiKey};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};

use entity::users;

use crate::api::error::ApiError;
use crate::config::{AuthSettings, MAX_SESSION_TTL_HOURS};

// must match `key_name` on `SessionAuth`
pub const SESSION_COOKIE: &str = "memo_session";

// --- JWT Claims ---
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: usize,
}

/// Cookie-carried login session; resolves to the logged-in user row.
/// `key_name` is the `SESSION_COOKIE` name written by `session_cookie`.
#[derive(SecurityScheme)]
#[oai(
    ty = "api_key",
    key_name = "memo_session",
    key_in = "cookie",
    checker = "session_checker"
)]
pub struct SessionAuth(pub users::Model);

async fn session_checker(req: &Request, api_key: ApiKey) -> Option<users::Model> {
    let settings = req.data::<AuthSettings>()?;
    let db = req.data::<DatabaseConnection>()?;

    let claims = match validate_token(&api_key.key, &settings.secret_key) {
        Ok(claims) => claims,
        Err(msg) => {
            tracing::debug!("rejected session: {}", msg);
            return None;
        }
    };
    let user_id: i32 = claims.sub.parse().ok()?;

    match users::Entity::find_by_id(user_id).one(db).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Database error while fetching user: {:?}", e);
            None
        }
    }
}

pub fn issue_token(user: &users::Model, settings: &AuthSettings) -> Result<String, ApiError> {
    let expiration = TimeDelta::try_hours(settings.session_ttl_hours)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| ApiError::Internal("Failed to calculate token expiration".to_string()))?
        .timestamp();

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret_key.as_ref()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to create token: {}", e)))
}

pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| "Invalid or expired token".to_string())
}

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(token: &str, settings: &AuthSettings) -> String {
    let hours = settings.session_ttl_hours.clamp(0, MAX_SESSION_TTL_HOURS) as u64;
    let ttl = StdDuration::from_secs(hours.saturating_mul(3600));
    build_cookie(token, ttl)
}

/// `Set-Cookie` value that makes the browser drop the session.
pub fn expired_session_cookie() -> String {
    build_cookie("", StdDuration::ZERO)
}

fn build_cookie(value: &str, max_age: StdDuration) -> String {
    let mut cookie = Cookie::new_with_str(SESSION_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(max_age);
    cookie.to_string()
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    bcrypt::hash(password, cost)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

/// Runs `hash_password` on the blocking pool.
pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| ApiError::Internal(format!("password hashing task failed: {}", e)))?
}

/// Runs `verify_password` on the blocking pool; a failed task counts as a mismatch.
pub async fn verify_password_blocking(password: String, password_hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .unwrap_or(false)
}
