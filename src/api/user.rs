use chrono::Utc;
use poem::{Result, web::Data};
use poem_openapi::{ApiResponse, Object, OpenApi, payload::{Form, Html, Json}};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr};
use serde::{Deserialize, Serialize};
use validator::Validate;

use entity::users::{self, Entity as Users};

use crate::api::error::ApiError;
use crate::api::session;
use crate::config::AuthSettings;
use crate::templates::{LoginTemplate, render};

const DUPLICATE_USER: &str = "Username or email is already in use.";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

// --- API Structs ---

#[derive(Object, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, max = 100))]
    username: String,
    #[validate(length(min = 1, max = 100))]
    email: String,
    #[validate(length(min = 1))]
    password: String,
}

#[derive(Object, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Object, Serialize)]
pub struct MessageResponse {
    message: String,
}

#[derive(ApiResponse)]
enum SignupResponse {
    #[oai(status = 201)]
    Created(Json<MessageResponse>),
}

#[derive(ApiResponse)]
enum LoginResponse {
    #[oai(status = 200)]
    Ok(Json<MessageResponse>, #[oai(header = "Set-Cookie")] String),
}

#[derive(ApiResponse)]
enum RedirectResponse {
    #[oai(status = 302)]
    Found(#[oai(header = "Location")] String),
}

#[derive(ApiResponse)]
enum LogoutResponse {
    #[oai(status = 302)]
    Found(
        #[oai(header = "Location")] String,
        #[oai(header = "Set-Cookie")] String,
    ),
}

pub struct UserApi;

#[OpenApi]
impl UserApi {
    /// Signup page is not served; send the browser home.
    #[oai(path = "/signup", method = "get")]
    async fn signup_page(&self) -> RedirectResponse {
        RedirectResponse::Found("/".to_string())
    }

    /// Register a new user
    #[oai(path = "/signup", method = "post")]
    async fn signup(
        &self,
        db: Data<&DatabaseConnection>,
        settings: Data<&AuthSettings>,
        Form(form): Form<SignupForm>,
    ) -> Result<SignupResponse> {
        form.validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let existing_user = Users::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(form.username.clone()))
                    .add(users::Column::Email.eq(form.email.clone())),
            )
            .one(db.0)
            .await
            .map_err(ApiError::from)?;

        if existing_user.is_some() {
            return Err(ApiError::BadRequest(DUPLICATE_USER.to_string()).into());
        }

        let password_hash =
            session::hash_password_blocking(form.password, settings.bcrypt_cost).await?;

        let user = users::ActiveModel {
            username: Set(form.username),
            email: Set(form.email),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let saved = user.insert(db.0).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ApiError::BadRequest(DUPLICATE_USER.to_string())
            }
            _ => ApiError::from(e),
        })?;
        tracing::info!(user_id = saved.id, "user signed up");

        Ok(SignupResponse::Created(Json(MessageResponse {
            message: "Signup succeeded. You can log in with your username and password."
                .to_string(),
        })))
    }

    #[oai(path = "/login", method = "get")]
    async fn login_page(&self) -> Result<Html<String>> {
        Ok(Html(render(&LoginTemplate)?))
    }

    /// Start a session for valid credentials
    #[oai(path = "/login", method = "post")]
    async fn login(
        &self,
        db: Data<&DatabaseConnection>,
        settings: Data<&AuthSettings>,
        Form(form): Form<LoginForm>,
    ) -> Result<LoginResponse> {
        let user = Users::find()
            .filter(users::Column::Username.eq(form.username))
            .one(db.0)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !session::verify_password_blocking(form.password, user.password_hash.clone()).await {
            tracing::info!(user_id = user.id, "login rejected");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
        }

        let token = session::issue_token(&user, settings.0)?;
        tracing::info!(user_id = user.id, "user logged in");

        Ok(LoginResponse::Ok(
            Json(MessageResponse {
                message: "Logged in successfully".to_string(),
            }),
            session::session_cookie(&token, settings.0),
        ))
    }

    /// End the session and go back home
    #[oai(path = "/logout", method = "get")]
    async fn logout(&self) -> LogoutResponse {
        tracing::debug!("clearing session cookie");
        LogoutResponse::Found("/".to_string(), session::expired_session_cookie())
    }
}
