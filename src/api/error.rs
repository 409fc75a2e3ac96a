use poem::{Response, error::ResponseError, http::StatusCode};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ResponseError for ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn as_response(&self) -> Response
    where
        Self: std::error::Error + Send + Sync + 'static,
    {
        let message = match self {
            Self::BadRequest(msg) | Self::Unauthorized(msg) | Self::NotFound(msg) => msg.as_str(),
            Self::Database(e) => {
                tracing::error!("database error: {:?}", e);
                "Internal server error"
            }
            Self::Internal(e) => {
                tracing::error!("internal error: {}", e);
                "Internal server error"
            }
        };
        let body = serde_json::to_string(&ErrorBody { error: message })
            .unwrap_or_else(|_| r#"{"error":"Internal server error"}"#.to_string());

        Response::builder()
            .status(self.status())
            .content_type("application/json; charset=utf-8")
            .body(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn not_found_renders_json_message() {
        let resp = ApiError::NotFound("Memo not found or not authorized".into()).as_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = resp.into_body().into_string().await.unwrap();
        assert_eq!(body, r#"{"error":"Memo not found or not authorized"}"#);
    }

    #[tokio::test]
    async fn database_errors_are_masked() {
        let resp = ApiError::from(DbErr::Custom("connection refused".into())).as_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = resp.into_body().into_string().await.unwrap();
        assert_eq!(body, r#"{"error":"Internal server error"}"#);
    }
}
