use poem::{Result, web::Data};
use poem_openapi::{ApiResponse, Object, OpenApi, param::Path, payload::{Html, Json}};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use entity::memos;

use crate::api::error::ApiError;
use crate::api::session::SessionAuth;
use crate::templates::{MemosTemplate, render};

const MEMO_NOT_FOUND: &str = "Memo not found or not authorized";

// --- API Structs ---

#[derive(Object, Debug, Deserialize, Validate)]
pub struct MemoInput {
    #[validate(length(max = 100))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub content: String,
}

#[derive(Object, Serialize)]
pub struct MemoResponse {
    pub message: String,
    pub memo_id: i32,
}

#[derive(ApiResponse)]
enum CreateMemoResponse {
    #[oai(status = 201)]
    Created(Json<MemoResponse>),
}

// --- API Definition ---
pub struct MemoApi;

#[OpenApi]
impl MemoApi {
    #[oai(path = "/memos/create", method = "post")]
    async fn create_memo(
        &self,
        auth: SessionAuth,
        db: Data<&DatabaseConnection>,
        Json(payload): Json<MemoInput>,
    ) -> Result<CreateMemoResponse> {
        let user = auth.0;
        payload
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let new_memo = memos::ActiveModel {
            user_id: Set(user.id),
            title: Set(payload.title),
            content: Set(payload.content),
            ..Default::default()
        };
        let saved = new_memo.insert(db.0).await.map_err(ApiError::from)?;
        tracing::info!(user_id = user.id, memo_id = saved.id, "memo created");

        Ok(CreateMemoResponse::Created(Json(MemoResponse {
            message: "Memo created".to_string(),
            memo_id: saved.id,
        })))
    }

    /// Render the caller's memos
    #[oai(path = "/memos", method = "get")]
    async fn list_memos(
        &self,
        auth: SessionAuth,
        db: Data<&DatabaseConnection>,
    ) -> Result<Html<String>> {
        let user = auth.0;
        let memos = memos::Entity::find()
            .filter(memos::Column::UserId.eq(user.id))
            .order_by_asc(memos::Column::Id)
            .all(db.0)
            .await
            .map_err(ApiError::from)?;

        let page = MemosTemplate {
            username: user.username,
            memos,
        };
        Ok(Html(render(&page)?))
    }

    #[oai(path = "/memos/update/:id", method = "put")]
    async fn update_memo(
        &self,
        auth: SessionAuth,
        db: Data<&DatabaseConnection>,
        Path(id): Path<i32>,
        Json(payload): Json<MemoInput>,
    ) -> Result<Json<MemoResponse>> {
        let user = auth.0;
        payload
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        // only the caller's own memo is selected
        let memo = memos::Entity::find_by_id(id)
            .filter(memos::Column::UserId.eq(user.id))
            .one(db.0)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::NotFound(MEMO_NOT_FOUND.to_string()))?;

        let mut active_memo: memos::ActiveModel = memo.into();
        active_memo.title = Set(payload.title);
        active_memo.content = Set(payload.content);
        let updated = active_memo.update(db.0).await.map_err(ApiError::from)?;
        tracing::info!(user_id = user.id, memo_id = updated.id, "memo updated");

        Ok(Json(MemoResponse {
            message: "Memo updated".to_string(),
            memo_id: updated.id,
        }))
    }

    #[oai(path = "/memos/delete/:id", method = "delete")]
    async fn delete_memo(
        &self,
        auth: SessionAuth,
        db: Data<&DatabaseConnection>,
        Path(id): Path<i32>,
    ) -> Result<Json<MemoResponse>> {
        let user = auth.0;
        let result = memos::Entity::delete_many()
            .filter(memos::Column::Id.eq(id))
            .filter(memos::Column::UserId.eq(user.id))
            .exec(db.0)
            .await
            .map_err(ApiError::from)?;

        if result.rows_affected == 0 {
            return Err(ApiError::NotFound(MEMO_NOT_FOUND.to_string()).into());
        }
        tracing::info!(user_id = user.id, memo_id = id, "memo deleted");

        Ok(Json(MemoResponse {
            message: "Memo deleted".to_string(),
            memo_id: id,
        }))
    }
}
