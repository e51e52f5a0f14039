use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use snapchef_auth_types::identity::{Identity, MaybeIdentity};
use snapchef_core::extract::AppJson;
use snapchef_domain::pagination::Page;

use crate::domain::types::{Actor, CommentChanges, CommentWithAuthor, UserSummary};
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::state::AppState;
use crate::usecase::comment::{
    CreateCommentInput, CreateCommentUseCase, DeleteCommentUseCase, ListCommentsUseCase,
    UpdateCommentUseCase,
};

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub content: String,
    pub rating: i16,
    pub author: UserSummary,
    #[serde(serialize_with = "snapchef_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "snapchef_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(c: CommentWithAuthor) -> Self {
        Self {
            id: c.comment.id,
            recipe_id: c.comment.recipe_id,
            content: c.comment.content,
            rating: c.comment.rating,
            author: c.author,
            created_at: c.comment.created_at,
            updated_at: c.comment.updated_at,
        }
    }
}

// ── GET /recipes/{id}/comments ───────────────────────────────────────────────

pub async fn list_comments(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Page<CommentResponse>>, ApiError> {
    let usecase = ListCommentsUseCase {
        recipes: state.recipe_repo(),
        comments: state.comment_repo(),
    };
    let page = usecase
        .execute(
            identity.as_ref().map(Actor::from),
            recipe_id,
            state.page(page.into()),
        )
        .await?;
    Ok(Json(page.map(CommentResponse::from)))
}

// ── POST /recipes/{id}/comments ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub rating: i16,
}

pub async fn create_comment(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
    AppJson(body): AppJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let usecase = CreateCommentUseCase {
        recipes: state.recipe_repo(),
        comments: state.comment_repo(),
        cache: state.recipe_cache(),
    };
    let comment = usecase
        .execute(
            Actor::from(&identity),
            recipe_id,
            CreateCommentInput {
                content: body.content,
                rating: body.rating,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

// ── PATCH /recipes/{id}/comments/{comment_id} ────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
    pub rating: Option<i16>,
}

pub async fn update_comment(
    identity: Identity,
    State(state): State<AppState>,
    Path((recipe_id, comment_id)): Path<(Uuid, Uuid)>,
    AppJson(body): AppJson<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let usecase = UpdateCommentUseCase {
        comments: state.comment_repo(),
        cache: state.recipe_cache(),
    };
    let comment = usecase
        .execute(
            Actor::from(&identity),
            recipe_id,
            comment_id,
            CommentChanges {
                content: body.content,
                rating: body.rating,
            },
        )
        .await?;
    Ok(Json(comment.into()))
}

// ── DELETE /recipes/{id}/comments/{comment_id} ───────────────────────────────

pub async fn delete_comment(
    identity: Identity,
    State(state): State<AppState>,
    Path((recipe_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteCommentUseCase {
        recipes: state.recipe_repo(),
        comments: state.comment_repo(),
        cache: state.recipe_cache(),
    };
    usecase
        .execute(Actor::from(&identity), recipe_id, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
