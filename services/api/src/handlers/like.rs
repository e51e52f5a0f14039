use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use snapchef_auth_types::identity::Identity;

use crate::domain::types::Actor;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::like::{LikeRecipeUseCase, UnlikeRecipeUseCase};

// ── POST /recipes/{id}/like ──────────────────────────────────────────────────

pub async fn like_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = LikeRecipeUseCase {
        recipes: state.recipe_repo(),
        likes: state.like_repo(),
        cache: state.recipe_cache(),
    };
    usecase
        .execute(Actor::from(&identity), recipe_id)
        .await?;
    Ok(StatusCode::CREATED)
}

// ── DELETE /recipes/{id}/like ────────────────────────────────────────────────

pub async fn unlike_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = UnlikeRecipeUseCase {
        likes: state.like_repo(),
        cache: state.recipe_cache(),
    };
    usecase
        .execute(Actor::from(&identity), recipe_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
