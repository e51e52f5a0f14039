use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use uuid::Uuid;

use snapchef_auth_types::identity::Identity;
use snapchef_core::extract::AppJson;
use snapchef_domain::pagination::Page;
use snapchef_domain::recipe::RecipeStatus;

use crate::domain::types::Actor;
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::handlers::recipe::RecipeCardResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::moderation::{
    ModerateRecipeUseCase, ModerationQueueUseCase, SetUserActiveUseCase,
};

// ── GET /moderation/recipes ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct QueueQuery {
    pub status: Option<RecipeStatus>,
}

pub async fn list_queue(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<QueueQuery>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Page<RecipeCardResponse>>, ApiError> {
    let usecase = ModerationQueueUseCase {
        recipes: state.recipe_repo(),
    };
    let page = usecase
        .execute(
            Actor::from(&identity),
            query.status.unwrap_or(RecipeStatus::Pending),
            state.page(page.into()),
        )
        .await?;
    Ok(Json(page.map(RecipeCardResponse::from)))
}

// ── PATCH /moderation/recipes/{id} ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ModerateRecipeRequest {
    pub status: RecipeStatus,
}

#[derive(serde::Serialize)]
pub struct ModeratedRecipeResponse {
    pub id: Uuid,
    pub status: RecipeStatus,
}

pub async fn moderate_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
    AppJson(body): AppJson<ModerateRecipeRequest>,
) -> Result<Json<ModeratedRecipeResponse>, ApiError> {
    let usecase = ModerateRecipeUseCase {
        recipes: state.recipe_repo(),
        cache: state.recipe_cache(),
    };
    let recipe = usecase
        .execute(Actor::from(&identity), recipe_id, body.status)
        .await?;
    Ok(Json(ModeratedRecipeResponse {
        id: recipe.id,
        status: recipe.status,
    }))
}

// ── PATCH /moderation/users/{id} ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

pub async fn set_user_active(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    AppJson(body): AppJson<SetActiveRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = SetUserActiveUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(Actor::from(&identity), user_id, body.is_active)
        .await?;
    Ok(Json(user.into()))
}
