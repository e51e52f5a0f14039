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
use snapchef_domain::user::UserRole;

use crate::domain::types::{Actor, User, UserStats, UserSummary};
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::handlers::recipe::RecipeCardResponse;
use crate::state::AppState;
use crate::usecase::follow::{FollowDirection, FollowUseCase, ListFollowsUseCase, UnfollowUseCase};
use crate::usecase::user::{
    FeedUseCase, GetProfileUseCase, GetUserUseCase, LikedRecipesUseCase, ListUserRecipesUseCase,
    UpdateProfileInput, UpdateProfileUseCase,
};

/// The caller's own account, including private fields.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "snapchef_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "snapchef_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            role: user.role,
            avatar_url: user.avatar_url,
            bio: user.bio,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── PATCH /users/me ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

pub async fn update_me(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<UpdateMeRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
        recipes: state.recipe_repo(),
        cache: state.recipe_cache(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                username: body.username,
                avatar_url: body.avatar_url,
                bio: body.bio,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatsResponse {
    pub recipes: u64,
    pub followers: u64,
    pub following: u64,
}

impl From<UserStats> for StatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            recipes: stats.published_recipes,
            followers: stats.followers,
            following: stats.following,
        }
    }
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub stats: StatsResponse,
    #[serde(serialize_with = "snapchef_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let usecase = GetProfileUseCase {
        repo: state.user_repo(),
    };
    let (user, stats) = usecase.execute(user_id).await?;
    Ok(Json(ProfileResponse {
        id: user.id,
        username: user.username,
        role: user.role,
        avatar_url: user.avatar_url,
        bio: user.bio,
        stats: stats.into(),
        created_at: user.created_at,
    }))
}

// ── GET /users/{id}/recipes ──────────────────────────────────────────────────

pub async fn list_user_recipes(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Page<RecipeCardResponse>>, ApiError> {
    let usecase = ListUserRecipesUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
    };
    let page = usecase
        .execute(
            identity.as_ref().map(Actor::from),
            user_id,
            state.page(page.into()),
        )
        .await?;
    Ok(Json(page.map(RecipeCardResponse::from)))
}

// ── POST/DELETE /users/{id}/follow ───────────────────────────────────────────

pub async fn follow_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = FollowUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    usecase.execute(identity.user_id, user_id).await?;
    Ok(StatusCode::CREATED)
}

pub async fn unfollow_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = UnfollowUseCase {
        follows: state.follow_repo(),
    };
    usecase.execute(identity.user_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/{id}/followers, /users/{id}/following ─────────────────────────

async fn list_follows(
    state: AppState,
    user_id: Uuid,
    direction: FollowDirection,
    page: PageQuery,
) -> Result<Json<Page<UserSummary>>, ApiError> {
    let usecase = ListFollowsUseCase {
        users: state.user_repo(),
    };
    let page = usecase
        .execute(user_id, direction, state.page(page.into()))
        .await?;
    Ok(Json(page))
}

pub async fn list_followers(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Page<UserSummary>>, ApiError> {
    list_follows(state, user_id, FollowDirection::Followers, page).await
}

pub async fn list_following(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Page<UserSummary>>, ApiError> {
    list_follows(state, user_id, FollowDirection::Following, page).await
}

// ── GET /users/me/feed, /users/me/likes ──────────────────────────────────────

pub async fn my_feed(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Page<RecipeCardResponse>>, ApiError> {
    let usecase = FeedUseCase {
        recipes: state.recipe_repo(),
    };
    let page = usecase
        .execute(identity.user_id, state.page(page.into()))
        .await?;
    Ok(Json(page.map(RecipeCardResponse::from)))
}

pub async fn my_likes(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Page<RecipeCardResponse>>, ApiError> {
    let usecase = LikedRecipesUseCase {
        recipes: state.recipe_repo(),
    };
    let page = usecase
        .execute(identity.user_id, state.page(page.into()))
        .await?;
    Ok(Json(page.map(RecipeCardResponse::from)))
}
