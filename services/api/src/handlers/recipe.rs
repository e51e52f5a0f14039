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
use snapchef_domain::recipe::{RecipeSort, RecipeStatus};

use crate::domain::types::{
    Actor, IngredientLine, Recipe, RecipeCard, RecipeDetail, RecipeFilter, Step, UserSummary,
};
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    ListRecipesUseCase, UpdateRecipeInput, UpdateRecipeUseCase,
};

// ── Responses ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RecipeCardResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub cooking_time: i32,
    pub servings: i32,
    pub thumbnail_url: Option<String>,
    pub status: RecipeStatus,
    pub author: UserSummary,
    #[serde(serialize_with = "snapchef_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "snapchef_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl RecipeCardResponse {
    fn new(recipe: Recipe, author: UserSummary) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            cooking_time: recipe.cooking_time,
            servings: recipe.servings,
            thumbnail_url: recipe.thumbnail_url,
            status: recipe.status,
            author,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

impl From<RecipeCard> for RecipeCardResponse {
    fn from(card: RecipeCard) -> Self {
        Self::new(card.recipe, card.author)
    }
}

#[derive(Serialize)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub recipe: RecipeCardResponse,
    pub steps: Vec<Step>,
    pub ingredients: Vec<IngredientLine>,
    pub like_count: u64,
    pub comment_count: u64,
    pub avg_rating: Option<f64>,
}

impl From<RecipeDetail> for RecipeDetailResponse {
    fn from(detail: RecipeDetail) -> Self {
        Self {
            recipe: RecipeCardResponse::new(detail.recipe, detail.author),
            steps: detail.steps,
            ingredients: detail.ingredients,
            like_count: detail.like_count,
            comment_count: detail.comment_count,
            avg_rating: detail.avg_rating,
        }
    }
}

// ── Requests ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StepRequest {
    pub order_index: i32,
    pub content: String,
    pub image_url: Option<String>,
}

impl From<StepRequest> for Step {
    fn from(s: StepRequest) -> Self {
        Step {
            order_index: s.order_index,
            content: s.content,
            image_url: s.image_url,
        }
    }
}

#[derive(Deserialize)]
pub struct IngredientRequest {
    pub name: String,
    pub quantity: String,
    pub unit: Option<String>,
}

impl From<IngredientRequest> for IngredientLine {
    fn from(i: IngredientRequest) -> Self {
        IngredientLine {
            name: i.name,
            quantity: i.quantity,
            unit: i.unit,
        }
    }
}

fn into_steps(steps: Vec<StepRequest>) -> Vec<Step> {
    steps.into_iter().map(Step::from).collect()
}

fn into_lines(lines: Vec<IngredientRequest>) -> Vec<IngredientLine> {
    lines.into_iter().map(IngredientLine::from).collect()
}

// ── POST /recipes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: Option<String>,
    pub cooking_time: i32,
    pub servings: i32,
    pub thumbnail_url: Option<String>,
    pub status: Option<RecipeStatus>,
    pub steps: Vec<StepRequest>,
    #[serde(default)]
    pub ingredients: Vec<IngredientRequest>,
}

pub async fn create_recipe(
    identity: Identity,
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetailResponse>), ApiError> {
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    let detail = usecase
        .execute(
            Actor::from(&identity),
            CreateRecipeInput {
                title: body.title,
                description: body.description,
                cooking_time: body.cooking_time,
                servings: body.servings,
                thumbnail_url: body.thumbnail_url,
                status: body.status,
                steps: into_steps(body.steps),
                ingredients: into_lines(body.ingredients),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListRecipesQuery {
    pub q: Option<String>,
    pub author_id: Option<Uuid>,
    pub ingredient: Option<String>,
    pub sort: Option<String>,
}

pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<ListRecipesQuery>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Page<RecipeCardResponse>>, ApiError> {
    let sort = match query.sort.as_deref() {
        None | Some("") => RecipeSort::default(),
        Some(s) => RecipeSort::from_query(s).ok_or_else(|| {
            ApiError::validation("sort must be one of newest, oldest, quickest, random")
        })?,
    };
    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
    };
    let page = usecase
        .execute(
            RecipeFilter {
                q: query.q,
                author_id: query.author_id,
                ingredient: query.ingredient,
                sort,
            },
            state.page(page.into()),
        )
        .await?;
    Ok(Json(page.map(RecipeCardResponse::from)))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        cache: state.recipe_cache(),
    };
    let detail = usecase
        .execute(identity.as_ref().map(Actor::from), recipe_id)
        .await?;
    Ok(Json(detail.into()))
}

// ── PATCH /recipes/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cooking_time: Option<i32>,
    pub servings: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub status: Option<RecipeStatus>,
    pub steps: Option<Vec<StepRequest>>,
    pub ingredients: Option<Vec<IngredientRequest>>,
}

pub async fn update_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
    AppJson(body): AppJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        cache: state.recipe_cache(),
    };
    let detail = usecase
        .execute(
            Actor::from(&identity),
            recipe_id,
            UpdateRecipeInput {
                title: body.title,
                description: body.description,
                cooking_time: body.cooking_time,
                servings: body.servings,
                thumbnail_url: body.thumbnail_url,
                status: body.status,
                steps: body.steps.map(into_steps),
                ingredients: body.ingredients.map(into_lines),
            },
        )
        .await?;
    Ok(Json(detail.into()))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
        cache: state.recipe_cache(),
    };
    usecase
        .execute(Actor::from(&identity), recipe_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
