use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use snapchef_domain::pagination::Page;

use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::state::AppState;
use crate::usecase::ingredient::SearchIngredientsUseCase;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct IngredientResponse {
    pub id: Uuid,
    pub name: String,
}

// ── GET /ingredients ─────────────────────────────────────────────────────────

pub async fn search_ingredients(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Page<IngredientResponse>>, ApiError> {
    let usecase = SearchIngredientsUseCase {
        ingredients: state.ingredient_repo(),
    };
    let page = usecase
        .execute(query.q.as_deref(), state.page(page.into()))
        .await?;
    Ok(Json(page.map(|i| IngredientResponse {
        id: i.id,
        name: i.name,
    })))
}
