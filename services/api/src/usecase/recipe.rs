use chrono::Utc;
use uuid::Uuid;

use snapchef_domain::pagination::{Page, PageRequest};
use snapchef_domain::recipe::RecipeStatus;

use crate::domain::repository::{RecipeCache, RecipeRepository};
use crate::domain::types::{
    Actor, IngredientLine, NewRecipe, Recipe, RecipeCard, RecipeChanges, RecipeDetail,
    RecipeFilter, Step,
};
use crate::domain::validation::{self, DESCRIPTION_MAX_LEN, URL_MAX_LEN};
use crate::error::ApiError;

/// Load a recipe the actor may see. Hidden recipes look missing.
pub(crate) async fn find_visible<R: RecipeRepository>(
    recipes: &R,
    actor: Option<&Actor>,
    recipe_id: Uuid,
) -> Result<Recipe, ApiError> {
    recipes
        .find_by_id(recipe_id)
        .await?
        .filter(|r| r.is_visible_to(actor))
        .ok_or(ApiError::RecipeNotFound)
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeInput {
    pub title: String,
    pub description: Option<String>,
    pub cooking_time: i32,
    pub servings: i32,
    pub thumbnail_url: Option<String>,
    pub status: Option<RecipeStatus>,
    pub steps: Vec<Step>,
    pub ingredients: Vec<IngredientLine>,
}

pub struct CreateRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> CreateRecipeUseCase<R> {
    pub async fn execute(
        &self,
        actor: Actor,
        input: CreateRecipeInput,
    ) -> Result<RecipeDetail, ApiError> {
        let status = input.status.unwrap_or(RecipeStatus::Draft);
        if !status.allowed_on_create() {
            return Err(ApiError::validation(
                "status must be DRAFT or PENDING when creating a recipe",
            ));
        }
        let now = Utc::now();
        let new = NewRecipe {
            recipe: Recipe {
                id: Uuid::now_v7(),
                author_id: actor.user_id,
                title: validation::title(&input.title)?,
                description: validation::optional_text(
                    "description",
                    input.description.as_deref(),
                    DESCRIPTION_MAX_LEN,
                )?,
                cooking_time: validation::cooking_time(input.cooking_time)?,
                servings: validation::servings(input.servings)?,
                thumbnail_url: validation::optional_text(
                    "thumbnail_url",
                    input.thumbnail_url.as_deref(),
                    URL_MAX_LEN,
                )?,
                status,
                created_at: now,
                updated_at: now,
            },
            steps: validation::steps(input.steps)?,
            ingredients: validation::ingredients(input.ingredients)?,
        };
        self.recipes.create(&new).await?;
        tracing::info!(recipe_id = %new.recipe.id, author_id = %actor.user_id, "recipe created");

        self.recipes
            .find_detail(new.recipe.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("recipe {} missing after create", new.recipe.id).into())
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository, C: RecipeCache> {
    pub recipes: R,
    pub cache: C,
}

impl<R: RecipeRepository, C: RecipeCache> GetRecipeUseCase<R, C> {
    /// Cache-aside read. Visibility is checked on every hit, so a cached
    /// draft is still hidden from strangers.
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        recipe_id: Uuid,
    ) -> Result<RecipeDetail, ApiError> {
        let detail = match self.cache.get_detail(recipe_id).await {
            Some(detail) => detail,
            None => {
                let detail = self
                    .recipes
                    .find_detail(recipe_id)
                    .await?
                    .ok_or(ApiError::RecipeNotFound)?;
                self.cache.put_detail(&detail).await;
                detail
            }
        };
        if !detail.recipe.is_visible_to(actor.as_ref()) {
            return Err(ApiError::RecipeNotFound);
        }
        Ok(detail)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ListRecipesUseCase<R> {
    pub async fn execute(
        &self,
        mut filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError> {
        filter.q = filter
            .q
            .map(|q| q.trim().to_owned())
            .filter(|q| !q.is_empty());
        filter.ingredient = filter
            .ingredient
            .map(|name| snapchef_domain::ingredient::normalize_name(&name))
            .filter(|name| !name.is_empty());
        self.recipes.list_published(&filter, page).await
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

/// PATCH body. `Some("")` clears `description` or `thumbnail_url`.
#[derive(Default)]
pub struct UpdateRecipeInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cooking_time: Option<i32>,
    pub servings: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub status: Option<RecipeStatus>,
    pub steps: Option<Vec<Step>>,
    pub ingredients: Option<Vec<IngredientLine>>,
}

impl UpdateRecipeInput {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.cooking_time.is_none()
            && self.servings.is_none()
            && self.thumbnail_url.is_none()
            && self.status.is_none()
            && self.steps.is_none()
            && self.ingredients.is_none()
    }
}

pub struct UpdateRecipeUseCase<R: RecipeRepository, C: RecipeCache> {
    pub recipes: R,
    pub cache: C,
}

impl<R: RecipeRepository, C: RecipeCache> UpdateRecipeUseCase<R, C> {
    pub async fn execute(
        &self,
        actor: Actor,
        recipe_id: Uuid,
        input: UpdateRecipeInput,
    ) -> Result<RecipeDetail, ApiError> {
        if input.is_empty() {
            return Err(ApiError::validation("at least one field is required"));
        }
        let recipe = find_visible(&self.recipes, Some(&actor), recipe_id).await?;
        if recipe.author_id != actor.user_id {
            return Err(ApiError::Forbidden);
        }

        // Re-sending the current status is not a transition.
        let status = match input.status {
            Some(to) if to == recipe.status => None,
            Some(to) if recipe.status.owner_can_transition(to) => Some(to),
            Some(to) => {
                return Err(ApiError::InvalidStatusTransition {
                    from: recipe.status,
                    to,
                });
            }
            None => None,
        };

        let changes = RecipeChanges {
            title: input.title.as_deref().map(validation::title).transpose()?,
            description: input
                .description
                .as_deref()
                .map(|v| validation::optional_text("description", Some(v), DESCRIPTION_MAX_LEN))
                .transpose()?,
            cooking_time: input
                .cooking_time
                .map(validation::cooking_time)
                .transpose()?,
            servings: input.servings.map(validation::servings).transpose()?,
            thumbnail_url: input
                .thumbnail_url
                .as_deref()
                .map(|v| validation::optional_text("thumbnail_url", Some(v), URL_MAX_LEN))
                .transpose()?,
            status,
            steps: input.steps.map(validation::steps).transpose()?,
            ingredients: input
                .ingredients
                .map(validation::ingredients)
                .transpose()?,
        };

        self.recipes.update(recipe_id, &changes).await?;
        self.cache.evict(recipe_id).await;

        self.recipes
            .find_detail(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository, C: RecipeCache> {
    pub recipes: R,
    pub cache: C,
}

impl<R: RecipeRepository, C: RecipeCache> DeleteRecipeUseCase<R, C> {
    pub async fn execute(&self, actor: Actor, recipe_id: Uuid) -> Result<(), ApiError> {
        let recipe = find_visible(&self.recipes, Some(&actor), recipe_id).await?;
        let is_owner = recipe.author_id == actor.user_id;
        if !is_owner && !actor.is_moderator() {
            return Err(ApiError::Forbidden);
        }
        if !self.recipes.delete(recipe_id).await? {
            return Err(ApiError::RecipeNotFound);
        }
        self.cache.evict(recipe_id).await;
        if !is_owner {
            tracing::info!(
                recipe_id = %recipe_id,
                moderator_id = %actor.user_id,
                "recipe removed by moderator"
            );
        }
        Ok(())
    }
}
