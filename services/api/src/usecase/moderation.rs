use uuid::Uuid;

use snapchef_domain::pagination::{Page, PageRequest};
use snapchef_domain::recipe::RecipeStatus;

use crate::domain::repository::{RecipeCache, RecipeRepository, UserRepository};
use crate::domain::types::{Actor, Recipe, RecipeCard, User};
use crate::error::ApiError;

fn require_moderator(actor: &Actor) -> Result<(), ApiError> {
    if actor.is_moderator() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

// ── Review queue ─────────────────────────────────────────────────────────────

pub struct ModerationQueueUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ModerationQueueUseCase<R> {
    /// Oldest first so submissions are reviewed in arrival order.
    pub async fn execute(
        &self,
        actor: Actor,
        status: RecipeStatus,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError> {
        require_moderator(&actor)?;
        self.recipes.list_by_status(status, page).await
    }
}

// ── Recipe status ────────────────────────────────────────────────────────────

pub struct ModerateRecipeUseCase<R: RecipeRepository, C: RecipeCache> {
    pub recipes: R,
    pub cache: C,
}

impl<R: RecipeRepository, C: RecipeCache> ModerateRecipeUseCase<R, C> {
    pub async fn execute(
        &self,
        actor: Actor,
        recipe_id: Uuid,
        to: RecipeStatus,
    ) -> Result<Recipe, ApiError> {
        require_moderator(&actor)?;
        let mut recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if to == recipe.status {
            return Ok(recipe);
        }
        if !recipe.status.moderator_can_transition(to) {
            return Err(ApiError::InvalidStatusTransition {
                from: recipe.status,
                to,
            });
        }
        self.recipes.set_status(recipe_id, to).await?;
        self.cache.evict(recipe_id).await;
        tracing::info!(
            recipe_id = %recipe_id,
            moderator_id = %actor.user_id,
            from = %recipe.status,
            to = %to,
            "recipe status moderated"
        );
        recipe.status = to;
        Ok(recipe)
    }
}

// ── Ban / unban ──────────────────────────────────────────────────────────────

pub struct SetUserActiveUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetUserActiveUseCase<U> {
    /// Moderators cannot change another moderator's account.
    pub async fn execute(
        &self,
        actor: Actor,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<User, ApiError> {
        require_moderator(&actor)?;
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if user.role.is_moderator() && user.id != actor.user_id {
            return Err(ApiError::Forbidden);
        }
        self.users.set_active(user_id, is_active).await?;
        tracing::info!(
            user_id = %user_id,
            moderator_id = %actor.user_id,
            is_active,
            "user active flag changed"
        );
        user.is_active = is_active;
        Ok(user)
    }
}
