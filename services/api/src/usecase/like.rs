use uuid::Uuid;

use crate::domain::repository::{LikeRepository, RecipeCache, RecipeRepository};
use crate::domain::types::Actor;
use crate::error::ApiError;
use crate::usecase::recipe::find_visible;

pub struct LikeRecipeUseCase<R: RecipeRepository, L: LikeRepository, C: RecipeCache> {
    pub recipes: R,
    pub likes: L,
    pub cache: C,
}

impl<R: RecipeRepository, L: LikeRepository, C: RecipeCache> LikeRecipeUseCase<R, L, C> {
    pub async fn execute(&self, actor: Actor, recipe_id: Uuid) -> Result<(), ApiError> {
        find_visible(&self.recipes, Some(&actor), recipe_id).await?;
        if self.likes.exists(actor.user_id, recipe_id).await? {
            return Err(ApiError::AlreadyLiked);
        }
        self.likes.create(actor.user_id, recipe_id).await?;
        self.cache.evict(recipe_id).await;
        Ok(())
    }
}

pub struct UnlikeRecipeUseCase<L: LikeRepository, C: RecipeCache> {
    pub likes: L,
    pub cache: C,
}

impl<L: LikeRepository, C: RecipeCache> UnlikeRecipeUseCase<L, C> {
    pub async fn execute(&self, actor: Actor, recipe_id: Uuid) -> Result<(), ApiError> {
        if !self.likes.delete(actor.user_id, recipe_id).await? {
            return Err(ApiError::LikeNotFound);
        }
        self.cache.evict(recipe_id).await;
        Ok(())
    }
}
