#![allow(async_fn_in_trait)]

use uuid::Uuid;

use snapchef_domain::pagination::{Page, PageRequest};
use snapchef_domain::recipe::RecipeStatus;

use crate::domain::types::{
    Comment, CommentChanges, CommentWithAuthor, Ingredient, NewRecipe, ProfileChanges, Recipe,
    RecipeCard, RecipeChanges, RecipeDetail, RecipeFilter, User, UserStats, UserSummary,
};
use crate::error::ApiError;

/// Repository for accounts and profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    /// `email` must already be lower-cased.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    async fn update_profile(&self, id: Uuid, changes: &ProfileChanges) -> Result<User, ApiError>;
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<(), ApiError>;
    async fn stats(&self, id: Uuid) -> Result<UserStats, ApiError>;
    /// Users following `id`, newest follow first.
    async fn list_followers(
        &self,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, ApiError>;
    /// Users `id` follows, newest follow first.
    async fn list_following(
        &self,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, ApiError>;
}

/// Follow edges between users.
pub trait FollowRepository: Send + Sync {
    async fn exists(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool, ApiError>;
    async fn create(&self, follower_id: Uuid, following_id: Uuid) -> Result<(), ApiError>;
    /// Returns `true` if deleted, `false` if there was no such edge.
    async fn delete(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool, ApiError>;
}

/// Recipes and their step/ingredient graph.
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, ApiError>;
    async fn find_detail(&self, id: Uuid) -> Result<Option<RecipeDetail>, ApiError>;
    /// Insert recipe, steps, ingredients and links atomically.
    async fn create(&self, recipe: &NewRecipe) -> Result<(), ApiError>;
    /// Apply changes atomically, replacing steps/ingredients when present.
    async fn update(&self, id: Uuid, changes: &RecipeChanges) -> Result<(), ApiError>;
    async fn set_status(&self, id: Uuid, status: RecipeStatus) -> Result<(), ApiError>;
    /// Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    /// Ids of every recipe by `author_id`, any status.
    async fn ids_by_author(&self, author_id: Uuid) -> Result<Vec<Uuid>, ApiError>;
    /// Published recipes matching `filter`.
    async fn list_published(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError>;
    /// An author's recipes, newest first. Unpublished ones only when asked.
    async fn list_by_author(
        &self,
        author_id: Uuid,
        include_unpublished: bool,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError>;
    /// Published recipes by authors `user_id` follows, newest first.
    async fn list_feed(&self, user_id: Uuid, page: PageRequest)
    -> Result<Page<RecipeCard>, ApiError>;
    /// Recipes `user_id` liked that are still visible to them, newest like first.
    async fn list_liked_by(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError>;
    /// Recipes in `status`, oldest first.
    async fn list_by_status(
        &self,
        status: RecipeStatus,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError>;
}

/// Likes (favorites).
pub trait LikeRepository: Send + Sync {
    async fn exists(&self, user_id: Uuid, recipe_id: Uuid) -> Result<bool, ApiError>;
    async fn create(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), ApiError>;
    /// Returns `true` if deleted, `false` if not found.
    async fn delete(&self, user_id: Uuid, recipe_id: Uuid) -> Result<bool, ApiError>;
}

/// Comments with ratings.
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, ApiError>;
    async fn find_with_author(&self, id: Uuid) -> Result<Option<CommentWithAuthor>, ApiError>;
    /// Newest first.
    async fn list_by_recipe(
        &self,
        recipe_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<CommentWithAuthor>, ApiError>;
    async fn create(&self, comment: &Comment) -> Result<(), ApiError>;
    async fn update(&self, id: Uuid, changes: &CommentChanges) -> Result<(), ApiError>;
    /// Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Shared ingredient catalog.
pub trait IngredientRepository: Send + Sync {
    /// Alphabetical; `prefix` is already normalized.
    async fn search(
        &self,
        prefix: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Ingredient>, ApiError>;
}

/// Recipe detail cache.
///
/// Failures never surface: implementations log and behave like a miss.
pub trait RecipeCache: Send + Sync {
    async fn get_detail(&self, recipe_id: Uuid) -> Option<RecipeDetail>;
    async fn put_detail(&self, detail: &RecipeDetail);
    async fn evict(&self, recipe_id: Uuid);
}
