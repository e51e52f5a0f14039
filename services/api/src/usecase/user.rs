use uuid::Uuid;

use snapchef_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{RecipeCache, RecipeRepository, UserRepository};
use crate::domain::types::{Actor, ProfileChanges, RecipeCard, User, UserStats};
use crate::domain::validation::{self, BIO_MAX_LEN, URL_MAX_LEN};
use crate::error::ApiError;

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(User, UserStats), ApiError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let stats = self.repo.stats(user_id).await?;
        Ok((user, stats))
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

/// Raw PATCH fields. An empty `avatar_url` or `bio` clears it.
#[derive(Default)]
pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

pub struct UpdateProfileUseCase<U: UserRepository, R: RecipeRepository, C: RecipeCache> {
    pub repo: U,
    pub recipes: R,
    pub cache: C,
}

impl<U: UserRepository, R: RecipeRepository, C: RecipeCache> UpdateProfileUseCase<U, R, C> {
    /// A new username or avatar evicts the author's cached recipe details,
    /// which embed the author summary.
    pub async fn execute(&self, user_id: Uuid, input: UpdateProfileInput) -> Result<User, ApiError> {
        let changes = ProfileChanges {
            username: input
                .username
                .as_deref()
                .map(validation::username)
                .transpose()?,
            avatar_url: input
                .avatar_url
                .as_deref()
                .map(|v| validation::optional_text("avatar_url", Some(v), URL_MAX_LEN))
                .transpose()?,
            bio: input
                .bio
                .as_deref()
                .map(|v| validation::optional_text("bio", Some(v), BIO_MAX_LEN))
                .transpose()?,
        };
        if changes.is_empty() {
            return Err(ApiError::validation(
                "at least one of username, avatar_url, bio is required",
            ));
        }
        if self.repo.find_by_id(user_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        if let Some(ref username) = changes.username {
            let holder = self.repo.find_by_username(username).await?;
            if holder.is_some_and(|u| u.id != user_id) {
                return Err(ApiError::UsernameTaken);
            }
        }
        let user = self.repo.update_profile(user_id, &changes).await?;
        if changes.username.is_some() || changes.avatar_url.is_some() {
            for recipe_id in self.recipes.ids_by_author(user_id).await? {
                self.cache.evict(recipe_id).await;
            }
        }
        Ok(user)
    }
}

// ── ListUserRecipes ──────────────────────────────────────────────────────────

pub struct ListUserRecipesUseCase<U: UserRepository, R: RecipeRepository> {
    pub users: U,
    pub recipes: R,
}

impl<U: UserRepository, R: RecipeRepository> ListUserRecipesUseCase<U, R> {
    /// The author sees every status; everyone else sees published only.
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        author_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        let is_author = actor.is_some_and(|a| a.user_id == author_id);
        self.recipes.list_by_author(author_id, is_author, page).await
    }
}

// ── Feed / Likes ─────────────────────────────────────────────────────────────

pub struct FeedUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> FeedUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError> {
        self.recipes.list_feed(user_id, page).await
    }
}

pub struct LikedRecipesUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> LikedRecipesUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError> {
        self.recipes.list_liked_by(user_id, page).await
    }
}
