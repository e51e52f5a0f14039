use chrono::Utc;
use uuid::Uuid;

use snapchef_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{CommentRepository, RecipeCache, RecipeRepository};
use crate::domain::types::{Actor, Comment, CommentChanges, CommentWithAuthor};
use crate::domain::validation;
use crate::error::ApiError;
use crate::usecase::recipe::find_visible;

/// Load a comment and make sure it hangs off `recipe_id`.
async fn find_comment_on<M: CommentRepository>(
    comments: &M,
    recipe_id: Uuid,
    comment_id: Uuid,
) -> Result<Comment, ApiError> {
    comments
        .find_by_id(comment_id)
        .await?
        .filter(|c| c.recipe_id == recipe_id)
        .ok_or(ApiError::CommentNotFound)
}

async fn reload<M: CommentRepository>(
    comments: &M,
    comment_id: Uuid,
) -> Result<CommentWithAuthor, ApiError> {
    comments
        .find_with_author(comment_id)
        .await?
        .ok_or(ApiError::CommentNotFound)
}

// ── ListComments ─────────────────────────────────────────────────────────────

pub struct ListCommentsUseCase<R: RecipeRepository, M: CommentRepository> {
    pub recipes: R,
    pub comments: M,
}

impl<R: RecipeRepository, M: CommentRepository> ListCommentsUseCase<R, M> {
    pub async fn execute(
        &self,
        actor: Option<Actor>,
        recipe_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<CommentWithAuthor>, ApiError> {
        find_visible(&self.recipes, actor.as_ref(), recipe_id).await?;
        self.comments.list_by_recipe(recipe_id, page).await
    }
}

// ── CreateComment ────────────────────────────────────────────────────────────

pub struct CreateCommentInput {
    pub content: String,
    pub rating: i16,
}

pub struct CreateCommentUseCase<R: RecipeRepository, M: CommentRepository, C: RecipeCache> {
    pub recipes: R,
    pub comments: M,
    pub cache: C,
}

impl<R: RecipeRepository, M: CommentRepository, C: RecipeCache> CreateCommentUseCase<R, M, C> {
    pub async fn execute(
        &self,
        actor: Actor,
        recipe_id: Uuid,
        input: CreateCommentInput,
    ) -> Result<CommentWithAuthor, ApiError> {
        find_visible(&self.recipes, Some(&actor), recipe_id).await?;
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::now_v7(),
            recipe_id,
            user_id: actor.user_id,
            content: validation::comment_content(&input.content)?,
            rating: validation::rating(input.rating)?,
            created_at: now,
            updated_at: now,
        };
        self.comments.create(&comment).await?;
        self.cache.evict(recipe_id).await;
        reload(&self.comments, comment.id).await
    }
}

// ── UpdateComment ────────────────────────────────────────────────────────────

pub struct UpdateCommentUseCase<M: CommentRepository, C: RecipeCache> {
    pub comments: M,
    pub cache: C,
}

impl<M: CommentRepository, C: RecipeCache> UpdateCommentUseCase<M, C> {
    pub async fn execute(
        &self,
        actor: Actor,
        recipe_id: Uuid,
        comment_id: Uuid,
        changes: CommentChanges,
    ) -> Result<CommentWithAuthor, ApiError> {
        if changes.content.is_none() && changes.rating.is_none() {
            return Err(ApiError::validation("at least one of content, rating is required"));
        }
        let comment = find_comment_on(&self.comments, recipe_id, comment_id).await?;
        if comment.user_id != actor.user_id {
            return Err(ApiError::Forbidden);
        }
        let changes = CommentChanges {
            content: changes
                .content
                .as_deref()
                .map(validation::comment_content)
                .transpose()?,
            rating: changes.rating.map(validation::rating).transpose()?,
        };
        self.comments.update(comment_id, &changes).await?;
        self.cache.evict(recipe_id).await;
        reload(&self.comments, comment_id).await
    }
}

// ── DeleteComment ────────────────────────────────────────────────────────────

pub struct DeleteCommentUseCase<R: RecipeRepository, M: CommentRepository, C: RecipeCache> {
    pub recipes: R,
    pub comments: M,
    pub cache: C,
}

impl<R: RecipeRepository, M: CommentRepository, C: RecipeCache> DeleteCommentUseCase<R, M, C> {
    /// Allowed for the comment's author and the recipe's author.
    pub async fn execute(
        &self,
        actor: Actor,
        recipe_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), ApiError> {
        let comment = find_comment_on(&self.comments, recipe_id, comment_id).await?;
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(ApiError::RecipeNotFound)?;
        if actor.user_id != comment.user_id && actor.user_id != recipe.author_id {
            return Err(ApiError::Forbidden);
        }
        if !self.comments.delete(comment_id).await? {
            return Err(ApiError::CommentNotFound);
        }
        self.cache.evict(recipe_id).await;
        Ok(())
    }
}
