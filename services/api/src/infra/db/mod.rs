//! sea-orm implementations of the repository traits.

use anyhow::{Context as _, anyhow};
use sea_orm::{DbErr, SqlErr};

use snapchef_schema::{comments, recipes, users};

use crate::domain::types::{Comment, Recipe, RecipeCard, User, UserSummary};
use crate::error::ApiError;

mod comment;
mod ingredient;
mod recipe;
mod social;
mod user;

pub use comment::DbCommentRepository;
pub use ingredient::DbIngredientRepository;
pub use recipe::DbRecipeRepository;
pub use social::{DbFollowRepository, DbLikeRepository};
pub use user::DbUserRepository;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = model.role.parse().context("parse user role")?;
    Ok(User {
        id: model.id,
        email: model.email,
        username: model.username,
        password_hash: model.password,
        role,
        avatar_url: model.avatar_url,
        bio: model.bio,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn summary_from_model(model: users::Model) -> UserSummary {
    UserSummary {
        id: model.id,
        username: model.username,
        avatar_url: model.avatar_url,
    }
}

fn recipe_from_model(model: recipes::Model) -> Result<Recipe, ApiError> {
    let status = model.status.parse().context("parse recipe status")?;
    Ok(Recipe {
        id: model.id,
        author_id: model.author_id,
        title: model.title,
        description: model.description,
        cooking_time: model.cooking_time,
        servings: model.servings,
        thumbnail_url: model.thumbnail_url,
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// `find_also_related` yields `None` only if the author row is gone, which the
/// cascading foreign key rules out.
fn card_from_pair(
    (recipe, author): (recipes::Model, Option<users::Model>),
) -> Result<RecipeCard, ApiError> {
    let author = author.ok_or_else(|| anyhow!("recipe {} has no author row", recipe.id))?;
    Ok(RecipeCard {
        recipe: recipe_from_model(recipe)?,
        author: summary_from_model(author),
    })
}

fn comment_from_model(model: comments::Model) -> Comment {
    Comment {
        id: model.id,
        recipe_id: model.recipe_id,
        user_id: model.user_id,
        content: model.content,
        rating: model.rating,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
