use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use snapchef_auth_types::identity::Identity;
use snapchef_domain::recipe::{RecipeSort, RecipeStatus};
use snapchef_domain::user::UserRole;

/// Stored account, including the password hash. Never serialized to clients.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Public counters shown on a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub published_recipes: u64,
    pub followers: u64,
    pub following: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Partial profile update. `Some(None)` clears an optional column.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub avatar_url: Option<Option<String>>,
    pub bio: Option<Option<String>>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.avatar_url.is_none() && self.bio.is_none()
    }
}

/// Whoever is making a request, reduced to what authorization needs.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn is_moderator(&self) -> bool {
        self.role.is_moderator()
    }
}

impl From<&Identity> for Actor {
    fn from(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id,
            role: identity.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub cooking_time: i32,
    pub servings: i32,
    pub thumbnail_url: Option<String>,
    pub status: RecipeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Published recipes are public. Anything else is limited to its author
    /// and moderators.
    pub fn is_visible_to(&self, actor: Option<&Actor>) -> bool {
        if self.status == RecipeStatus::Published {
            return true;
        }
        actor.is_some_and(|a| a.user_id == self.author_id || a.is_moderator())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub order_index: i32,
    pub content: String,
    pub image_url: Option<String>,
}

/// One ingredient as used by a recipe. `name` is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: String,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
}

/// Everything a recipe page shows. Cached as JSON under `recipe:{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub author: UserSummary,
    pub steps: Vec<Step>,
    pub ingredients: Vec<IngredientLine>,
    pub like_count: u64,
    pub comment_count: u64,
    pub avg_rating: Option<f64>,
}

/// List row: a recipe with its author.
#[derive(Debug, Clone)]
pub struct RecipeCard {
    pub recipe: Recipe,
    pub author: UserSummary,
}

/// A validated recipe graph ready to be written in one transaction.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub recipe: Recipe,
    pub steps: Vec<Step>,
    pub ingredients: Vec<IngredientLine>,
}

/// Validated recipe update. `steps` and `ingredients` replace the whole set.
#[derive(Debug, Clone, Default)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub cooking_time: Option<i32>,
    pub servings: Option<i32>,
    pub thumbnail_url: Option<Option<String>>,
    pub status: Option<RecipeStatus>,
    pub steps: Option<Vec<Step>>,
    pub ingredients: Option<Vec<IngredientLine>>,
}

/// Filters for the public recipe list.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Case-insensitive title substring.
    pub q: Option<String>,
    pub author_id: Option<Uuid>,
    /// Normalized ingredient name the recipe must use.
    pub ingredient: Option<String>,
    pub sort: RecipeSort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: UserSummary,
}

#[derive(Debug, Clone, Default)]
pub struct CommentChanges {
    pub content: Option<String>,
    pub rating: Option<i16>,
}
