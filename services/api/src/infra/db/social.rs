use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use snapchef_schema::{follows, likes};

use super::is_unique_violation;
use crate::domain::repository::{FollowRepository, LikeRepository};
use crate::error::ApiError;

// ── Follows ──────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: DatabaseConnection,
}

impl FollowRepository for DbFollowRepository {
    async fn exists(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool, ApiError> {
        let model = follows::Entity::find_by_id((follower_id, following_id))
            .one(&self.db)
            .await
            .context("find follow")?;
        Ok(model.is_some())
    }

    async fn create(&self, follower_id: Uuid, following_id: Uuid) -> Result<(), ApiError> {
        let result = follows::ActiveModel {
            follower_id: Set(follower_id),
            following_id: Set(following_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ApiError::AlreadyFollowing),
            Err(e) => Err(anyhow::Error::new(e).context("create follow").into()),
        }
    }

    async fn delete(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool, ApiError> {
        let result = follows::Entity::delete_by_id((follower_id, following_id))
            .exec(&self.db)
            .await
            .context("delete follow")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Likes ────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLikeRepository {
    pub db: DatabaseConnection,
}

impl LikeRepository for DbLikeRepository {
    async fn exists(&self, user_id: Uuid, recipe_id: Uuid) -> Result<bool, ApiError> {
        let model = likes::Entity::find_by_id((user_id, recipe_id))
            .one(&self.db)
            .await
            .context("find like")?;
        Ok(model.is_some())
    }

    async fn create(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), ApiError> {
        let result = likes::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ApiError::AlreadyLiked),
            Err(e) => Err(anyhow::Error::new(e).context("create like").into()),
        }
    }

    async fn delete(&self, user_id: Uuid, recipe_id: Uuid) -> Result<bool, ApiError> {
        let result = likes::Entity::delete_by_id((user_id, recipe_id))
            .exec(&self.db)
            .await
            .context("delete like")?;
        Ok(result.rows_affected > 0)
    }
}
