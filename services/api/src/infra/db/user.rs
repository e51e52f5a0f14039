use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, sea_query::SimpleExpr,
};
use uuid::Uuid;

use snapchef_core::sea_ext::SelectPage;
use snapchef_domain::pagination::{Page, PageRequest};
use snapchef_domain::recipe::RecipeStatus;
use snapchef_schema::{follows, recipes, users};

use super::{is_unique_violation, summary_from_model, user_from_model};
use crate::domain::repository::UserRepository;
use crate::domain::types::{ProfileChanges, User, UserStats, UserSummary};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl DbUserRepository {
    async fn find_one(&self, filter: SimpleExpr) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(filter)
            .one(&self.db)
            .await
            .context("find user")?;
        model.map(user_from_model).transpose()
    }

    /// Users on the other side of a follow edge where `column` equals `id`.
    async fn list_edge(
        &self,
        id: Uuid,
        column: follows::Column,
        join: follows::Relation,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, ApiError> {
        let query = users::Entity::find()
            .join_rev(JoinType::InnerJoin, join.def())
            .filter(column.eq(id));
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count follow edges")?;
        let models = query
            .order_by_desc(follows::Column::CreatedAt)
            .page(page)
            .all(&self.db)
            .await
            .context("list follow edges")?;
        Ok(Page::new(
            models.into_iter().map(summary_from_model).collect(),
            total,
            page,
        ))
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        self.find_one(users::Column::Email.eq(email)).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        self.find_one(users::Column::Username.eq(username)).await
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            password: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            avatar_url: Set(user.avatar_url.clone()),
            bio: Set(user.bio.clone()),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            // Lost a race with a concurrent signup; report which key collided.
            Err(e) if is_unique_violation(&e) => {
                if self.find_by_email(&user.email).await?.is_some() {
                    Err(ApiError::EmailTaken)
                } else {
                    Err(ApiError::UsernameTaken)
                }
            }
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update_profile(&self, id: Uuid, changes: &ProfileChanges) -> Result<User, ApiError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref username) = changes.username {
            am.username = Set(username.clone());
        }
        if let Some(ref avatar_url) = changes.avatar_url {
            am.avatar_url = Set(avatar_url.clone());
        }
        if let Some(ref bio) = changes.bio {
            am.bio = Set(bio.clone());
        }
        am.updated_at = Set(Utc::now());
        match am.update(&self.db).await {
            Ok(model) => user_from_model(model),
            Err(e) if is_unique_violation(&e) => Err(ApiError::UsernameTaken),
            Err(e) => Err(anyhow::Error::new(e).context("update user profile").into()),
        }
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            is_active: Set(is_active),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set user active flag")?;
        Ok(())
    }

    async fn stats(&self, id: Uuid) -> Result<UserStats, ApiError> {
        let published_recipes = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(id))
            .filter(recipes::Column::Status.eq(RecipeStatus::Published.as_str()))
            .count(&self.db)
            .await
            .context("count published recipes")?;
        let followers = follows::Entity::find()
            .filter(follows::Column::FollowingId.eq(id))
            .count(&self.db)
            .await
            .context("count followers")?;
        let following = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(id))
            .count(&self.db)
            .await
            .context("count following")?;
        Ok(UserStats {
            published_recipes,
            followers,
            following,
        })
    }

    async fn list_followers(
        &self,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, ApiError> {
        self.list_edge(
            id,
            follows::Column::FollowingId,
            follows::Relation::Follower,
            page,
        )
        .await
    }

    async fn list_following(
        &self,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<UserSummary>, ApiError> {
        self.list_edge(
            id,
            follows::Column::FollowerId,
            follows::Relation::Following,
            page,
        )
        .await
    }
}
