use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use snapchef_core::sea_ext::SelectPage;
use snapchef_domain::pagination::{Page, PageRequest};
use snapchef_schema::{comments, users};

use super::{comment_from_model, summary_from_model};
use crate::domain::repository::CommentRepository;
use crate::domain::types::{Comment, CommentChanges, CommentWithAuthor};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

fn with_author(
    (comment, author): (comments::Model, Option<users::Model>),
) -> Result<CommentWithAuthor, ApiError> {
    let author =
        author.ok_or_else(|| anyhow::anyhow!("comment {} has no author row", comment.id))?;
    Ok(CommentWithAuthor {
        comment: comment_from_model(comment),
        author: summary_from_model(author),
    })
}

impl CommentRepository for DbCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, ApiError> {
        let model = comments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find comment by id")?;
        Ok(model.map(comment_from_model))
    }

    async fn find_with_author(&self, id: Uuid) -> Result<Option<CommentWithAuthor>, ApiError> {
        let row = comments::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find comment with author")?;
        row.map(with_author).transpose()
    }

    async fn list_by_recipe(
        &self,
        recipe_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<CommentWithAuthor>, ApiError> {
        let query = comments::Entity::find()
            .filter(comments::Column::RecipeId.eq(recipe_id))
            .order_by_desc(comments::Column::CreatedAt)
            .order_by_desc(comments::Column::Id);
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count comments")?;
        let rows = query
            .find_also_related(users::Entity)
            .page(page)
            .all(&self.db)
            .await
            .context("list comments")?;
        let items = rows
            .into_iter()
            .map(with_author)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, total, page))
    }

    async fn create(&self, comment: &Comment) -> Result<(), ApiError> {
        comments::ActiveModel {
            id: Set(comment.id),
            recipe_id: Set(comment.recipe_id),
            user_id: Set(comment.user_id),
            content: Set(comment.content.clone()),
            rating: Set(comment.rating),
            created_at: Set(comment.created_at),
            updated_at: Set(comment.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create comment")?;
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &CommentChanges) -> Result<(), ApiError> {
        let mut am = comments::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(ref content) = changes.content {
            am.content = Set(content.clone());
        }
        if let Some(rating) = changes.rating {
            am.rating = Set(rating);
        }
        am.update(&self.db).await.context("update comment")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = comments::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete comment")?;
        Ok(result.rows_affected > 0)
    }
}
