use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Statement,
    TransactionTrait,
    sea_query::{Expr, Func, OnConflict, Query},
};
use uuid::Uuid;

use snapchef_core::sea_ext::{OrderByRandom, SelectPage, escape_like};
use snapchef_domain::pagination::{Page, PageRequest};
use snapchef_domain::recipe::{RecipeSort, RecipeStatus};
use snapchef_schema::{follows, ingredients, likes, recipe_ingredients, recipes, steps, users};

use super::{card_from_pair, recipe_from_model};
use crate::domain::repository::RecipeRepository;
use crate::domain::types::{
    IngredientLine, NewRecipe, Recipe, RecipeCard, RecipeChanges, RecipeDetail, RecipeFilter, Step,
};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct RatingRow {
    comment_count: i64,
    avg_rating: Option<f64>,
}

async fn insert_steps(
    txn: &DatabaseTransaction,
    recipe_id: Uuid,
    new_steps: &[Step],
) -> Result<(), DbErr> {
    for step in new_steps {
        steps::ActiveModel {
            id: Set(Uuid::now_v7()),
            recipe_id: Set(recipe_id),
            order_index: Set(step.order_index),
            content: Set(step.content.clone()),
            image_url: Set(step.image_url.clone()),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

/// Upsert each ingredient by normalized name, then link it to the recipe.
///
/// `DO UPDATE` on the unchanged name makes `RETURNING` yield the existing row,
/// so concurrent writers naming the same new ingredient converge on one id.
async fn link_ingredients(
    txn: &DatabaseTransaction,
    recipe_id: Uuid,
    lines: &[IngredientLine],
) -> Result<(), DbErr> {
    let now = Utc::now();
    for line in lines {
        let ingredient = ingredients::Entity::insert(ingredients::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(line.name.clone()),
            created_at: Set(now),
        })
        .on_conflict(
            OnConflict::column(ingredients::Column::Name)
                .update_column(ingredients::Column::Name)
                .to_owned(),
        )
        .exec_with_returning(txn)
        .await?;

        recipe_ingredients::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(ingredient.id),
            quantity: Set(line.quantity.clone()),
            unit: Set(line.unit.clone()),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

impl DbRecipeRepository {
    /// Count `query`, then fetch one page of it joined with authors.
    async fn fetch_cards(
        &self,
        query: Select<recipes::Entity>,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError> {
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let rows = query
            .find_also_related(users::Entity)
            .page(page)
            .all(&self.db)
            .await
            .context("list recipes")?;
        let items = rows
            .into_iter()
            .map(card_from_pair)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, total, page))
    }
}

fn published() -> sea_orm::sea_query::SimpleExpr {
    recipes::Column::Status.eq(RecipeStatus::Published.as_str())
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, ApiError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        model.map(recipe_from_model).transpose()
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<RecipeDetail>, ApiError> {
        let Some((recipe, author)) = recipes::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find recipe with author")?
        else {
            return Ok(None);
        };
        let card = card_from_pair((recipe, author))?;

        let step_models = steps::Entity::find()
            .filter(steps::Column::RecipeId.eq(id))
            .order_by_asc(steps::Column::OrderIndex)
            .all(&self.db)
            .await
            .context("list recipe steps")?;

        let ingredient_rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.eq(id))
            .find_also_related(ingredients::Entity)
            .order_by_asc(ingredients::Column::Name)
            .all(&self.db)
            .await
            .context("list recipe ingredients")?;

        let like_count = likes::Entity::find()
            .filter(likes::Column::RecipeId.eq(id))
            .count(&self.db)
            .await
            .context("count likes")?;

        let rating = RatingRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT COUNT(*)::BIGINT AS comment_count, AVG(rating)::FLOAT8 AS avg_rating
            FROM comments
            WHERE recipe_id = $1
            "#,
            [id.into()],
        ))
        .one(&self.db)
        .await
        .context("aggregate comment ratings")?;
        let (comment_count, avg_rating) = rating
            .map(|r| (r.comment_count.max(0) as u64, r.avg_rating))
            .unwrap_or((0, None));

        Ok(Some(RecipeDetail {
            recipe: card.recipe,
            author: card.author,
            steps: step_models
                .into_iter()
                .map(|s| Step {
                    order_index: s.order_index,
                    content: s.content,
                    image_url: s.image_url,
                })
                .collect(),
            ingredients: ingredient_rows
                .into_iter()
                .filter_map(|(link, ingredient)| {
                    ingredient.map(|i| IngredientLine {
                        name: i.name,
                        quantity: link.quantity,
                        unit: link.unit,
                    })
                })
                .collect(),
            like_count,
            comment_count,
            avg_rating,
        }))
    }

    async fn create(&self, new: &NewRecipe) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let new = new.clone();
                Box::pin(async move {
                    let recipe = &new.recipe;
                    recipes::ActiveModel {
                        id: Set(recipe.id),
                        author_id: Set(recipe.author_id),
                        title: Set(recipe.title.clone()),
                        description: Set(recipe.description.clone()),
                        cooking_time: Set(recipe.cooking_time),
                        servings: Set(recipe.servings),
                        thumbnail_url: Set(recipe.thumbnail_url.clone()),
                        status: Set(recipe.status.as_str().to_owned()),
                        created_at: Set(recipe.created_at),
                        updated_at: Set(recipe.updated_at),
                    }
                    .insert(txn)
                    .await?;
                    insert_steps(txn, recipe.id, &new.steps).await?;
                    link_ingredients(txn, recipe.id, &new.ingredients).await?;
                    Ok(())
                })
            })
            .await
            .context("create recipe graph")?;
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &RecipeChanges) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let changes = changes.clone();
                Box::pin(async move {
                    let mut am = recipes::ActiveModel {
                        id: Set(id),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    };
                    if let Some(title) = changes.title {
                        am.title = Set(title);
                    }
                    if let Some(description) = changes.description {
                        am.description = Set(description);
                    }
                    if let Some(cooking_time) = changes.cooking_time {
                        am.cooking_time = Set(cooking_time);
                    }
                    if let Some(servings) = changes.servings {
                        am.servings = Set(servings);
                    }
                    if let Some(thumbnail_url) = changes.thumbnail_url {
                        am.thumbnail_url = Set(thumbnail_url);
                    }
                    if let Some(status) = changes.status {
                        am.status = Set(status.as_str().to_owned());
                    }
                    am.update(txn).await?;

                    if let Some(new_steps) = changes.steps {
                        steps::Entity::delete_many()
                            .filter(steps::Column::RecipeId.eq(id))
                            .exec(txn)
                            .await?;
                        insert_steps(txn, id, &new_steps).await?;
                    }
                    if let Some(lines) = changes.ingredients {
                        recipe_ingredients::Entity::delete_many()
                            .filter(recipe_ingredients::Column::RecipeId.eq(id))
                            .exec(txn)
                            .await?;
                        link_ingredients(txn, id, &lines).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update recipe graph")?;
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: RecipeStatus) -> Result<(), ApiError> {
        recipes::Entity::update_many()
            .col_expr(recipes::Column::Status, Expr::value(status.as_str()))
            .col_expr(recipes::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(recipes::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set recipe status")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn ids_by_author(&self, author_id: Uuid) -> Result<Vec<Uuid>, ApiError> {
        let ids = recipes::Entity::find()
            .select_only()
            .column(recipes::Column::Id)
            .filter(recipes::Column::AuthorId.eq(author_id))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("list recipe ids by author")?;
        Ok(ids)
    }

    async fn list_published(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError> {
        let mut query = recipes::Entity::find().filter(published());
        if let Some(ref q) = filter.q {
            let pattern = format!("%{}%", escape_like(&q.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((
                    recipes::Entity,
                    recipes::Column::Title,
                ))))
                .like(pattern),
            );
        }
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if let Some(ref name) = filter.ingredient {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column((recipe_ingredients::Entity, recipe_ingredients::Column::RecipeId))
                        .from(recipe_ingredients::Entity)
                        .inner_join(
                            ingredients::Entity,
                            Expr::col((ingredients::Entity, ingredients::Column::Id)).equals((
                                recipe_ingredients::Entity,
                                recipe_ingredients::Column::IngredientId,
                            )),
                        )
                        .and_where(
                            Expr::col((ingredients::Entity, ingredients::Column::Name))
                                .eq(name.as_str()),
                        )
                        .to_owned(),
                ),
            );
        }
        query = match filter.sort {
            RecipeSort::Newest => query
                .order_by_desc(recipes::Column::CreatedAt)
                .order_by_desc(recipes::Column::Id),
            RecipeSort::Oldest => query
                .order_by_asc(recipes::Column::CreatedAt)
                .order_by_asc(recipes::Column::Id),
            RecipeSort::Quickest => query
                .order_by_asc(recipes::Column::CookingTime)
                .order_by_desc(recipes::Column::CreatedAt),
            RecipeSort::Random => query.order_by_random(),
        };
        self.fetch_cards(query, page).await
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        include_unpublished: bool,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError> {
        let mut query = recipes::Entity::find().filter(recipes::Column::AuthorId.eq(author_id));
        if !include_unpublished {
            query = query.filter(published());
        }
        let query = query
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id);
        self.fetch_cards(query, page).await
    }

    async fn list_feed(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError> {
        let query = recipes::Entity::find()
            .filter(published())
            .filter(
                recipes::Column::AuthorId.in_subquery(
                    Query::select()
                        .column(follows::Column::FollowingId)
                        .from(follows::Entity)
                        .and_where(Expr::col(follows::Column::FollowerId).eq(user_id))
                        .to_owned(),
                ),
            )
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id);
        self.fetch_cards(query, page).await
    }

    async fn list_liked_by(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError> {
        let query = recipes::Entity::find()
            .join_rev(JoinType::InnerJoin, likes::Relation::Recipe.def())
            .filter(likes::Column::UserId.eq(user_id))
            .filter(
                Condition::any()
                    .add(published())
                    .add(recipes::Column::AuthorId.eq(user_id)),
            )
            .order_by_desc(likes::Column::CreatedAt);
        self.fetch_cards(query, page).await
    }

    async fn list_by_status(
        &self,
        status: RecipeStatus,
        page: PageRequest,
    ) -> Result<Page<RecipeCard>, ApiError> {
        let query = recipes::Entity::find()
            .filter(recipes::Column::Status.eq(status.as_str()))
            .order_by_asc(recipes::Column::CreatedAt)
            .order_by_asc(recipes::Column::Id);
        self.fetch_cards(query, page).await
    }
}
