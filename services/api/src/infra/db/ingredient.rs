use anyhow::Context as _;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use snapchef_core::sea_ext::{SelectPage, escape_like};
use snapchef_domain::pagination::{Page, PageRequest};
use snapchef_schema::ingredients;

use crate::domain::repository::IngredientRepository;
use crate::domain::types::Ingredient;
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn search(
        &self,
        prefix: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Ingredient>, ApiError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
            query = query.filter(ingredients::Column::Name.like(format!("{}%", escape_like(prefix))));
        }
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count ingredients")?;
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .page(page)
            .all(&self.db)
            .await
            .context("search ingredients")?;
        Ok(Page::new(
            models
                .into_iter()
                .map(|m| Ingredient {
                    id: m.id,
                    name: m.name,
                })
                .collect(),
            total,
            page,
        ))
    }
}
