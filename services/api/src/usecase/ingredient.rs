use snapchef_domain::ingredient::normalize_name;
use snapchef_domain::pagination::{Page, PageRequest};

use crate::domain::repository::IngredientRepository;
use crate::domain::types::Ingredient;
use crate::error::ApiError;

pub struct SearchIngredientsUseCase<I: IngredientRepository> {
    pub ingredients: I,
}

impl<I: IngredientRepository> SearchIngredientsUseCase<I> {
    /// `q` is normalized the same way stored names are, then used as a prefix.
    pub async fn execute(
        &self,
        q: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Ingredient>, ApiError> {
        let prefix = q.map(normalize_name).filter(|p| !p.is_empty());
        self.ingredients.search(prefix.as_deref(), page).await
    }
}
