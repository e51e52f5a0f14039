use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_recipes;
mod m20260301_000003_create_ingredients;
mod m20260301_000004_create_recipe_ingredients;
mod m20260301_000005_create_steps;
mod m20260301_000006_create_comments;
mod m20260301_000007_create_likes;
mod m20260301_000008_create_follows;
mod m20260301_000009_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_recipes::Migration),
            Box::new(m20260301_000003_create_ingredients::Migration),
            Box::new(m20260301_000004_create_recipe_ingredients::Migration),
            Box::new(m20260301_000005_create_steps::Migration),
            Box::new(m20260301_000006_create_comments::Migration),
            Box::new(m20260301_000007_create_likes::Migration),
            Box::new(m20260301_000008_create_follows::Migration),
            Box::new(m20260301_000009_add_lookup_indexes::Migration),
        ]
    }
}
