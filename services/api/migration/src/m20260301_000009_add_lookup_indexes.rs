use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col(Recipes::AuthorId)
                    .name("idx_recipes_author_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col(Recipes::Status)
                    .col(Recipes::CreatedAt)
                    .name("idx_recipes_status_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Comments::Table)
                    .col(Comments::RecipeId)
                    .name("idx_comments_recipe_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Likes::Table)
                    .col(Likes::RecipeId)
                    .name("idx_likes_recipe_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Follows::Table)
                    .col(Follows::FollowingId)
                    .name("idx_follows_following_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(RecipeIngredients::Table)
                    .col(RecipeIngredients::IngredientId)
                    .name("idx_recipe_ingredients_ingredient_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_recipe_ingredients_ingredient_id",
            "idx_follows_following_id",
            "idx_likes_recipe_id",
            "idx_comments_recipe_id",
            "idx_recipes_status_created_at",
            "idx_recipes_author_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Recipes {
    Table,
    AuthorId,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Comments {
    Table,
    RecipeId,
}

#[derive(Iden)]
enum Likes {
    Table,
    RecipeId,
}

#[derive(Iden)]
enum Follows {
    Table,
    FollowingId,
}

#[derive(Iden)]
enum RecipeIngredients {
    Table,
    IngredientId,
}
