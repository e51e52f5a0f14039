use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Steps::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Steps::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Steps::RecipeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Steps::OrderIndex)
                            .integer()
                            .not_null()
                            .check(Expr::col(Steps::OrderIndex).gte(1)),
                    )
                    .col(ColumnDef::new(Steps::Content).text().not_null())
                    .col(ColumnDef::new(Steps::ImageUrl).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Steps::Table, Steps::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Steps::Table)
                    .col(Steps::RecipeId)
                    .col(Steps::OrderIndex)
                    .unique()
                    .name("uq_steps_recipe_id_order_index")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Steps::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Steps {
    Table,
    Id,
    RecipeId,
    OrderIndex,
    Content,
    ImageUrl,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
