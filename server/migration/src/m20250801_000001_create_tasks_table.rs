use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Completed,
    Bucket,
    List,
    StartDate,
    ExpectedCompletion,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_auto(Tasks::Id))
                    .col(string(Tasks::Title))
                    .col(string(Tasks::Description).default(""))
                    .col(boolean(Tasks::Completed).default(false))
                    // Plain string rather than a DB enum: the read path owns
                    // the default-to-today fallback for unrecognized values.
                    .col(string(Tasks::Bucket).default("today"))
                    .col(string_null(Tasks::List))
                    .col(timestamp_null(Tasks::StartDate))
                    .col(timestamp_null(Tasks::ExpectedCompletion))
                    .col(timestamp(Tasks::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Tasks::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await
    }
}
