//! Create website visit table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WebsiteVisit::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(WebsiteVisit::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(WebsiteVisit::Path).string_len(512).not_null())
                    .col(ColumnDef::new(WebsiteVisit::UserAgent).string_len(512))
                    .col(
                        ColumnDef::new(WebsiteVisit::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for visit counts over time)
        manager
            .create_index(
                Index::create()
                    .name("idx_website_visit_created_at")
                    .table(WebsiteVisit::Table)
                    .col(WebsiteVisit::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WebsiteVisit::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WebsiteVisit {
    Table,
    Id,
    Path,
    UserAgent,
    CreatedAt,
}
