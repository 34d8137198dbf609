//! Create post table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Post::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Post::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Post::Batch).integer().not_null())
                    .col(ColumnDef::new(Post::Message).text().not_null())
                    .col(ColumnDef::new(Post::ImageUrl).string_len(1024))
                    .col(ColumnDef::new(Post::FacebookUrl).string_len(1024).not_null())
                    .col(ColumnDef::new(Post::IsPinned).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Post::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite index: (is_pinned, created_at) for board ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_post_is_pinned_created_at")
                    .table(Post::Table)
                    .col(Post::IsPinned)
                    .col(Post::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Post {
    Table,
    Id,
    Name,
    Batch,
    Message,
    ImageUrl,
    FacebookUrl,
    IsPinned,
    CreatedAt,
}
