//! Create system log table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemLog::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SystemLog::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(SystemLog::Level).string_len(16).not_null())
                    .col(ColumnDef::new(SystemLog::Message).text().not_null())
                    .col(ColumnDef::new(SystemLog::Metadata).json_binary().not_null().default("{}"))
                    .col(
                        ColumnDef::new(SystemLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite index: (level, created_at) for filtered listings
        manager
            .create_index(
                Index::create()
                    .name("idx_system_log_level_created_at")
                    .table(SystemLog::Table)
                    .col(SystemLog::Level)
                    .col(SystemLog::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemLog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SystemLog {
    Table,
    Id,
    Level,
    Message,
    Metadata,
    CreatedAt,
}
