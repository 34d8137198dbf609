//! Create user role table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserRole::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserRole::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(UserRole::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(UserRole::Role).string_len(32).not_null())
                    .col(
                        ColumnDef::new(UserRole::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite index: (user_id, role) for role checks
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role_user_id_role")
                    .table(UserRole::Table)
                    .col(UserRole::UserId)
                    .col(UserRole::Role)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Foreign key: user_id -> user.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_user_role_user_id")
                    .from(UserRole::Table, UserRole::UserId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRole::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserRole {
    Table,
    Id,
    UserId,
    Role,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
