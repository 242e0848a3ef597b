//! Create `request` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Request::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Request::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Request::SenderId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Request::RecipientId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Request::ResourceId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Request::Category).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Request::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Request::Message).text())
                    .col(
                        ColumnDef::new(Request::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Request::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: sender_id (requests sent by a user)
        manager
            .create_index(
                Index::create()
                    .name("idx_request_sender_id")
                    .table(Request::Table)
                    .col(Request::SenderId)
                    .to_owned(),
            )
            .await?;

        // Index: recipient_id (requests awaiting a user's response)
        manager
            .create_index(
                Index::create()
                    .name("idx_request_recipient_id")
                    .table(Request::Table)
                    .col(Request::RecipientId)
                    .to_owned(),
            )
            .await?;

        // Index: (resource_id, category) - per-resource listings and
        // cascade deletes
        manager
            .create_index(
                Index::create()
                    .name("idx_request_resource_category")
                    .table(Request::Table)
                    .col(Request::ResourceId)
                    .col(Request::Category)
                    .to_owned(),
            )
            .await?;

        // Partial unique index: at most one pending request per
        // (sender, resource, category)
        manager
            .get_connection()
            .execute_unprepared(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS idx_request_pending_unique
                   ON "request" (sender_id, resource_id, category)
                   WHERE status = 'pending';"#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_request_pending_unique;")
            .await?;

        manager
            .drop_table(Table::drop().table(Request::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Request {
    Table,
    Id,
    SenderId,
    RecipientId,
    ResourceId,
    Category,
    Status,
    Message,
    CreatedAt,
    UpdatedAt,
}
