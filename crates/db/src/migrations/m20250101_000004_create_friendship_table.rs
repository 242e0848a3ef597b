//! Create `friendship` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Friendship::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Friendship::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Friendship::User1Id).string_len(32).not_null())
                    .col(ColumnDef::new(Friendship::User2Id).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Friendship::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user1_id (one direction of the edge lookup)
        manager
            .create_index(
                Index::create()
                    .name("idx_friendship_user1_id")
                    .table(Friendship::Table)
                    .col(Friendship::User1Id)
                    .to_owned(),
            )
            .await?;

        // Index: user2_id (the other direction)
        manager
            .create_index(
                Index::create()
                    .name("idx_friendship_user2_id")
                    .table(Friendship::Table)
                    .col(Friendship::User2Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Friendship::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Friendship {
    Table,
    Id,
    User1Id,
    User2Id,
    CreatedAt,
}
