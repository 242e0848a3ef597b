//! Create `event` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Event::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Event::GroupId).string_len(32).not_null())
                    .col(ColumnDef::new(Event::HostId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Event::AttendeeIds)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Event::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Event::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Event::EndsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Event::LocationId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Event::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Event::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: group_id (events of a group)
        manager
            .create_index(
                Index::create()
                    .name("idx_event_group_id")
                    .table(Event::Table)
                    .col(Event::GroupId)
                    .to_owned(),
            )
            .await?;

        // Index: host_id
        manager
            .create_index(
                Index::create()
                    .name("idx_event_host_id")
                    .table(Event::Table)
                    .col(Event::HostId)
                    .to_owned(),
            )
            .await?;

        // Index: starts_at (upcoming/past time filters)
        manager
            .create_index(
                Index::create()
                    .name("idx_event_starts_at")
                    .table(Event::Table)
                    .col(Event::StartsAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Event {
    Table,
    Id,
    Name,
    GroupId,
    HostId,
    AttendeeIds,
    Capacity,
    StartsAt,
    EndsAt,
    LocationId,
    CreatedAt,
    UpdatedAt,
}
