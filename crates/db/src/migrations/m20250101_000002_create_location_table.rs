//! Create `location` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Location::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Location::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Location::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Location::Lat).double().not_null())
                    .col(ColumnDef::new(Location::Lng).double().not_null())
                    .col(ColumnDef::new(Location::Street).string_len(256))
                    .col(ColumnDef::new(Location::City).string_len(128))
                    .col(ColumnDef::new(Location::State).string_len(128))
                    .col(ColumnDef::new(Location::Country).string_len(128))
                    .col(ColumnDef::new(Location::PostalCode).string_len(20))
                    .col(
                        ColumnDef::new(Location::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: name (lookup by place name)
        manager
            .create_index(
                Index::create()
                    .name("idx_location_name")
                    .table(Location::Table)
                    .col(Location::Name)
                    .to_owned(),
            )
            .await?;

        // Index: (city, state) - the common map filter
        manager
            .create_index(
                Index::create()
                    .name("idx_location_city_state")
                    .table(Location::Table)
                    .col(Location::City)
                    .col(Location::State)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Location::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Location {
    Table,
    Id,
    Name,
    Lat,
    Lng,
    Street,
    City,
    State,
    Country,
    PostalCode,
    CreatedAt,
}
