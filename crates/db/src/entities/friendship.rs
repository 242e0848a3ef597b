//! Friendship entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Friendship - an undirected edge between two users.
///
/// The pair is stored in insertion order; lookups must check both
/// orientations.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "friendship")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub user1_id: String,

    #[sea_orm(indexed)]
    pub user2_id: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
