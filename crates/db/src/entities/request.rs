//! Request entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Resource category a request concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum RequestCategory {
    /// Friend request - the resource is the addressed user.
    #[sea_orm(string_value = "friend")]
    Friend,
    /// Group join request - the resource is a group.
    #[sea_orm(string_value = "group")]
    Group,
    /// Event join request - the resource is an event.
    #[sea_orm(string_value = "event")]
    Event,
}

/// Status of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Request is awaiting a response.
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    /// Request was accepted by the recipient.
    #[sea_orm(string_value = "accepted")]
    Accepted,
    /// Request was declined by the recipient.
    #[sea_orm(string_value = "declined")]
    Declined,
}

/// Request - a generic ask from one user to another about a resource.
///
/// The recipient is the group owner, event host, or (for friend
/// requests) the addressed user. Withdrawal removes the record; a
/// response keeps it with a terminal status.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub sender_id: String,

    #[sea_orm(indexed)]
    pub recipient_id: String,

    /// The entity the request concerns (group, event, or target user).
    #[sea_orm(indexed)]
    pub resource_id: String,

    pub category: RequestCategory,

    pub status: RequestStatus,

    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl RequestCategory {
    /// The wire name of this category, as used in URL segments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Friend => "friend",
            Self::Group => "group",
            Self::Event => "event",
        }
    }
}

impl std::str::FromStr for RequestCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "friend" => Ok(Self::Friend),
            "group" => Ok(Self::Group),
            "event" => Ok(Self::Event),
            _ => Err(()),
        }
    }
}
