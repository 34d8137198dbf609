//! User role entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role assignment model.
///
/// Admin status is derived by looking up an `admin` role row for the
/// authenticated user, never stored on the user row itself.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The user holding the role.
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Role name (currently only `admin`).
    pub role: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
