//! Post entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Corkboard post model.
///
/// Posts are created by anonymous visitors and only ever mutated by
/// moderation: the pinned flag can be toggled, and posts can be deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Author display name.
    pub name: String,

    /// Batch number the author belongs to.
    pub batch: i32,

    /// Message body.
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Public URL of the optional attached image.
    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    /// Required link to the author's Facebook profile.
    pub facebook_url: String,

    /// Whether an admin pinned this post to the top of the board.
    #[sea_orm(default_value = false)]
    pub is_pinned: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
